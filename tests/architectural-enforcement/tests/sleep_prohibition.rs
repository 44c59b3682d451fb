//! Integration Test: Sleep Prohibition
//!
//! **Policy**: production code waits on I/O, never on a clock. The TUI paces
//! frames with `tokio::time::interval`; nothing else needs time at all.
//! Test code is exempt.

use architectural_enforcement::{assert_clean, production_sources, Violation};

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();

    for file in production_sources() {
        for (idx, code) in file.production_lines() {
            if code.contains("::sleep(") || code.contains(".sleep(") {
                violations.push(Violation::new(&file, idx, "Sleep call"));
            }
        }
    }

    assert_clean("Sleep in production code (use interval/async waits)", &violations);
}
