//! Integration Test: Panic-free Production Code
//!
//! **Policy**: failures propagate as `Result` and end up in the error region
//! or in `anyhow` at the binary edge. `unwrap()` and `expect()` are for tests.

use architectural_enforcement::{assert_clean, production_sources, Violation};

#[test]
fn test_no_unwrap_or_expect_in_production_code() {
    let mut violations = Vec::new();

    for file in production_sources() {
        for (idx, code) in file.production_lines() {
            if code.contains(".unwrap()") {
                violations.push(Violation::new(&file, idx, "unwrap()"));
            }
            if code.contains(".expect(") {
                violations.push(Violation::new(&file, idx, "expect()"));
            }
        }
    }

    assert_clean("Panicking calls in production code", &violations);
}
