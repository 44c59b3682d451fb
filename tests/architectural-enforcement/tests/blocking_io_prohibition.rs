//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: async code in the core and the TUI must not block the runtime.
//! Network I/O goes through reqwest's async client; file I/O is only allowed
//! in synchronous functions (config loading, log setup before the loop).
//!
//! **Forbidden inside `async fn`**: `std::fs`, `std::net`,
//! `std::process::Command`, `std::thread::sleep`.
//! **Forbidden everywhere**: `reqwest::blocking`, module-level `use std::net`.

use architectural_enforcement::{assert_clean, production_sources, Violation};

const ASYNC_FORBIDDEN: &[(&str, &str)] = &[
    ("std::fs::", "Blocking file I/O in async fn"),
    ("std::net::", "Blocking network I/O in async fn"),
    ("std::process::Command", "Blocking process I/O in async fn"),
    ("std::thread::sleep", "Thread sleep in async fn"),
];

#[test]
fn test_no_blocking_io_in_async_code() {
    let mut violations = Vec::new();

    for file in production_sources() {
        for (idx, code) in file.production_lines() {
            if !file.is_in_async_fn(idx) {
                continue;
            }
            for (pattern, rule) in ASYNC_FORBIDDEN {
                if code.contains(pattern) {
                    violations.push(Violation::new(&file, idx, rule));
                }
            }
        }
    }

    assert_clean("Blocking I/O inside async functions", &violations);
}

#[test]
fn test_no_blocking_http_client() {
    let mut violations = Vec::new();

    for file in production_sources() {
        for (idx, code) in file.production_lines() {
            if code.contains("reqwest::blocking") {
                violations.push(Violation::new(&file, idx, "Blocking HTTP client"));
            }
            if code.trim_start().starts_with("use std::net") {
                violations.push(Violation::new(&file, idx, "Blocking network import"));
            }
        }
    }

    assert_clean("Blocking clients", &violations);
}
