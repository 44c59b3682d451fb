//! Integration Test: Surface Independence
//!
//! **Policy**: the core crate is headless. It talks to a surface only through
//! its `Surface` trait and must build without any terminal library, so other
//! surfaces can reuse it unchanged.

use std::fs;

use architectural_enforcement::{assert_clean, load_sources, workspace_root, Violation};

const TERMINAL_CRATES: &[&str] = &["ratatui", "crossterm", "taskmaster-tui"];

const TERMINAL_PATHS: &[&str] = &["ratatui::", "crossterm::", "taskmaster_tui::"];

#[test]
fn test_core_manifest_has_no_terminal_dependency() {
    let manifest = workspace_root().join("conductor/core/Cargo.toml");
    let content = fs::read_to_string(&manifest).unwrap();

    let offending: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.starts_with('#'))
        .filter(|l| {
            TERMINAL_CRATES
                .iter()
                .any(|c| l.starts_with(&format!("{c} ")) || l.starts_with(&format!("{c}=")))
        })
        .collect();

    assert!(
        offending.is_empty(),
        "conductor/core depends on terminal crates: {offending:?}"
    );
}

#[test]
fn test_core_sources_do_not_reference_terminal_crates() {
    let mut violations = Vec::new();

    for file in load_sources("conductor/core/src") {
        for (idx, line) in file.lines.iter().enumerate() {
            if TERMINAL_PATHS.iter().any(|p| line.contains(p)) {
                violations.push(Violation::new(&file, idx, "Terminal crate in core"));
            }
        }
    }

    assert_clean("Core references a terminal surface", &violations);
}
