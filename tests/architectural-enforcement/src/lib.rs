//! Architectural Enforcement
//!
//! Source-scanning helpers shared by the integration tests in `tests/`:
//! - No blocking I/O inside async functions
//! - No sleep() in production code
//! - No unwrap()/expect() in production code
//! - Core crate stays independent of any terminal library
//!
//! Scans are line based. A file's test section starts at its first
//! `#[cfg(test)]` line and runs to the end of the file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Production source roots, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["conductor/core/src", "tui/src"];

/// Workspace root (two levels above this package)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .unwrap_or_else(|_| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../..")))
}

/// One loaded source file
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Line index where the test section begins, if any
    pub fn test_section_start(&self) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.trim_start().starts_with("#[cfg(test)]"))
    }

    /// Whether line `idx` is test code
    pub fn is_test_code(&self, idx: usize) -> bool {
        if self.test_section_start().is_some_and(|start| idx >= start) {
            return true;
        }
        enclosing_fn(&self.lines, idx).is_some_and(|f| f.is_test)
    }

    /// Whether line `idx` is inside an `async fn`
    pub fn is_in_async_fn(&self, idx: usize) -> bool {
        enclosing_fn(&self.lines, idx).is_some_and(|f| f.kind == FnKind::Async)
    }

    /// Production lines as `(index, code without trailing comment)`
    pub fn production_lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        let end = self.test_section_start().unwrap_or(self.lines.len());
        self.lines[..end]
            .iter()
            .enumerate()
            .filter(move |(idx, _)| !self.is_test_code(*idx))
            .map(|(idx, line)| (idx, code_part(line)))
            .filter(|(_, code)| !code.trim_start().starts_with("//"))
    }
}

/// A rule violation at a source location
#[derive(Debug)]
pub struct Violation {
    pub path: PathBuf,
    pub line: usize,
    pub rule: &'static str,
    pub text: String,
}

impl Violation {
    pub fn new(file: &SourceFile, idx: usize, rule: &'static str) -> Self {
        Self {
            path: file.path.clone(),
            line: idx + 1,
            rule,
            text: file.lines[idx].trim().to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} - {}: {}",
            self.path.display(),
            self.line,
            self.rule,
            self.text
        )
    }
}

/// Panic with a readable report when `violations` is not empty
pub fn assert_clean(title: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }
    let mut report = format!("\n{title}: {} violation(s)\n", violations.len());
    for v in violations {
        report.push_str(&format!("  {v}\n"));
    }
    panic!("{report}");
}

/// Load every `.rs` file under `dir` (relative to the workspace root)
pub fn load_sources(dir: &str) -> Vec<SourceFile> {
    let root = workspace_root().join(dir);
    assert!(root.exists(), "source directory missing: {}", root.display());

    walkdir::WalkDir::new(&root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .filter_map(|e| {
            let content = fs::read_to_string(e.path()).ok()?;
            Some(SourceFile {
                path: e.path().to_path_buf(),
                lines: content.lines().map(str::to_string).collect(),
            })
        })
        .collect()
}

/// All production sources
pub fn production_sources() -> Vec<SourceFile> {
    PRODUCTION_DIRS.iter().flat_map(|d| load_sources(d)).collect()
}

/// Strip a trailing `//` comment (string contents are not parsed)
pub fn code_part(line: &str) -> &str {
    let mut from = 0;
    while let Some(rel) = line[from..].find("//") {
        let pos = from + rel;
        // Skip the "//" of URLs like "http://"
        if !line[..pos].ends_with(':') {
            return &line[..pos];
        }
        from = pos + 2;
    }
    line
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FnKind {
    Sync,
    Async,
}

/// Enclosing function of a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnclosingFn {
    pub kind: FnKind,
    pub is_test: bool,
}

/// Classify a line as a function signature
pub fn fn_kind(line: &str) -> Option<FnKind> {
    let mut rest = line.trim_start();
    for prefix in ["pub(crate) ", "pub(super) ", "pub ", "const ", "unsafe "] {
        rest = rest.strip_prefix(prefix).unwrap_or(rest);
    }
    if rest.starts_with("async fn ") {
        Some(FnKind::Async)
    } else if rest.starts_with("fn ") {
        Some(FnKind::Sync)
    } else {
        None
    }
}

/// Find the nearest function signature at or above `idx`
pub fn enclosing_fn(lines: &[String], idx: usize) -> Option<EnclosingFn> {
    let fn_idx = (0..=idx).rev().find(|&i| fn_kind(&lines[i]).is_some())?;
    let kind = fn_kind(&lines[fn_idx])?;

    let is_test = (0..fn_idx)
        .rev()
        .map(|i| lines[i].trim())
        .take_while(|l| l.starts_with("#[") || l.starts_with("///"))
        .any(|l| l.starts_with("#[test]") || l.starts_with("#[tokio::test"));

    Some(EnclosingFn { kind, is_test })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_fn_kind_with_visibility() {
        assert_eq!(fn_kind("pub async fn run(&self) {"), Some(FnKind::Async));
        assert_eq!(fn_kind("    pub(crate) fn helper() {"), Some(FnKind::Sync));
        assert_eq!(fn_kind("async fn main() {"), Some(FnKind::Async));
        assert_eq!(fn_kind("let f = || 1;"), None);
        assert_eq!(fn_kind("// fn commented()"), None);
    }

    #[test]
    fn test_enclosing_async_fn() {
        let src = lines(&[
            "pub async fn bad() {",
            "    let contents = std::fs::read_to_string(\"file.txt\")?;",
            "}",
        ]);
        assert_eq!(
            enclosing_fn(&src, 1),
            Some(EnclosingFn {
                kind: FnKind::Async,
                is_test: false
            })
        );
    }

    #[test]
    fn test_enclosing_test_fn() {
        let src = lines(&[
            "#[tokio::test]",
            "async fn test_something() {",
            "    std::thread::sleep(d);",
            "}",
        ]);
        assert!(enclosing_fn(&src, 2).is_some_and(|f| f.is_test));
    }

    #[test]
    fn test_test_section() {
        let file = SourceFile {
            path: PathBuf::from("x.rs"),
            lines: lines(&[
                "fn prod() { x.unwrap_or(1) }",
                "#[cfg(test)]",
                "mod tests {",
                "    fn helper() { y.unwrap() }",
                "}",
            ]),
        };
        assert!(!file.is_test_code(0));
        assert!(file.is_test_code(3));
        assert_eq!(file.production_lines().count(), 1);
    }

    #[test]
    fn test_code_part_keeps_urls() {
        assert_eq!(code_part("let u = \"http://x\"; // note"), "let u = \"http://x\"; ");
        assert_eq!(code_part("foo(); // bar"), "foo(); ");
    }
}
