//! Hygiene: source-level checks run as part of the test suite.
//!
//! Each pattern has a budget of occurrences in production `src/` files
//! (sibling `*_test.rs` files are exempt). Budgets only go down.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// Pattern, budget, and the reason it is restricted.
const BUDGETS: &[(&str, usize, &str)] = &[
    // Panics abort the host page.
    (".unwrap()", 0, "propagate or default instead of unwrapping"),
    (".expect(", 0, "propagate or default instead of expecting"),
    ("panic!(", 0, "engine code must not panic"),
    ("unreachable!(", 0, "model the state instead of asserting it away"),
    ("todo!(", 0, "stubs do not ship"),
    ("unimplemented!(", 0, "stubs do not ship"),
    // Silent loss.
    ("let _ =", 0, "inspect the result or log it"),
    (".ok()", 0, "inspect the error instead of discarding it"),
    // Output goes through tracing.
    ("println!(", 0, "use tracing macros"),
    ("eprintln!(", 0, "use tracing macros"),
    ("dbg!(", 0, "remove debugging output"),
    // Structure.
    ("#[allow(dead_code)]", 0, "delete unused code"),
];

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn source_tree_is_not_empty() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for (pattern, budget, reason) in BUDGETS {
        let found = hits(&files, pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > *budget {
            let listing = found
                .iter()
                .map(|(path, c)| format!("    {path}: {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!("{pattern} found {count}, max {budget} ({reason})\n{listing}"));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn every_test_module_file_exists() {
    let files = source_files();
    for file in &files {
        for line in file.content.lines() {
            let Some(rest) = line.trim().strip_prefix("#[path = \"") else {
                continue;
            };
            let Some(name) = rest.strip_suffix("\"]") else {
                continue;
            };
            let sibling = Path::new(&file.path).with_file_name(name);
            assert!(sibling.exists(), "{} declares missing test module {name}", file.path);
        }
    }
}
