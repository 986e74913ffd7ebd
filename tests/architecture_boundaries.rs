use std::fs;
use std::path::{Path, PathBuf};

fn rs_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.extension().and_then(|s| s.to_str()) == Some("rs") {
                out.push(path);
            }
        }
    }
    out.sort();
    out
}

fn rel(path: &Path) -> String {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let rel = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();
    rel.replace('\\', "/")
}

fn violations_in(dir: &str, forbidden: &[&str]) -> Vec<String> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join(dir);
    let mut violations = Vec::new();
    for file in rs_files(&root) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        for needle in forbidden {
            if content.contains(needle) {
                violations.push(format!(
                    "{} imports forbidden dependency `{}`",
                    rel(&file),
                    needle
                ));
            }
        }
    }
    violations
}

#[test]
fn metrics_core_is_ui_free() {
    let violations = violations_in(
        "src/metrics",
        &["crate::ui", "crate::app", "crate::chart", "ratatui", "crossterm"],
    );
    assert!(
        violations.is_empty(),
        "Metrics layering violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn chart_projection_is_pure() {
    let violations = violations_in("src/chart", &["crate::ui", "ratatui", "crossterm", "sysinfo"]);
    assert!(
        violations.is_empty(),
        "Chart layering violations:\n{}",
        violations.join("\n")
    );
}

#[test]
fn sysinfo_is_confined_to_the_source_module() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut violations = Vec::new();

    for file in rs_files(&root) {
        let content = fs::read_to_string(&file).unwrap_or_default();
        if !content.contains("sysinfo::") {
            continue;
        }
        let rel_path = rel(&file);
        if rel_path != "src/metrics/source.rs" {
            violations.push(format!("{rel_path} uses `sysinfo` directly"));
        }
    }

    assert!(
        violations.is_empty(),
        "Unexpected sysinfo usage:\n{}",
        violations.join("\n")
    );
}
