//! Source scanning helpers for layering checks.

use std::fs;
use std::path::{Path, PathBuf};

/// `(path relative to the crate root, 1-based line number, line text)`.
pub type Hit = (String, usize, String);

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()));
    for entry in entries {
        let path = entry
            .unwrap_or_else(|e| panic!("cannot read entry in {}: {e}", dir.display()))
            .path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Every `.rs` file under `dir`, sorted for stable reports.
pub fn rust_sources(dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(&crate_root().join(dir), &mut files);
    files.sort();
    files
}

/// Lines of the files under `dir` accepted by `keep_file` that match `is_hit`.
fn scan(
    dir: &str,
    keep_file: impl Fn(&Path) -> bool,
    is_hit: impl Fn(&str) -> bool,
) -> Vec<Hit> {
    let root = crate_root();
    let mut hits = Vec::new();
    for file in rust_sources(dir).into_iter().filter(|f| keep_file(f)) {
        let text = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", file.display()));
        let shown = file
            .strip_prefix(&root)
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        hits.extend(
            text.lines()
                .enumerate()
                .filter(|(_, line)| is_hit(line))
                .map(|(n, line)| (shown.clone(), n + 1, line.to_string())),
        );
    }
    hits
}

/// Lines under `dir` containing any of `needles`.
pub fn lines_mentioning(dir: &str, needles: &[&str]) -> Vec<Hit> {
    scan(dir, |_| true, |line| needles.iter().any(|n| line.contains(n)))
}

/// Lines in `mod.rs` files other than module declarations, re-exports,
/// attributes and comments.
pub fn logic_in_mod_files(dir: &str) -> Vec<Hit> {
    const ALLOWED: [&str; 5] = ["//", "pub mod ", "mod ", "pub use ", "#["];
    scan(
        dir,
        |file| file.file_name().is_some_and(|name| name == "mod.rs"),
        |line| {
            let line = line.trim();
            !line.is_empty() && !ALLOWED.iter().any(|prefix| line.starts_with(prefix))
        },
    )
}
