//! File persistence with a fixed line-ending convention. Every artifact this
//! tool writes (generated interfaces, rewritten sources, registration
//! files) goes through here so the output is byte-stable across platforms.

use std::path::{Path, PathBuf};

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

/// All emitted files use Windows-style line endings, matching the source
/// trees this tool operates on.
pub const LINE_ENDING: &str = "\r\n";

static ANY_NEWLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|\r|\n").unwrap()
});

/// Rewrites every newline flavor to the fixed convention.
pub fn normalize_newlines(text: &str) -> String {
    ANY_NEWLINE.replace_all(text, LINE_ENDING).to_string()
}

/// Writes one generated source file, creating the target directory as
/// needed. Content is newline-normalized and gets a final line ending.
pub fn save_source_file(target_dir: &Path, file_name: &str, content: &str) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(target_dir)
        .with_context(|| format!("failed to create target directory {target_dir:?}"))?;

    let path = target_dir.join(format!("{file_name}.cs"));
    let normalized = format!("{}{LINE_ENDING}", normalize_newlines(content));
    std::fs::write(&path, normalized).with_context(|| format!("failed to write {path:?}"))?;
    Ok(path)
}

/// Reads a source file into lines, accepting any incoming newline flavor.
pub fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Writes lines back with the fixed line-ending convention.
pub fn write_lines(path: &Path, lines: &[String]) -> anyhow::Result<()> {
    let mut content = lines.join(LINE_ENDING);
    content.push_str(LINE_ENDING);
    std::fs::write(path, content).with_context(|| format!("failed to write {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_normalize_to_crlf() {
        assert_eq!(normalize_newlines("a\nb\r\nc\rd"), "a\r\nb\r\nc\r\nd");
    }
}
