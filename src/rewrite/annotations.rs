use once_cell::sync::Lazy;
use regex::Regex;

use super::patterns::MARKER_ATTRIBUTE;

static SPACE_BEFORE_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+\]").unwrap()
});

static SPACE_AFTER_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s+").unwrap()
});

static SPACE_BETWEEN_LISTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\]\s+\[").unwrap()
});

static DANGLING_COMMA_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*,*\s*\]").unwrap()
});

static DANGLING_COMMA_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*,*\s*").unwrap()
});

static COMMA_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*,\s*,*\s*").unwrap()
});

static COMMENT_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r".*//\s*$").unwrap()
});

/// Whether a line carries a marker annotation worth recording for cleanup.
pub fn contains_marker(line: &str) -> bool {
    MARKER_ATTRIBUTE.is_match(line)
}

/// Removes marker annotations from the given lines.
///
/// Line numbers must be strictly descending: removal shrinks the vector, so
/// processing upward from the end keeps the remaining indices valid. A line
/// holding only the marker disappears; combined attribute lists are
/// re-joined with single comma-space separation.
pub fn clean_marker_attributes(line_numbers: &[usize], lines: &mut Vec<String>) {
    for &number in line_numbers {
        let Some(line) = lines.get(number) else {
            continue;
        };
        let Some(caps) = MARKER_ATTRIBUTE.captures(line) else {
            continue;
        };

        let before = caps["before"].to_string();
        let after = caps["after"].to_string();

        // The whole line was just the marker.
        if before == "[" && after == "]" {
            lines.remove(number);
            continue;
        }

        let mut cleaned = format!("{before}{after}");

        // Inner spaces around the brackets.
        cleaned = SPACE_BEFORE_CLOSE.replace_all(&cleaned, "]").to_string();
        cleaned = SPACE_AFTER_OPEN.replace_all(&cleaned, "[").to_string();

        // Spacing between adjacent attribute lists.
        cleaned = SPACE_BETWEEN_LISTS.replace_all(&cleaned, "][").to_string();

        // Leftover brackets and dangling commas.
        cleaned = cleaned.replace("[]", "");
        cleaned = DANGLING_COMMA_CLOSE.replace_all(&cleaned, "]").to_string();
        cleaned = DANGLING_COMMA_OPEN.replace_all(&cleaned, "[").to_string();

        // Comma runs collapse to a single comma-space.
        cleaned = cleaned.replace(",,", ", ");
        cleaned = COMMA_RUN.replace_all(&cleaned, ", ").to_string();

        if cleaned.trim().is_empty() || COMMENT_ONLY.is_match(&cleaned) {
            lines.remove(number);
        } else {
            lines[number] = cleaned;
        }
    }
}

/// The final, explicitly confirmed cleanup pass: strips the recorded marker
/// lines out of every touched file.
pub fn final_cleanup(annotations: &[(std::path::PathBuf, Vec<usize>)]) -> anyhow::Result<()> {
    for (path, line_numbers) in annotations {
        if line_numbers.is_empty() {
            continue;
        }
        let mut lines = crate::files::read_lines(path)?;
        clean_marker_attributes(line_numbers, &mut lines);
        crate::files::write_lines(path, &lines)?;
    }
    Ok(())
}
