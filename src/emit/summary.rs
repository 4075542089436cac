use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{PropertyDecl, TypeDecl};
use crate::resolve;
use crate::workflow::settings::GenerationSettings;

static SUMMARY_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<summary>(?P<content>.+)</summary>").unwrap()
});

/// A newline plus the original file indentation; replaced to re-flow the
/// raw documentation block.
static LINE_INDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s+").unwrap()
});

/// A cross-reference whose target is a fully qualified member path; the
/// trailing member name (with an optional parameter list) is kept.
static MEMBER_NAME_IN_CREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?P<before>.*)<see(?:also)? cref.+\.(?P<member>\w+|\w+\(.+\))"(?: )?/>(?P<after>.*)$"#)
        .unwrap()
});

/// Framework types given as reference parameters: `SetData(A, B)`.
static PARAMS_TYPES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\w\((?P<params>[^")]+)[")]"#).unwrap()
});

/// A single framework type inside a reference attribute.
static CREF_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#" cref="(?P<ty>[^")]+)"#).unwrap()
});

static OPENING_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<\w+>").unwrap()
});

/// What the summary block documents; drives the placeholder wording when no
/// documentation exists.
pub enum SummaryTarget<'a> {
    Type(&'a TypeDecl),
    Property(&'a PropertyDecl),
    Method(&'a str),
}

/// Produces the documentation block for a member at the given indentation,
/// generating a placeholder when the raw text is absent or its summary body
/// is blank. Every emitted line ends up as `/// …` re-indented to `indent`
/// levels; the block ends with a newline.
pub fn format_summary(
    target: &SummaryTarget<'_>,
    raw: &str,
    indent: u16,
    settings: &GenerationSettings,
) -> String {
    if is_summary_empty(raw) {
        return placeholder_summary(target, indent, settings);
    }

    // Strip the original indentation but keep the line structure, then drop
    // the first and last lines, which are structurally empty.
    let unindented = LINE_INDENT.replace_all(raw, "\n");
    let lines: Vec<&str> = unindented.split('\n').collect();
    let body: &[&str] = if lines.len() >= 2 {
        &lines[1..lines.len() - 1]
    } else {
        &lines
    };

    let mut formatted = Vec::with_capacity(body.len());
    for (index, line) in body.iter().enumerate() {
        let simplified = simplify_cref(line, settings);
        let tag_adjacent = match body.get(index + 1) {
            // A line enclosed by a tag, or followed by one, takes the full
            // cleanup; a wrapped mid-sentence line only gets its references
            // simplified so the flow text stays intact.
            Some(next) => {
                line.trim_end().ends_with('>')
                    || next.trim_start().starts_with('<')
                    || next.trim_end().ends_with('>')
            }
            None => true,
        };
        let content = if tag_adjacent {
            cleanup(&simplified)
        } else {
            simplified
        };
        formatted.push(reformat(&content, indent));
    }

    let mut block = formatted.join("\n");
    block.push('\n');
    block
}

fn is_summary_empty(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return true;
    }
    match SUMMARY_CONTENT.captures(raw) {
        Some(caps) => caps["content"].trim().is_empty(),
        None => false,
    }
}

fn placeholder_summary(
    target: &SummaryTarget<'_>,
    indent: u16,
    settings: &GenerationSettings,
) -> String {
    let t = tabs(indent);
    let body = member_specific_summary(target, settings);
    format!("{t}/// <summary>\n{t}/// {body}\n{t}/// </summary>\n")
}

fn member_specific_summary(target: &SummaryTarget<'_>, settings: &GenerationSettings) -> String {
    match target {
        SummaryTarget::Type(decl) => {
            let source = if settings.strategy.fully_qualified_names {
                decl.full_name()
            } else {
                decl.reflection_name()
            };
            format!("The interface for {} class.", see_cref(&source))
        }
        SummaryTarget::Property(property) => {
            let verbs = match (property.has_getter, property.has_setter) {
                (true, true) => "Gets or sets",
                (true, false) => "Gets",
                _ => "Sets",
            };
            format!(
                "{verbs} the value of {} property.",
                see_cref(&property.name)
            )
        }
        SummaryTarget::Method(name) => format!("The method to {}.", see_cref(name)),
    }
}

fn see_cref(target: &str) -> String {
    format!("<see cref=\"{target}\"/>")
}

pub(crate) fn reformat(content: &str, indent: u16) -> String {
    format!("{}/// {content}", tabs(indent))
}

pub(crate) fn tabs(amount: u16) -> String {
    " ".repeat(4 * amount as usize)
}

/// Full cleanup of a tag-adjacent line: the text between tags is trimmed
/// and its trailing punctuation normalized. Lone closing tags are left be.
pub(crate) fn cleanup(line: &str) -> String {
    if line.starts_with("</") {
        return line.to_string();
    }

    let (open, rest) = match OPENING_TAG.find(line) {
        Some(found) => (&line[..found.end()], &line[found.end()..]),
        None => ("", line),
    };
    let (content, close) = match rest.find("</") {
        Some(position) => (&rest[..position], &rest[position..]),
        None => (rest, ""),
    };

    format!("{open}{}{close}", adjust_trailing(content))
}

/// Trailing-punctuation normalization: zero or exactly two trailing dots
/// become one, more than two become an ellipsis, a single dot is already
/// correct and only loses surrounding whitespace. Sentences ending in other
/// punctuation are left untouched.
fn adjust_trailing(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let base = trimmed.trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    if base.is_empty() {
        return trimmed.to_string();
    }
    match base.chars().next_back() {
        Some(last) if last.is_alphanumeric() || last == '_' => {}
        _ => return trimmed.to_string(),
    }

    let dots = trimmed[base.len()..].matches('.').count();
    if dots > 2 {
        format!("{base}...")
    } else {
        format!("{base}.")
    }
}

/// Reduces a fully qualified cross-reference to its trailing member name
/// and runs its parameter types through the alias table.
pub(crate) fn simplify_cref(line: &str, settings: &GenerationSettings) -> String {
    if line.is_empty() {
        return String::new();
    }

    match MEMBER_NAME_IN_CREF.captures(line) {
        Some(caps) => {
            let rebuilt = format!(
                "{}{}{}",
                &caps["before"],
                see_cref(&caps["member"]),
                &caps["after"]
            );
            replace_full_types(&rebuilt, settings)
        }
        None => line.to_string(),
    }
}

/// Replaces framework type names inside a reference by their aliases,
/// unless the strategy keeps fully qualified output.
pub(crate) fn replace_full_types(line: &str, settings: &GenerationSettings) -> String {
    if settings.strategy.fully_qualified_names {
        return line.to_string();
    }

    if let Some(caps) = PARAMS_TYPES.captures(line) {
        if let Some(found) = caps.name("params") {
            let replaced = found
                .as_str()
                .split(',')
                .map(|parameter| resolve::alias_from_doc_name(parameter, settings))
                .collect::<Vec<_>>()
                .join(", ");
            let mut updated = line.to_string();
            updated.replace_range(found.range(), &replaced);
            return updated;
        }
    }

    if let Some(caps) = CREF_TYPE.captures(line) {
        if let Some(found) = caps.name("ty") {
            let replaced = resolve::alias_from_doc_name(found.as_str(), settings);
            let mut updated = line.to_string();
            updated.replace_range(found.range(), &replaced);
            return updated;
        }
    }

    line.to_string()
}
