use std::collections::HashMap;
use std::path::Path;

use crate::context::GenerationContext;
use crate::files;

use super::annotations;
use super::patterns::{CLASS_DECLARATION, GENERIC_CONSTRAINT, OBJECT_INITIALIZATION};

/// Separators used for identifier-level replacement, in scan order. Later
/// separators re-split tokens produced by earlier ones, so nested generic
/// and tuple expressions are replaced component-wise.
pub const SOURCE_DELIMITERS: [char; 6] = [' ', '(', ')', ',', '<', '>'];

/// Rewrites one source file in place: splices the generated interface into
/// the class's inheritance list and replaces free-standing references to the
/// source class elsewhere. Marker-annotation lines are recorded for the
/// later cleanup pass regardless of whether the line changes.
///
/// Returns whether the declaration line was recognized at all. The file is
/// only written back when at least one line actually changed.
pub fn rewrite_source_file(
    path: &Path,
    target_interface_name: &str,
    source_class_name: &str,
    ctx: &mut GenerationContext,
) -> anyhow::Result<bool> {
    let mut lines = files::read_lines(path)?;
    let mut recognized = false;
    let mut modified = false;

    for (index, line) in lines.iter_mut().enumerate() {
        if annotations::contains_marker(line) {
            ctx.record_annotation(path, index);
        }

        if let Some(caps) = CLASS_DECLARATION.captures(line) {
            let inherit = caps["inherit"].to_string();
            let entries: Vec<String> = if inherit.is_empty() {
                Vec::new()
            } else {
                inherit.split(',').map(|entry| entry.trim().to_string()).collect()
            };

            // Membership is tested without any trailing `where` clause.
            let already_present = entries
                .iter()
                .map(|entry| without_constraint(entry))
                .any(|entry| entry == target_interface_name);

            if !already_present {
                let new_inherit = if entries.is_empty() {
                    target_interface_name.to_string()
                } else {
                    let mut extended = entries;
                    extended.push(target_interface_name.to_string());
                    extended.join(", ")
                };
                let declaration = caps["decl"].to_string();
                let name = caps["name"].to_string();
                let constraint = caps
                    .name("constraint")
                    .map(|found| found.as_str().to_string())
                    .unwrap_or_default();

                *line = format!(
                    "{declaration}{name}{}",
                    inheritance_suffix(&constraint, &new_inherit)
                );
                modified = true;
            }
            recognized = true;
        } else {
            let updated = update_references(line, source_class_name, ctx.pairs());
            if updated != *line {
                *line = updated;
                modified = true;
            }
        }
    }

    if modified {
        files::write_lines(path, &lines)?;
    }
    if !recognized {
        tracing::warn!(?path, "no type declaration line recognized, inheritance not updated");
    }
    Ok(recognized)
}

/// Rebuilds the tail of the declaration line. The constraint is recovered
/// from the original declaration first; failing that, from the rebuilt
/// inheritance string (legacy declarations put it after the list), and is
/// restored at the end of the line either way.
fn inheritance_suffix(declaration_constraint: &str, inheritances: &str) -> String {
    let mut constraint = declaration_constraint.trim().to_string();
    if constraint.is_empty() {
        if let Some(caps) = GENERIC_CONSTRAINT.captures(inheritances) {
            constraint = caps["constraint"].trim().to_string();
        }
    }

    if constraint.is_empty() {
        format!(" : {inheritances}")
    } else {
        format!(" : {inheritances} {constraint}")
    }
}

fn without_constraint(entry: &str) -> &str {
    match entry.find(" where ") {
        Some(position) => &entry[..position],
        None => entry,
    }
}

/// Replaces whole-token occurrences of generated-pair class names on one
/// line. Declaration and constructor lines of the class itself are skipped,
/// and the right-hand side of an object construction stays untouched; an
/// interface cannot be instantiated.
pub fn update_references(
    line: &str,
    source_class_name: &str,
    pairs: &HashMap<String, String>,
) -> String {
    // Constructor detection must not trip over `new Cat()` expressions;
    // those are handled by the construction split below.
    let without_new = line.replace(&format!("new {source_class_name}("), "");
    if line.contains(&format!(" class {source_class_name}"))
        || without_new.contains(&format!(" {source_class_name}("))
    {
        return line.to_string();
    }

    if let Some(caps) = OBJECT_INITIALIZATION.captures(line) {
        let eligible = replace_old_reference(&caps["before"], 0, pairs);
        return format!("{eligible}{}", &caps["ctor"]);
    }

    replace_old_reference(line, 0, pairs)
}

/// Token replacement over one separator, recursing into sub-tokens that
/// still contain a later separator. Tokens are replaced whole, never as
/// substrings.
fn replace_old_reference(
    sentence: &str,
    separator_index: usize,
    pairs: &HashMap<String, String>,
) -> String {
    let separator = SOURCE_DELIMITERS[separator_index];
    let words: Vec<&str> = sentence.split(separator).collect();
    let mut replaced: Vec<String> = Vec::with_capacity(words.len());

    for word in words {
        if let Some(interface_name) = pairs.get(word) {
            replaced.push(interface_name.clone());
            continue;
        }

        let mut current = word.to_string();
        // Always rescan from the first nested separator: the last matching
        // separator wins and re-splits the original token, which in turn
        // rescans its own sub-tokens.
        for next_index in 1..SOURCE_DELIMITERS.len() {
            if word.contains(SOURCE_DELIMITERS[next_index]) {
                current = replace_old_reference(word, next_index, pairs);
            }
        }
        replaced.push(current);
    }

    replaced.join(&separator.to_string())
}
