//! Project-descriptor metadata and source-tree discovery: root namespace and
//! assembly name from the `.csproj` file, subfolder joins for paths and
//! namespaces, and non-recursive source enumeration.

use std::path::{Path, PathBuf};

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;

static ROOT_NAMESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<RootNamespace>(?P<value>.+?)<").unwrap()
});

static ASSEMBLY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<AssemblyName>(?P<value>.+?)<").unwrap()
});

static NAMESPACE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"namespace (?P<value>.+)").unwrap()
});

/// Root namespace declared by the project descriptor, falling back to the
/// project name when the tag (or the file) is absent.
pub fn root_namespace(project_path: &Path, project_name: &str) -> String {
    descriptor_value(project_path, project_name, &ROOT_NAMESPACE)
        .unwrap_or_else(|| project_name.to_string())
}

/// Assembly name declared by the project descriptor, falling back to the
/// project name.
pub fn assembly_name(project_path: &Path, project_name: &str) -> String {
    descriptor_value(project_path, project_name, &ASSEMBLY_NAME)
        .unwrap_or_else(|| project_name.to_string())
}

fn descriptor_value(project_path: &Path, project_name: &str, pattern: &Regex) -> Option<String> {
    let descriptor = project_path.join(format!("{project_name}.csproj"));
    let content = std::fs::read_to_string(descriptor).ok()?;
    scan_lines(&content, pattern)
}

/// Joins subfolder segments onto a path: `base` + `["A", "B"]` → `base/A/B`.
pub fn with_path_subfolders(path: &Path, subfolders: &[String]) -> PathBuf {
    subfolders.iter().fold(path.to_path_buf(), |acc, folder| acc.join(folder))
}

/// Joins subfolder segments onto a namespace: `Ns` + `["A", "B"]` → `Ns.A.B`.
pub fn with_namespace_subfolders(namespace: &str, subfolders: &[String]) -> String {
    if subfolders.is_empty() {
        namespace.to_string()
    } else {
        format!("{namespace}.{}", subfolders.join("."))
    }
}

/// Source files of one task directory: non-recursive, `.cs` only, sorted so
/// every run processes them in the same order.
pub fn list_source_files(directory: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory)
        .with_context(|| format!("failed to list source files in {directory:?}"))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().map(|ext| ext == "cs").unwrap_or(false))
        .collect();
    files.sort();
    Ok(files)
}

/// The namespace declared inside a source file, scanned line by line.
pub fn namespace_from_file(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    scan_lines(&content, &NAMESPACE_NAME)
}

/// The type name from a source file's declaration line, generic parameter
/// list included (`Spike<T>`); the fallback when the file name and the type
/// name diverge.
pub fn class_name_from_file(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    content.lines().find_map(|line| {
        crate::rewrite::patterns::CLASS_DECLARATION
            .captures(line)
            .map(|caps| caps["name"].to_string())
    })
}

fn scan_lines(content: &str, pattern: &Regex) -> Option<String> {
    content.lines().find_map(|line| {
        pattern
            .captures(line)
            .map(|caps| caps["value"].trim().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_subfolders_join_with_dots() {
        assert_eq!(with_namespace_subfolders("Demo", &[]), "Demo");
        assert_eq!(
            with_namespace_subfolders("Demo", &["Api".into(), "Contracts".into()]),
            "Demo.Api.Contracts"
        );
    }

    #[test]
    fn path_subfolders_join_segments() {
        let joined = with_path_subfolders(Path::new("demo"), &["A".into(), "B".into()]);
        assert_eq!(joined, PathBuf::from("demo/A/B"));
    }

    #[test]
    fn descriptor_values_are_scanned_from_tags() {
        assert_eq!(
            scan_lines(
                "<Project>\n  <RootNamespace>Demo.Mapping</RootNamespace>\n</Project>",
                &ROOT_NAMESPACE
            ),
            Some("Demo.Mapping".to_string())
        );
        assert_eq!(
            scan_lines("  <AssemblyName>Demo.Logic</AssemblyName>", &ASSEMBLY_NAME),
            Some("Demo.Logic".to_string())
        );
        assert_eq!(scan_lines("<Project></Project>", &ROOT_NAMESPACE), None);
    }

    #[test]
    fn namespace_is_scanned_from_source_text() {
        assert_eq!(
            scan_lines("using System;\n\nnamespace Demo.Logic\n{\n}", &NAMESPACE_NAME),
            Some("Demo.Logic".to_string())
        );
    }
}
