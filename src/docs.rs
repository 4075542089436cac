//! Documentation lookup for generated summaries.
//!
//! Each source project may ship a documentation file (`{assembly}.xml` next
//! to the project descriptor) in the conventional compiler-emitted shape:
//! `<member name="KEY">` blocks whose keys are `T:`/`P:`/`M:` plus the
//! fully-qualified member signature. The loader is a line-oriented scan, not
//! an XML parse, keeping the same "no full parser" stance the rewriter takes.
//!
//! An absent file or key is not an error; it simply means a placeholder
//! summary will be generated.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{MethodDecl, PropertyDecl, TypeDecl};

static MEMBER_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<member name="(?P<key>[^"]+)"\s*>(?P<body>.*?)</member>"#).unwrap()
});

/// The loaded documentation of one source project.
#[derive(Debug, Default)]
pub struct DocMap {
    entries: HashMap<String, String>,
}

impl DocMap {
    pub fn empty() -> Self {
        DocMap::default()
    }

    /// Loads the documentation file of a project. A missing file yields an
    /// empty map; the generator then produces placeholder summaries.
    pub fn load(project_name: &str, project_path: &Path) -> Self {
        let assembly = crate::project::assembly_name(project_path, project_name);
        let document = project_path.join(format!("{assembly}.xml"));

        match std::fs::read_to_string(&document) {
            Ok(content) => Self::parse(&content),
            Err(_) => {
                tracing::warn!(?document, "documentation file not found, using placeholders");
                DocMap::empty()
            }
        }
    }

    pub fn parse(content: &str) -> Self {
        let entries = MEMBER_BLOCK
            .captures_iter(content)
            .map(|caps| (caps["key"].to_string(), caps["body"].to_string()))
            .collect();
        DocMap { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw documentation of the type itself (`T:` key), empty when absent.
    pub fn type_docs(&self, decl: &TypeDecl) -> String {
        self.lookup(&format!("T:{}", key_base(decl)))
    }

    /// Raw documentation of a property (`P:` key), empty when absent.
    pub fn property_docs(&self, decl: &TypeDecl, property: &PropertyDecl) -> String {
        self.lookup(&format!("P:{}.{}", key_base(decl), property.name))
    }

    /// Raw documentation of a method (`M:` key). Parameterless methods use
    /// the bare name; otherwise the comma-joined documentation-style
    /// parameter types are appended in parentheses.
    pub fn method_docs(&self, decl: &TypeDecl, method: &MethodDecl) -> String {
        let parameters = if method.parameters.is_empty() {
            String::new()
        } else {
            let types: Vec<String> = method
                .parameters
                .iter()
                .map(|parameter| parameter.ty.doc_name())
                .collect();
            format!("({})", types.join(","))
        };
        self.lookup(&format!("M:{}.{}{parameters}", key_base(decl), method.name))
    }

    fn lookup(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_default()
    }
}

/// Documentation keys use the namespace-qualified reflection name, with
/// nested-type separators normalized to dots.
fn key_base(decl: &TypeDecl) -> String {
    decl.full_name().replace('+', ".")
}
