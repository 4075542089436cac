use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use super::decl::TypeDecl;
use super::types::TypeExpr;

/// The symbol table of declared types, built ahead of the run from the type
/// model document. Immutable for the lifetime of a generation run.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: Vec<TypeDecl>,
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct ModelDocument {
    types: Vec<TypeDecl>,
}

impl TypeCatalog {
    pub fn empty() -> Self {
        TypeCatalog::default()
    }

    /// Loads the type model from a JSON document on disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read type model {path:?}"))?;
        Self::from_json(&content).with_context(|| format!("failed to parse type model {path:?}"))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let document: ModelDocument = serde_json::from_str(content)?;
        Ok(Self::from_decls(document.types))
    }

    pub fn from_decls(mut types: Vec<TypeDecl>) -> Self {
        for decl in &mut types {
            if let Some(annotation) = &mut decl.annotation {
                if let Some(custom) = &annotation.custom_name {
                    let valid = sanitize_custom_name(custom);
                    annotation.custom_name = if valid.is_empty() { None } else { Some(valid) };
                }
            }
        }
        let index = types
            .iter()
            .enumerate()
            .map(|(position, decl)| (decl.full_name(), position))
            .collect();
        TypeCatalog { types, index }
    }

    /// Looks a declaration up by its namespace-qualified reflection name
    /// (`My.Code.Widget` or `` My.Code.Widget`1 ``).
    pub fn get(&self, full_name: &str) -> Option<&TypeDecl> {
        self.index.get(full_name).map(|&position| &self.types[position])
    }

    /// Resolves the declaration behind a named type expression, matching the
    /// constructed argument count against the declared arity.
    pub fn decl_for(&self, expr: &TypeExpr) -> Option<&TypeDecl> {
        match expr {
            TypeExpr::Named {
                namespace,
                name,
                args,
            } => {
                let key = if args.is_empty() {
                    format!("{namespace}.{name}")
                } else {
                    format!("{namespace}.{name}`{}", args.len())
                };
                self.get(&key)
            }
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Normalizes an annotated display name: leading digits are dropped (member
/// names cannot start with one), everything outside `[A-Za-z0-9_.]` is
/// removed.
fn sanitize_custom_name(name: &str) -> String {
    let trimmed = name.trim_start_matches(|c: char| c.is_ascii_digit());
    trimmed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .collect()
}

/// Well-known framework traits the resolver needs. Declared types never set
/// these; they come from the fixed collection/tuple namespaces.
pub mod well_known {
    /// Any member of the collections families counts as enumerable, except
    /// the two-slot key/value pair which gets its own branch.
    pub fn is_enumerable(namespace: &str, name: &str) -> bool {
        namespace.starts_with("System.Collections") && name != "KeyValuePair"
    }

    pub fn is_key_value_pair(namespace: &str, name: &str) -> bool {
        namespace == "System.Collections.Generic" && name == "KeyValuePair"
    }

    /// The legacy reference-tuple family (`System.Tuple`).
    pub fn is_reference_tuple(namespace: &str, name: &str) -> bool {
        namespace == "System" && name.starts_with("Tuple")
    }

    /// The legacy untyped list, aliased by name rather than resolved.
    pub fn is_legacy_list(namespace: &str, name: &str) -> bool {
        namespace == "System.Collections" && name == "ArrayList"
    }
}
