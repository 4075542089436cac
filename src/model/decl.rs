use serde::{Deserialize, Serialize};

use super::types::TypeExpr;

fn default_true() -> bool {
    true
}

/// Whether a declared type is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
}

impl Default for TypeKind {
    fn default() -> Self {
        TypeKind::Class
    }
}

/// The class-level marker annotation. Carries the optional display name, the
/// registration opt-in/out, and the declared interface dependencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassAnnotation {
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default = "default_true")]
    pub register: bool,
    #[serde(default)]
    pub derived_from: Vec<TypeExpr>,
}

/// An unbound generic parameter of a declared type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericParam {
    pub name: String,
    #[serde(default)]
    pub base: Option<TypeExpr>,
    #[serde(default)]
    pub covariant: bool,
}

/// A declared property with accessor visibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default = "default_true")]
    pub has_getter: bool,
    #[serde(default)]
    pub has_setter: bool,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub api_member: bool,
}

/// A method parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

/// A declared method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default = "MethodDecl::default_return")]
    pub returns: TypeExpr,
    #[serde(default)]
    pub parameters: Vec<ParamDecl>,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub api_member: bool,
}

impl MethodDecl {
    fn default_return() -> TypeExpr {
        TypeExpr::primitive(super::types::Primitive::Void)
    }
}

/// One declared type from the type model document. Members keep declaration
/// order; the catalog never re-sorts them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub generic_params: Vec<GenericParam>,
    #[serde(default)]
    pub annotation: Option<ClassAnnotation>,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    /// Only annotated classes are generation candidates; annotated
    /// interfaces are not.
    pub fn is_api_class(&self) -> bool {
        self.kind == TypeKind::Class && self.annotation.is_some()
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn should_be_registered(&self) -> bool {
        self.annotation.as_ref().map(|a| a.register).unwrap_or(false)
    }

    /// The annotated display name, falling back to the declared name.
    /// Custom names are sanitized at catalog load, so no re-validation here.
    pub fn custom_name(&self) -> &str {
        match &self.annotation {
            Some(annotation) => match annotation.custom_name.as_deref() {
                Some(custom) if !custom.is_empty() => custom,
                _ => &self.name,
            },
            None => &self.name,
        }
    }

    pub fn derived_from(&self) -> &[TypeExpr] {
        match &self.annotation {
            Some(annotation) => &annotation.derived_from,
            None => &[],
        }
    }

    pub fn arity(&self) -> usize {
        self.generic_params.len()
    }

    /// Reflection-style name with the arity marker (`` Spike`1 ``).
    pub fn reflection_name(&self) -> String {
        if self.generic_params.is_empty() {
            self.name.clone()
        } else {
            format!("{}`{}", self.name, self.generic_params.len())
        }
    }

    /// Namespace-qualified reflection name; the catalog index key.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.reflection_name())
    }

    /// The declaration viewed as a type expression, its own parameters as
    /// unbound arguments.
    pub fn as_expr(&self) -> TypeExpr {
        TypeExpr::Named {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            args: self
                .generic_params
                .iter()
                .map(|p| TypeExpr::Param {
                    name: p.name.clone(),
                    base: p.base.clone().map(Box::new),
                })
                .collect(),
        }
    }
}
