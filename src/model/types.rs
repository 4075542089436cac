use serde::{Deserialize, Serialize};

/// Built-in primitive types that resolve to a short alias instead of their
/// framework name (`System.Int32` → `int`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Byte,
    SByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    Bool,
    Char,
    #[serde(rename = "string")]
    Str,
    Object,
    Void,
}

impl Primitive {
    /// The conventional short alias used in emitted source text.
    pub fn alias(self) -> &'static str {
        match self {
            Primitive::Byte => "byte",
            Primitive::SByte => "sbyte",
            Primitive::Short => "short",
            Primitive::UShort => "ushort",
            Primitive::Int => "int",
            Primitive::UInt => "uint",
            Primitive::Long => "long",
            Primitive::ULong => "ulong",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Decimal => "decimal",
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::Str => "string",
            Primitive::Object => "object",
            Primitive::Void => "void",
        }
    }

    /// The framework name as it appears in documentation references.
    pub fn framework_name(self) -> &'static str {
        match self {
            Primitive::Byte => "System.Byte",
            Primitive::SByte => "System.SByte",
            Primitive::Short => "System.Int16",
            Primitive::UShort => "System.UInt16",
            Primitive::Int => "System.Int32",
            Primitive::UInt => "System.UInt32",
            Primitive::Long => "System.Int64",
            Primitive::ULong => "System.UInt64",
            Primitive::Float => "System.Single",
            Primitive::Double => "System.Double",
            Primitive::Decimal => "System.Decimal",
            Primitive::Bool => "System.Boolean",
            Primitive::Char => "System.Char",
            Primitive::Str => "System.String",
            Primitive::Object => "System.Object",
            Primitive::Void => "System.Void",
        }
    }

    /// Reverse lookup from a documentation-style framework name.
    pub fn from_framework_name(name: &str) -> Option<Primitive> {
        const ALL: [Primitive; 16] = [
            Primitive::Byte,
            Primitive::SByte,
            Primitive::Short,
            Primitive::UShort,
            Primitive::Int,
            Primitive::UInt,
            Primitive::Long,
            Primitive::ULong,
            Primitive::Float,
            Primitive::Double,
            Primitive::Decimal,
            Primitive::Bool,
            Primitive::Char,
            Primitive::Str,
            Primitive::Object,
            Primitive::Void,
        ];
        ALL.into_iter().find(|p| p.framework_name() == name)
    }
}

fn default_rank() -> usize {
    1
}

/// A textual-resolvable type expression.
///
/// This is the read-only "type descriptor" shape the whole pipeline works
/// against: every member type, parameter type, and generic argument in the
/// type model document deserializes into one of these nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A built-in primitive with a short alias.
    Primitive { name: Primitive },
    /// A named type, framework or declared, optionally constructed with
    /// generic arguments.
    Named {
        namespace: String,
        name: String,
        #[serde(default)]
        args: Vec<TypeExpr>,
    },
    /// An unbound generic parameter with its declared base constraint.
    Param {
        name: String,
        #[serde(default)]
        base: Option<Box<TypeExpr>>,
    },
    /// A nullable wrapper over a value type.
    Nullable { inner: Box<TypeExpr> },
    /// An array of the given rank (rank 2 renders `[,]`).
    Array {
        element: Box<TypeExpr>,
        #[serde(default = "default_rank")]
        rank: usize,
    },
    /// A value tuple; renders in round-bracket form.
    Tuple { items: Vec<TypeExpr> },
}

impl TypeExpr {
    pub fn primitive(p: Primitive) -> TypeExpr {
        TypeExpr::Primitive { name: p }
    }

    pub fn named(namespace: &str, name: &str, args: Vec<TypeExpr>) -> TypeExpr {
        TypeExpr::Named {
            namespace: namespace.to_string(),
            name: name.to_string(),
            args,
        }
    }

    pub fn param(name: &str) -> TypeExpr {
        TypeExpr::Param {
            name: name.to_string(),
            base: None,
        }
    }

    /// The reflection-style name of the node, arity marker included
    /// (`List` with one argument → `` List`1 ``).
    pub fn reflection_name(&self) -> String {
        match self {
            TypeExpr::Named { name, args, .. } if !args.is_empty() => {
                format!("{name}`{}", args.len())
            }
            TypeExpr::Named { name, .. } => name.clone(),
            TypeExpr::Param { name, .. } => name.clone(),
            TypeExpr::Primitive { name } => name
                .framework_name()
                .rsplit('.')
                .next()
                .unwrap_or_default()
                .to_string(),
            TypeExpr::Nullable { .. } => "Nullable`1".to_string(),
            TypeExpr::Array { element, .. } => format!("{}[]", element.reflection_name()),
            TypeExpr::Tuple { items } => format!("ValueTuple`{}", items.len()),
        }
    }

    /// The namespace-qualified variant of [`Self::reflection_name`].
    pub fn full_name(&self) -> String {
        match self {
            TypeExpr::Named { namespace, .. } if !namespace.is_empty() => {
                format!("{namespace}.{}", self.reflection_name())
            }
            TypeExpr::Primitive { name } => name.framework_name().to_string(),
            _ => self.reflection_name(),
        }
    }

    /// Renders the documentation-reference form of the expression, used to
    /// compose member lookup keys (`System.Nullable{System.Boolean}`,
    /// `My.Code.Widget`, `System.Int32[]`).
    pub fn doc_name(&self) -> String {
        match self {
            TypeExpr::Primitive { name } => name.framework_name().to_string(),
            TypeExpr::Named {
                namespace,
                name,
                args,
            } => {
                let base = if namespace.is_empty() {
                    name.clone()
                } else {
                    format!("{namespace}.{name}")
                };
                if args.is_empty() {
                    base
                } else {
                    let inner: Vec<String> = args.iter().map(TypeExpr::doc_name).collect();
                    format!("{base}{{{}}}", inner.join(","))
                }
            }
            TypeExpr::Param { name, .. } => name.clone(),
            TypeExpr::Nullable { inner } => format!("System.Nullable{{{}}}", inner.doc_name()),
            TypeExpr::Array { element, rank } => {
                format!("{}[{}]", element.doc_name(), ",".repeat(rank.saturating_sub(1)))
            }
            TypeExpr::Tuple { items } => {
                let inner: Vec<String> = items.iter().map(TypeExpr::doc_name).collect();
                format!("System.ValueTuple{{{}}}", inner.join(","))
            }
        }
    }
}
