use crate::context::GenerationContext;
use crate::model::{TypeCatalog, TypeDecl, TypeExpr};
use crate::resolve;
use crate::workflow::settings::GenerationSettings;

/// The naming-relevant facts of a type, detached from where they came from:
/// a declaration in the catalog, or a named type expression (framework
/// container, referenced class) met during resolution.
#[derive(Debug, Clone)]
pub struct TypeView {
    pub namespace: String,
    /// Reflection-style name, arity marker included (`` Spike`1 ``).
    pub reflection_name: String,
    /// Annotated display name when one exists, otherwise the reflection
    /// name. Carries no arity marker of its own when annotated.
    pub custom_name: String,
    pub is_interface: bool,
    pub is_api_class: bool,
    /// Generic arguments: constructed expressions, or the declaration's own
    /// unbound parameters.
    pub args: Vec<TypeExpr>,
    /// Parameters a source interface declares covariant; they keep their
    /// `out` keyword whenever named generics are rendered.
    pub covariant_params: Vec<String>,
}

impl TypeView {
    pub fn of_decl(decl: &TypeDecl) -> TypeView {
        let custom = match &decl.annotation {
            Some(annotation) => match annotation.custom_name.as_deref() {
                Some(custom) if !custom.is_empty() => custom.to_string(),
                _ => decl.reflection_name(),
            },
            None => decl.reflection_name(),
        };
        let args = match decl.as_expr() {
            TypeExpr::Named { args, .. } => args,
            _ => Vec::new(),
        };
        TypeView {
            namespace: decl.namespace.clone(),
            reflection_name: decl.reflection_name(),
            custom_name: custom,
            is_interface: decl.is_interface(),
            is_api_class: decl.is_api_class(),
            args,
            covariant_params: decl
                .generic_params
                .iter()
                .filter(|param| param.covariant)
                .map(|param| param.name.clone())
                .collect(),
        }
    }

    /// A view over a constructed named expression. Annotation data is pulled
    /// from the catalog when the name resolves to a declaration there.
    pub fn of_named(
        namespace: &str,
        name: &str,
        args: &[TypeExpr],
        catalog: &TypeCatalog,
    ) -> TypeView {
        let expr = TypeExpr::Named {
            namespace: namespace.to_string(),
            name: name.to_string(),
            args: args.to_vec(),
        };
        if let Some(decl) = catalog.decl_for(&expr) {
            let mut view = TypeView::of_decl(decl);
            view.args = args.to_vec();
            return view;
        }

        let reflection_name = expr.reflection_name();
        TypeView {
            namespace: namespace.to_string(),
            custom_name: reflection_name.clone(),
            reflection_name,
            is_interface: false,
            is_api_class: false,
            args: args.to_vec(),
            covariant_params: Vec::new(),
        }
    }

    /// Keeps the type name bare.
    pub fn simplified(self) -> Scope {
        Scope {
            view: self,
            fully_qualified: false,
        }
    }

    /// Prefixes the namespace onto every built name.
    pub fn fully_qualified(self) -> Scope {
        Scope {
            view: self,
            fully_qualified: true,
        }
    }
}

/// First builder stage: the namespace-qualification choice.
#[derive(Debug, Clone)]
pub struct Scope {
    view: TypeView,
    fully_qualified: bool,
}

impl Scope {
    /// The unchanged declared name.
    pub fn original_name(self) -> NameRef {
        let text = self.qualify(self.view.reflection_name.clone());
        NameRef {
            scope: self,
            text,
            is_custom: false,
            interface_flavor: false,
        }
    }

    /// The annotated display name (declared name when none), first letter
    /// uppercased.
    pub fn custom_name(self) -> NameRef {
        let text = self.qualify(class_name(&self.view));
        NameRef {
            scope: self,
            text,
            is_custom: true,
            interface_flavor: false,
        }
    }

    /// The display name with an `I` prefix for generation candidates;
    /// interfaces keep their name untouched.
    pub fn interface_name(self) -> NameRef {
        let base = class_name(&self.view);
        let named = if self.view.is_api_class {
            format!("I{base}")
        } else {
            base
        };
        let text = self.qualify(named);
        NameRef {
            scope: self,
            text,
            is_custom: true,
            interface_flavor: true,
        }
    }

    fn qualify(&self, name: String) -> String {
        if self.fully_qualified && !self.view.namespace.is_empty() {
            format!("{}.{name}", self.view.namespace)
        } else {
            name
        }
    }
}

/// Display names may come from annotations in any casing; member names
/// start uppercase.
fn class_name(view: &TypeView) -> String {
    let name = view.custom_name.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            format!("{}{}", first.to_uppercase(), chars.as_str())
        }
        _ => name.to_string(),
    }
}

/// Second builder stage: a flavored name, still carrying its arity marker.
#[derive(Debug, Clone)]
pub struct NameRef {
    scope: Scope,
    text: String,
    is_custom: bool,
    interface_flavor: bool,
}

impl NameRef {
    /// The flavored name with the arity marker restored. An annotated
    /// display name carries no arity of its own, so it is re-appended here
    /// before any generic restoration.
    pub fn build(&self) -> String {
        if !self.is_custom || self.text.contains('`') {
            return self.text.clone();
        }
        let arity = self.scope.view.args.len();
        if arity > 0 {
            format!("{}`{arity}", self.text)
        } else {
            self.text.clone()
        }
    }

    /// The name with the arity marker stripped (`` IList`1 `` → `IList`).
    pub fn without_generics(&self) -> String {
        trim_generics(&self.build()).to_string()
    }

    pub fn with_generics(self) -> Generics {
        Generics {
            name: self,
            out_keyword: false,
            fully_qualified: None,
        }
    }

    /// Generic arguments rendered fully qualified regardless of the scope.
    pub fn with_generics_fully_qualified(self) -> Generics {
        Generics {
            name: self,
            out_keyword: false,
            fully_qualified: Some(true),
        }
    }

    /// Generic parameters prefixed with the `out` keyword; the flavor used
    /// on interface declaration lines.
    pub fn with_generics_out(self) -> Generics {
        Generics {
            name: self,
            out_keyword: true,
            fully_qualified: None,
        }
    }
}

/// Final builder stage: how generic arguments are restored.
#[derive(Debug, Clone)]
pub struct Generics {
    name: NameRef,
    out_keyword: bool,
    /// Overrides the scope's qualification for the arguments only.
    fully_qualified: Option<bool>,
}

impl Generics {
    /// Restores `<T, V>` using the arguments' own identifiers; constructed
    /// arguments contribute their plain (or qualified) names.
    pub fn named(&self) -> String {
        let base = trim_generics(&self.name.build()).to_string();
        let view = &self.name.scope.view;
        if view.args.is_empty() {
            return base;
        }

        let qualify = self
            .fully_qualified
            .unwrap_or(self.name.scope.fully_qualified);
        let rendered: Vec<String> = view
            .args
            .iter()
            .map(|arg| match arg {
                TypeExpr::Param { name, .. } => self.add_out_keyword(name),
                other => {
                    if qualify {
                        other.full_name()
                    } else {
                        other.reflection_name()
                    }
                }
            })
            .collect();
        format!("{base}<{}>", rendered.join(", "))
    }

    /// Restores `<ResolvedType, …>`: unbound parameters are substituted by
    /// their base types, constructed arguments resolve recursively.
    pub fn typed(
        &self,
        settings: &GenerationSettings,
        ctx: &mut GenerationContext,
    ) -> anyhow::Result<String> {
        let base = trim_generics(&self.name.build()).to_string();
        let view = &self.name.scope.view;
        if view.args.is_empty() {
            return Ok(base);
        }

        let qualify = self
            .fully_qualified
            .unwrap_or(self.name.scope.fully_qualified);
        let arguments =
            resolve::resolve_arguments(&view.args, settings, ctx, Some(qualify))?;
        Ok(format!("{base}<{}>", arguments.join(", ")))
    }

    /// Only interface-flavored names (or source interfaces) may carry the
    /// `out` keyword on their parameters. A source interface keeps its
    /// declared covariance even outside the declaration flavor.
    fn add_out_keyword(&self, argument: &str) -> String {
        let view = &self.name.scope.view;
        if view.is_interface || self.name.interface_flavor {
            if self.out_keyword || view.covariant_params.iter().any(|p| p == argument) {
                return format!("out {argument}");
            }
        }
        argument.to_string()
    }
}

/// Strips the arity marker: `` Cat`25 `` → `Cat`.
pub fn trim_generics(type_name: &str) -> &str {
    match type_name.find('`') {
        Some(position) => &type_name[..position],
        None => type_name,
    }
}

/// Converts a source-style generic name into its definition form:
/// `Cat<T, V>` → `` Cat`2 `` (unbound), or `List<System.String>` →
/// `` List`1[System.String] `` (argument-keeping) for constructed lookups.
pub fn generic_definition_name(class_name: &str, unbound: bool) -> String {
    if class_name.trim().is_empty() {
        return String::new();
    }

    let Some(open) = class_name.find('<') else {
        return class_name.to_string();
    };

    let arity = 1 + class_name.matches(',').count();
    let arguments = class_name[open + 1..].replace('>', "");
    let base = &class_name[..open];

    if unbound {
        format!("{base}`{arity}")
    } else {
        format!("{base}`{arity}[{arguments}]")
    }
}
