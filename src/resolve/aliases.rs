use crate::model::{well_known, TypeExpr};
use crate::workflow::settings::GenerationSettings;

/// Alias lookup for types that never resolve structurally: the built-in
/// primitives and the legacy untyped list. Exact match only; anything else
/// falls through to the resolver.
pub fn alias_of(expr: &TypeExpr, settings: &GenerationSettings) -> Option<String> {
    match expr {
        TypeExpr::Primitive { name } => Some(name.alias().to_string()),
        TypeExpr::Named {
            namespace,
            name,
            args,
        } if args.is_empty() && well_known::is_legacy_list(namespace, name) => {
            Some(if settings.strategy.fully_qualified_names {
                format!("{namespace}.{name}")
            } else {
                name.clone()
            })
        }
        _ => None,
    }
}
