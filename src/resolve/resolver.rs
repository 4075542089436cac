use crate::context::GenerationContext;
use crate::model::{well_known, Primitive, TypeExpr};
use crate::names::builder::TypeView;
use crate::resolve::aliases;
use crate::workflow::settings::GenerationSettings;

/// Resolves a type expression into the source text that references it,
/// using the strategy's qualification setting.
pub fn resolve(
    expr: &TypeExpr,
    settings: &GenerationSettings,
    ctx: &mut GenerationContext,
) -> anyhow::Result<String> {
    resolve_with(expr, settings, ctx, None)
}

/// Resolution with an explicit qualification override. First match wins:
/// alias, nullable, array, container, generic class, tuple family, then the
/// generation-lookup fallback.
pub fn resolve_with(
    expr: &TypeExpr,
    settings: &GenerationSettings,
    ctx: &mut GenerationContext,
    full_override: Option<bool>,
) -> anyhow::Result<String> {
    if let Some(alias) = aliases::alias_of(expr, settings) {
        return Ok(alias);
    }

    let use_full = full_override.unwrap_or(settings.strategy.fully_qualified_names);

    match expr {
        TypeExpr::Primitive { name } => Ok(name.alias().to_string()),

        TypeExpr::Nullable { inner } => {
            let resolved = resolve_with(inner, settings, ctx, full_override)?;
            Ok(format!("{resolved}?"))
        }

        TypeExpr::Array { element, rank } => {
            let element = resolve_with(element, settings, ctx, None)?;
            Ok(format!("{element}[{}]", ",".repeat(rank.saturating_sub(1))))
        }

        TypeExpr::Tuple { items } => resolve_tuple(items, settings, ctx, full_override),

        TypeExpr::Param { name, .. } => Ok(name.clone()),

        TypeExpr::Named {
            namespace,
            name,
            args,
        } => {
            // Containers and the two-slot pair resolve under their own name
            // with typed arguments.
            if well_known::is_enumerable(namespace, name)
                || well_known::is_key_value_pair(namespace, name)
            {
                let scope = scoped(namespace, name, args, ctx, use_full);
                return scope.original_name().with_generics().typed(settings, ctx);
            }

            // A value tuple modeled as a named construction renders in its
            // round-bracket form.
            if namespace == "System" && name.starts_with("ValueTuple") {
                return resolve_tuple(args, settings, ctx, full_override);
            }

            // Generic classes (the legacy reference tuple included) keep
            // their possibly-customized name over typed arguments.
            if !args.is_empty() && !is_declared_interface(namespace, name, args, ctx) {
                let scope = scoped(namespace, name, args, ctx, use_full);
                return scope.custom_name().with_generics().typed(settings, ctx);
            }

            if well_known::is_reference_tuple(namespace, name) {
                let scope = scoped(namespace, name, args, ctx, use_full);
                return scope.original_name().with_generics().typed(settings, ctx);
            }

            // Everything else defers to the generation lookup: candidates
            // become (or reuse) their interface, the rest keep their name.
            crate::emit::interface::nested_class_name(expr, settings, ctx, full_override)
        }
    }
}

/// Resolves a list of generic arguments. Shared by container, tuple, and
/// registration-name resolution; value tuples beyond seven slots recurse
/// into the synthetic remainder tuple and splice its arguments flat.
pub fn resolve_arguments(
    args: &[TypeExpr],
    settings: &GenerationSettings,
    ctx: &mut GenerationContext,
    full_override: Option<bool>,
) -> anyhow::Result<Vec<String>> {
    let mut resolved = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            TypeExpr::Tuple { items } if args.len() > 7 => {
                resolved.extend(resolve_arguments(items, settings, ctx, full_override)?);
            }
            TypeExpr::Param { base, .. } => {
                let object = TypeExpr::primitive(Primitive::Object);
                let base_expr = base.as_deref().unwrap_or(&object);
                let rendered = match aliases::alias_of(base_expr, settings) {
                    Some(alias) => alias,
                    None => {
                        if full_override.unwrap_or(settings.strategy.fully_qualified_names) {
                            base_expr.full_name()
                        } else {
                            base_expr.reflection_name()
                        }
                    }
                };
                resolved.push(rendered);
            }
            other => resolved.push(resolve_with(other, settings, ctx, full_override)?),
        }
    }
    Ok(resolved)
}

fn resolve_tuple(
    items: &[TypeExpr],
    settings: &GenerationSettings,
    ctx: &mut GenerationContext,
    full_override: Option<bool>,
) -> anyhow::Result<String> {
    let arguments = resolve_arguments(items, settings, ctx, full_override)?;
    Ok(format!("({})", arguments.join(", ")))
}

fn scoped(
    namespace: &str,
    name: &str,
    args: &[TypeExpr],
    ctx: &GenerationContext,
    use_full: bool,
) -> crate::names::builder::Scope {
    let view = TypeView::of_named(namespace, name, args, ctx.catalog());
    if use_full {
        view.fully_qualified()
    } else {
        view.simplified()
    }
}

/// Constructed generics over a declared interface are not classes; they
/// skip the customized-name branch and fall through to the plain name.
fn is_declared_interface(
    namespace: &str,
    name: &str,
    args: &[TypeExpr],
    ctx: &GenerationContext,
) -> bool {
    let expr = TypeExpr::Named {
        namespace: namespace.to_string(),
        name: name.to_string(),
        args: args.to_vec(),
    };
    ctx.catalog()
        .decl_for(&expr)
        .map(|decl| decl.is_interface())
        .unwrap_or(false)
}

/// Maps a documentation-style type reference back through the alias table:
/// `System.Int32` → `int`, `System.Nullable{System.Boolean}` → `bool?`,
/// arrays keep their bracket suffix. Unknown names pass through unchanged.
pub fn alias_from_doc_name(name: &str, settings: &GenerationSettings) -> String {
    let trimmed = name.trim();

    if let Some(primitive) = Primitive::from_framework_name(trimmed) {
        return primitive.alias().to_string();
    }

    if trimmed == "System.Collections.ArrayList" {
        return if settings.strategy.fully_qualified_names {
            trimmed.to_string()
        } else {
            "ArrayList".to_string()
        };
    }

    if let Some(inner) = trimmed
        .strip_prefix("System.Nullable{")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        let alias = alias_from_doc_name(inner, settings);
        return format!("{alias}?");
    }

    if let Some(open) = trimmed.find('[') {
        if trimmed.ends_with(']') {
            let element = alias_from_doc_name(&trimmed[..open], settings);
            return format!("{element}{}", &trimmed[open..]);
        }
    }

    trimmed.to_string()
}
