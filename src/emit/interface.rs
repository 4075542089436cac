use crate::context::GenerationContext;
use crate::files;
use crate::model::{MemberFilter, MethodDecl, PropertyDecl, TypeDecl, TypeExpr};
use crate::names::InterfaceNames;
use crate::resolve;
use crate::workflow::settings::GenerationSettings;

use super::summary::{self, tabs, SummaryTarget};

/// Emits one interface source file for a generation candidate.
pub struct InterfaceEmitter<'d> {
    decl: &'d TypeDecl,
    settings: GenerationSettings,
    names: InterfaceNames,
}

impl<'d> InterfaceEmitter<'d> {
    pub fn new(
        decl: &'d TypeDecl,
        settings: GenerationSettings,
        ctx: &mut GenerationContext,
    ) -> anyhow::Result<Self> {
        let names = InterfaceNames::build(decl, &settings, ctx)?;
        Ok(InterfaceEmitter {
            decl,
            settings,
            names,
        })
    }

    pub fn decl(&self) -> &'d TypeDecl {
        self.decl
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn names(&self) -> &InterfaceNames {
        &self.names
    }

    /// Writes the interface file, headers and stamp included. Returns
    /// `false` without writing when the type is not a candidate, or when an
    /// interface with the same file name is already scheduled this run.
    pub fn create_interface(&self, ctx: &mut GenerationContext) -> anyhow::Result<bool> {
        if !self.decl.is_api_class() {
            return Ok(false);
        }
        if ctx.is_interface_scheduled(&self.names.file_name) {
            tracing::warn!(
                name = %self.names.file_name,
                "duplicate interface name, skipping generation"
            );
            return Ok(false);
        }

        let content = format!(
            "{}{}{}",
            self.settings.strategy.copyright,
            self.settings.strategy.file_stamp,
            self.interface_text(ctx)?
        );
        files::save_source_file(
            &self.settings.target_catalog_path,
            &self.names.file_name,
            &content,
        )?;
        Ok(true)
    }

    fn interface_text(&self, ctx: &mut GenerationContext) -> anyhow::Result<String> {
        let filter = MemberFilter::new(self.decl);
        let properties = filter.api_properties();
        let methods = filter.api_methods();

        let raw_docs = ctx.docs().type_docs(self.decl);
        let type_summary = summary::format_summary(
            &SummaryTarget::Type(self.decl),
            &raw_docs,
            1,
            &self.settings,
        );
        let dependencies = self.interface_dependencies(ctx)?;
        let properties_block = self.properties_block(&properties, ctx)?;
        let methods_block = self.methods_block(&methods, ctx)?;
        // An interface without members still closes on its own line.
        let final_newline = if properties_block.is_empty() && methods_block.is_empty() {
            "\n"
        } else {
            ""
        };

        let t1 = tabs(1);
        Ok(format!(
            "namespace {}\n{{\n{type_summary}{t1}public interface {}{dependencies}\n{t1}{{{properties_block}{methods_block}{final_newline}{t1}}}\n}}",
            self.settings.target_namespace, self.names.declaration,
        ))
    }

    /// Inheritance list from the annotation's declared dependencies; a
    /// dependency that is itself a candidate contributes its interface name.
    fn interface_dependencies(&self, ctx: &mut GenerationContext) -> anyhow::Result<String> {
        let mut rendered = Vec::new();
        for dependency in self.decl.derived_from() {
            rendered.push(self.type_alias_or_name(dependency, ctx)?);
        }
        Ok(if rendered.is_empty() {
            String::new()
        } else {
            format!(" : {}", rendered.join(", "))
        })
    }

    fn properties_block(
        &self,
        properties: &[&PropertyDecl],
        ctx: &mut GenerationContext,
    ) -> anyhow::Result<String> {
        let mut block = String::new();
        for property in properties {
            let raw_docs = ctx.docs().property_docs(self.decl, property);
            let member_summary = summary::format_summary(
                &SummaryTarget::Property(property),
                &raw_docs,
                2,
                &self.settings,
            );
            let ty = self.type_alias_or_name(&property.ty, ctx)?;
            block.push_str(&format!(
                "\n{member_summary}{}public {ty} {} {}\n",
                tabs(2),
                property.name,
                accessors(property),
            ));
        }
        Ok(block)
    }

    fn methods_block(
        &self,
        methods: &[&MethodDecl],
        ctx: &mut GenerationContext,
    ) -> anyhow::Result<String> {
        let mut block = String::new();
        for method in methods {
            let raw_docs = ctx.docs().method_docs(self.decl, method);
            let member_summary = summary::format_summary(
                &SummaryTarget::Method(&method.name),
                &raw_docs,
                2,
                &self.settings,
            );
            let returns = self.type_alias_or_name(&method.returns, ctx)?;
            let parameters = self.parameters(method, ctx)?;
            block.push_str(&format!(
                "\n{member_summary}{}public {returns} {}({parameters});\n",
                tabs(2),
                method.name,
            ));
        }
        Ok(block)
    }

    fn parameters(
        &self,
        method: &MethodDecl,
        ctx: &mut GenerationContext,
    ) -> anyhow::Result<String> {
        let mut rendered = Vec::with_capacity(method.parameters.len());
        for parameter in &method.parameters {
            let ty = self.type_alias_or_name(&parameter.ty, ctx)?;
            rendered.push(format!("{ty} {}", parameter.name));
        }
        Ok(rendered.join(", "))
    }

    fn type_alias_or_name(
        &self,
        expr: &TypeExpr,
        ctx: &mut GenerationContext,
    ) -> anyhow::Result<String> {
        resolve::resolve(expr, &self.settings, ctx)
    }
}

fn accessors(property: &PropertyDecl) -> String {
    let getter = if property.has_getter { "get; " } else { "" };
    let setter = if property.has_setter { "set; " } else { "" };
    format!("{{ {getter}{setter}}}")
}

/// The generation-lookup path for a referenced type: a candidate ensures
/// (generates or reuses) its interface and contributes that name; anything
/// else keeps its plain or qualified name.
///
/// Interfaces for dependency-discovered candidates land under the nested
/// folder of the current task, and their class→interface pair is registered
/// before the body is emitted so cyclic references terminate.
pub fn nested_class_name<'a>(
    expr: &TypeExpr,
    settings: &GenerationSettings,
    ctx: &mut GenerationContext<'a>,
    full_override: Option<bool>,
) -> anyhow::Result<String> {
    let use_full = full_override.unwrap_or(settings.strategy.fully_qualified_names);

    if let Some(decl) = ctx.catalog().decl_for(expr) {
        if decl.is_api_class() {
            if let Some(existing) = ctx.generated_interface(&decl.reflection_name()) {
                return Ok(existing.to_string());
            }

            let emitter = InterfaceEmitter::new(decl, settings.for_nested_folder(), ctx)?;
            ctx.try_add_pair(
                &decl.reflection_name(),
                emitter
                    .names()
                    .generation_name(settings.strategy.fully_qualified_names),
            );
            if emitter.create_interface(ctx)? {
                return Ok(emitter.names().generation_name(use_full).to_string());
            }
        }
    }

    Ok(if use_full {
        expr.full_name()
    } else {
        expr.reflection_name()
    })
}
