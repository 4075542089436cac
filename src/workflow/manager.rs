use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::context::{BindingPair, GenerationContext, PendingAppend};
use crate::docs::DocMap;
use crate::emit::{self, InterfaceEmitter};
use crate::error::GenerationError;
use crate::feedback;
use crate::model::{TypeCatalog, TypeDecl};
use crate::names::builder::TypeView;
use crate::names::generic_definition_name;
use crate::project;
use crate::rewrite;

use super::settings::{GenerationSettings, GenerationStrategy, RunConfig};

/// The coordinator's position in a run; transitions are strictly forward
/// per task, with `Failed` reachable from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    LoadingDocs,
    Scanning,
    Filtering,
    Resolving,
    Emitting,
    Registering,
    Appending,
    Finalizing,
    Done,
    Failed,
}

/// What a finished run leaves behind: the overall verdict and the recorded
/// annotation positions for the optional cleanup pass.
#[derive(Debug)]
pub struct RunOutcome {
    pub success: bool,
    pub annotations: Vec<(PathBuf, Vec<usize>)>,
}

/// Orchestrates the whole generation run: per task, load documentation,
/// scan the source directory, emit one interface per candidate, queue the
/// source rewrites, and finalize the registration bindings.
///
/// Everything is sequential on one logical thread; a dependency interface
/// is always fully generated and registered before the body referencing it
/// is finalized.
pub struct GenerationManager {
    config: RunConfig,
}

impl GenerationManager {
    pub fn new(config: RunConfig) -> Self {
        GenerationManager { config }
    }

    pub fn run(&self, catalog: &TypeCatalog) -> anyhow::Result<RunOutcome> {
        let mut state = RunState::Idle;
        let mut success = true;
        let mut ctx = GenerationContext::new(catalog);

        let strategy = Arc::new(GenerationStrategy::from_config(&self.config.strategy)?);

        let result = (|| -> anyhow::Result<()> {
            for task in &self.config.tasks {
                let settings = GenerationSettings::new(task, Arc::clone(&strategy))?;

                transition(&mut state, RunState::LoadingDocs);
                ctx.set_docs(DocMap::load(
                    &settings.source_project_name,
                    &settings.source_project_path,
                ));

                transition(&mut state, RunState::Scanning);
                let source_files = project::list_source_files(&settings.source_catalog_path)?;

                for source_file in &source_files {
                    let decl = resolve_type_for_file(source_file, catalog)?;
                    self.generate_for_type(decl, source_file, &settings, &mut ctx, &mut state)?;
                }

                transition(&mut state, RunState::Appending);
                for pending in ctx.take_pending() {
                    // An unrecognized declaration is a warning; the file
                    // keeps its reference replacements and the run goes on.
                    rewrite::rewrite_source_file(
                        &pending.source_file,
                        &pending.interface_full_name,
                        &pending.source_class_name,
                        &mut ctx,
                    )
                    .with_context(|| format!("failed to rewrite {:?}", pending.source_file))?;
                }

                transition(&mut state, RunState::Finalizing);
                emit::create_register(&settings, &mut ctx)?;

                if ctx.nothing_registered() {
                    let soft = GenerationError::ZeroRegistrations {
                        project: settings.source_project_name.clone(),
                    };
                    feedback::report_warning(&soft.to_string());
                    success = false;
                }
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                transition(&mut state, RunState::Done);
                Ok(RunOutcome {
                    success,
                    annotations: ctx.drain_annotations(),
                })
            }
            Err(error) => {
                transition(&mut state, RunState::Failed);
                Err(error)
            }
        }
    }

    /// The per-type chain: filter, resolve, emit, register. Dependency
    /// candidates are generated transitively from inside the emitter.
    fn generate_for_type(
        &self,
        decl: &TypeDecl,
        source_file: &Path,
        settings: &GenerationSettings,
        ctx: &mut GenerationContext,
        state: &mut RunState,
    ) -> anyhow::Result<()> {
        transition(state, RunState::Filtering);
        transition(state, RunState::Resolving);
        let emitter = InterfaceEmitter::new(decl, settings.clone(), ctx)?;

        // The pair is registered ahead of the body so a self-referencing
        // candidate resolves to its own interface instead of recursing.
        if decl.is_api_class() {
            ctx.try_add_pair(
                &decl.reflection_name(),
                emitter
                    .names()
                    .generation_name(settings.strategy.fully_qualified_names),
            );
        }

        transition(state, RunState::Emitting);
        if emitter.create_interface(ctx)? {
            let names = emitter.names();
            ctx.schedule_append(
                &names.generation_simplified,
                PendingAppend {
                    interface_full_name: names
                        .generation_name(settings.strategy.fully_qualified_names)
                        .to_string(),
                    source_class_name: decl.reflection_name(),
                    source_file: source_file.to_path_buf(),
                },
            );

            transition(state, RunState::Registering);
            if decl.should_be_registered() {
                let class_name = registered_class_name(decl, settings, ctx)?;
                ctx.add_binding(
                    &settings.source_project_name,
                    BindingPair {
                        interface_name: names
                            .registration_name(settings.strategy.fully_qualified_names)
                            .to_string(),
                        class_name,
                    },
                );
            }

            feedback::report_generated(&emitter.names().file_name);
        } else {
            // Normal for plain (unannotated) classes in the scanned folder.
            feedback::report_skipped(&decl.name);
        }
        Ok(())
    }
}

fn transition(state: &mut RunState, next: RunState) {
    tracing::debug!(from = ?state, to = ?next, "run state");
    *state = next;
}

/// The concrete class name for a registration binding, generic arguments
/// substituted by their declared base types so the pair is always written
/// in constructible form.
fn registered_class_name(
    decl: &TypeDecl,
    settings: &GenerationSettings,
    ctx: &mut GenerationContext,
) -> anyhow::Result<String> {
    let view = TypeView::of_decl(decl);
    let scope = if settings.strategy.fully_qualified_names {
        view.fully_qualified()
    } else {
        view.simplified()
    };
    scope.original_name().with_generics().typed(settings, ctx)
}

/// Matches a source file to its declaration in the catalog. The primary key
/// is the declared namespace plus the file name; when that misses (file
/// name and type name diverge, or the type carries generic parameters) the
/// name is re-derived from the declaration line inside the file.
fn resolve_type_for_file<'a>(
    path: &Path,
    catalog: &'a TypeCatalog,
) -> anyhow::Result<&'a TypeDecl> {
    let namespace = project::namespace_from_file(path).ok_or_else(|| GenerationError::TypeResolution {
        file: path.to_path_buf(),
        details: "no namespace declaration found".to_string(),
    })?;

    if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
        if let Some(decl) = catalog.get(&format!("{namespace}.{stem}")) {
            return Ok(decl);
        }
    }

    // Fallback: derive the name from the declaration line; covers generic
    // types and files whose name diverges from the type name.
    if let Some(declared) = project::class_name_from_file(path) {
        let definition = generic_definition_name(&declared, true);
        if let Some(decl) = catalog.get(&format!("{namespace}.{definition}")) {
            return Ok(decl);
        }
    }

    Err(GenerationError::TypeResolution {
        file: path.to_path_buf(),
        details: format!("no type in namespace \"{namespace}\" matches the file or declaration name"),
    }
    .into())
}
