//! # ifacegen
//!
//! **ifacegen** is a source-to-source generator: given annotated classes in
//! an object-oriented codebase, it synthesizes one capability interface per
//! annotated class (only the annotated members) and rewires the original
//! sources to implement that interface and to reference it in place of the
//! concrete class.
//!
//! ## Overview
//!
//! The tool is driven by three inputs: a **type model** (a JSON symbol
//! table describing every declared type, built ahead of the run), a **run
//! configuration** (TOML: generation tasks plus the naming strategy), and
//! the **source tree** itself, which is rewritten in place.
//!
//! ## Architecture
//!
//! - **[`model`]** - type expressions, declared-type records, and the catalog
//! - **[`names`]** - the staged name builder and the per-interface name set
//! - **[`resolve`]** - recursive type-expression → source-text resolution
//! - **[`emit`]** - documentation formatting, interface emission, and the
//!   templated registration-bindings file
//! - **[`rewrite`]** - line-oriented source rewriting and annotation cleanup
//! - **[`workflow`]** - run configuration and the per-task coordinator
//! - **[`docs`]** - documentation-file loading for generated summaries
//! - **[`project`]** - project-descriptor metadata and source discovery
//!
//! ## Generation flow
//!
//! ```text
//! type model ─┐
//! run config ─┼─▶ scan sources ─▶ filter members ─▶ resolve names
//! source tree ┘                                        │
//!        rewritten sources ◀─ rewrite pass ◀─ emit interfaces
//!                                                      │
//!                            registration bindings ◀───┘
//! ```
//!
//! Dependencies of a candidate that are themselves candidates are generated
//! transitively into a nested folder, exactly once per run; cross-references
//! are answered from the pair registry so no interface body ever needs a
//! forward reference.
//!
//! ## CLI
//!
//! ```bash
//! ifacegen generate --config generation.toml
//! ```
//!
//! A successful run offers an interactive (or `--clean`) pass that strips
//! the marker annotations from the processed sources.

pub mod cli;
pub mod context;
pub mod docs;
pub mod emit;
pub mod error;
pub mod feedback;
pub mod files;
pub mod model;
pub mod names;
pub mod project;
pub mod resolve;
pub mod rewrite;
pub mod workflow;

pub use context::{BindingPair, GenerationContext, PendingAppend};
pub use error::GenerationError;
pub use model::{Primitive, TypeCatalog, TypeDecl, TypeExpr};
pub use names::InterfaceNames;
pub use workflow::{GenerationManager, GenerationSettings, RunConfig, RunOutcome};
