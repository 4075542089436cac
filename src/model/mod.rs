//! The host-type model: type expressions, declared-type records, and the
//! catalog (symbol table) the rest of the pipeline reads from.
//!
//! The model is loaded once per run from a JSON document and is read-only
//! afterwards. It stands in for runtime type introspection: everything the
//! resolver or emitter needs to know about a type (names, generic arguments,
//! annotations, members) is answered from here.

mod catalog;
mod decl;
mod filter;
#[cfg(test)]
mod tests;
mod types;

pub use catalog::{well_known, TypeCatalog};
pub use decl::{
    ClassAnnotation, GenericParam, MethodDecl, ParamDecl, PropertyDecl, TypeDecl, TypeKind,
};
pub use filter::MemberFilter;
pub use types::{Primitive, TypeExpr};
