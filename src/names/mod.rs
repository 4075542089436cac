//! Name construction for generated interfaces.
//!
//! Names are composed from three independent choices: qualification
//! (simplified vs. fully qualified), flavor (original vs. custom vs.
//! interface-prefixed), and generic restoration (stripped, named, or typed)
//! expressed as a staged builder over a [`builder::TypeView`].

pub mod builder;

pub use builder::{generic_definition_name, trim_generics, TypeView};

use crate::context::GenerationContext;
use crate::model::TypeDecl;
use crate::workflow::settings::GenerationSettings;

/// The six name variants one generated interface needs, computed once when
/// its generation task is constructed and invariant afterwards.
#[derive(Debug, Clone)]
pub struct InterfaceNames {
    /// File name on disk, no generics (`IRenamedSpike`).
    pub file_name: String,
    /// Declaration-line name with `out`-prefixed parameters
    /// (`IRenamedSpike<out T>`).
    pub declaration: String,
    /// Reference name with named generics (`IRenamedSpike<T>`).
    pub generation_simplified: String,
    /// Reference name under the target namespace.
    pub generation_fully_qualified: String,
    /// Registration name with typed generics (`IRenamedSpike<Item>`).
    pub registration_simplified: String,
    /// Registration name under the target namespace, arguments qualified.
    pub registration_fully_qualified: String,
}

impl InterfaceNames {
    pub fn build(
        decl: &TypeDecl,
        settings: &GenerationSettings,
        ctx: &mut GenerationContext,
    ) -> anyhow::Result<Self> {
        let interface = || TypeView::of_decl(decl).simplified().interface_name();

        let generation_simplified = interface().with_generics().named();
        Ok(InterfaceNames {
            file_name: interface().without_generics(),
            declaration: interface().with_generics_out().named(),
            generation_fully_qualified: format!(
                "{}.{generation_simplified}",
                settings.target_namespace
            ),
            generation_simplified,
            registration_simplified: interface().with_generics().typed(settings, ctx)?,
            registration_fully_qualified: format!(
                "{}.{}",
                settings.target_namespace,
                interface()
                    .with_generics_fully_qualified()
                    .typed(settings, ctx)?
            ),
        })
    }

    /// The name reference rewrites use for this interface, per strategy.
    pub fn generation_name(&self, fully_qualified: bool) -> &str {
        if fully_qualified {
            &self.generation_fully_qualified
        } else {
            &self.generation_simplified
        }
    }

    /// The name the registration bindings use, per strategy.
    pub fn registration_name(&self, fully_qualified: bool) -> &str {
        if fully_qualified {
            &self.registration_fully_qualified
        } else {
            &self.registration_simplified
        }
    }
}
