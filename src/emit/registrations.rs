use askama::Template;

use crate::context::{BindingPair, GenerationContext};
use crate::files;
use crate::project;
use crate::workflow::settings::GenerationSettings;

#[derive(Template)]
#[template(path = "registrations.cs.txt", escape = "none")]
struct RegistrationsTemplate<'a> {
    namespace: String,
    file_name: &'a str,
    di_import: &'a str,
    di_service: &'a str,
    di_method: &'a str,
    bindings: &'a [BindingPair],
}

/// Writes the dependency-registration file for a task's source project,
/// when the task accumulated any bindings. Pure templating; the interesting
/// work happened when the binding names were resolved.
pub fn create_register(
    settings: &GenerationSettings,
    ctx: &mut GenerationContext,
) -> anyhow::Result<()> {
    let Some(bindings) = ctx.bindings_for(&settings.source_project_name) else {
        return Ok(());
    };
    let bindings = bindings.to_vec();

    let registration = &settings.strategy.registration;
    let target_dir = project::with_path_subfolders(
        &settings.source_project_path,
        &registration.subfolders,
    );
    let namespace = project::with_namespace_subfolders(
        &project::root_namespace(&settings.source_project_path, &settings.source_project_name),
        &registration.subfolders,
    );

    let template = RegistrationsTemplate {
        namespace,
        file_name: &registration.file_name,
        di_import: &registration.di_import,
        di_service: &registration.di_service,
        di_method: &registration.di_method,
        bindings: &bindings,
    };
    let content = format!("{}{}", settings.strategy.copyright, template.render()?);
    files::save_source_file(&target_dir, &registration.file_name, &content)?;

    ctx.count_registrations(bindings.len());
    Ok(())
}
