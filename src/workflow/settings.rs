use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;

use crate::error::{required, GenerationError};
use crate::project;

/// The on-disk run configuration: the type model location, one shared
/// naming strategy, and one `[[task]]` block per source→target pairing.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Path to the type model JSON document.
    pub model: PathBuf,
    pub strategy: StrategyConfig,
    #[serde(rename = "task", default)]
    pub tasks: Vec<TaskConfig>,
}

impl RunConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read run configuration {path:?}"))?;
        let config: RunConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse run configuration {path:?}"))?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub file_stamp: String,
    #[serde(default = "StrategyConfig::default_fully_qualified")]
    pub fully_qualified_names: bool,
    #[serde(default = "StrategyConfig::default_nested_folder")]
    pub nested_folder: String,
    pub registration: RegistrationConfig,
}

impl StrategyConfig {
    fn default_fully_qualified() -> bool {
        true
    }

    fn default_nested_folder() -> String {
        "Common".to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    pub file_name: String,
    #[serde(default)]
    pub subfolders: Vec<String>,
    pub di_import: String,
    pub di_service: String,
    pub di_method: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    pub source_project: String,
    pub source_path: PathBuf,
    #[serde(default)]
    pub source_subfolders: Vec<String>,
    pub target_project: String,
    pub target_path: PathBuf,
    #[serde(default)]
    pub target_subfolders: Vec<String>,
}

/// The immutable strategy shared by every task of a run: header texts, the
/// fully-qualified switch, the nested-folder name, and the registration
/// vocabulary. Never mutated by the pipeline.
#[derive(Debug, Clone)]
pub struct GenerationStrategy {
    pub copyright: String,
    pub file_stamp: String,
    pub fully_qualified_names: bool,
    pub nested_folder: String,
    pub registration: RegistrationSettings,
}

#[derive(Debug, Clone)]
pub struct RegistrationSettings {
    pub file_name: String,
    pub subfolders: Vec<String>,
    pub di_import: String,
    pub di_service: String,
    pub di_method: String,
}

impl GenerationStrategy {
    pub fn from_config(config: &StrategyConfig) -> Result<Self, GenerationError> {
        let registration = &config.registration;
        Ok(GenerationStrategy {
            copyright: config.copyright.clone(),
            file_stamp: config.file_stamp.clone(),
            fully_qualified_names: config.fully_qualified_names,
            nested_folder: required(&config.nested_folder, "strategy.nested_folder")?.to_string(),
            registration: RegistrationSettings {
                file_name: required(&registration.file_name, "registration.file_name")?.to_string(),
                subfolders: registration.subfolders.clone(),
                di_import: required(&registration.di_import, "registration.di_import")?.to_string(),
                di_service: required(&registration.di_service, "registration.di_service")?
                    .to_string(),
                di_method: required(&registration.di_method, "registration.di_method")?.to_string(),
            },
        })
    }
}

/// Everything one generation task needs to know: where the sources live,
/// where the interfaces land, and under which namespace.
///
/// `target_catalog_path`/`target_namespace` change exactly once, when the
/// task is derived for a nested dependency; deriving an already-nested task
/// is a no-op.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub source_project_name: String,
    pub source_project_path: PathBuf,
    pub source_catalog_path: PathBuf,
    pub target_catalog_path: PathBuf,
    pub target_namespace: String,
    pub strategy: Arc<GenerationStrategy>,
}

impl GenerationSettings {
    pub fn new(
        task: &TaskConfig,
        strategy: Arc<GenerationStrategy>,
    ) -> Result<Self, GenerationError> {
        let source_project_name =
            required(&task.source_project, "task.source_project")?.to_string();
        let source_project_path = non_empty_path(&task.source_path, "task.source_path")?;
        let source_catalog_path =
            project::with_path_subfolders(&source_project_path, &task.source_subfolders);

        let target_project_name =
            required(&task.target_project, "task.target_project")?.to_string();
        let target_project_path = non_empty_path(&task.target_path, "task.target_path")?;
        let target_catalog_path =
            project::with_path_subfolders(&target_project_path, &task.target_subfolders);
        let target_namespace = project::with_namespace_subfolders(
            &project::root_namespace(&target_project_path, &target_project_name),
            &task.target_subfolders,
        );

        Ok(GenerationSettings {
            source_project_name,
            source_project_path,
            source_catalog_path,
            target_catalog_path,
            target_namespace,
            strategy,
        })
    }

    /// Derives the settings for a dependency discovered while generating a
    /// root candidate: interfaces for such types land in the configured
    /// nested subfolder. Applying this to an already-nested task returns it
    /// unchanged.
    pub fn for_nested_folder(&self) -> Self {
        let nested = &self.strategy.nested_folder;
        if self
            .target_catalog_path
            .to_string_lossy()
            .contains(nested.as_str())
        {
            return self.clone();
        }

        let mut derived = self.clone();
        derived.target_catalog_path = self.target_catalog_path.join(nested);
        derived.target_namespace = format!("{}.{nested}", self.target_namespace);
        derived
    }
}

fn non_empty_path(path: &Path, name: &str) -> Result<PathBuf, GenerationError> {
    let text = path.to_string_lossy();
    required(&text, name)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_task() -> TaskConfig {
        TaskConfig {
            source_project: "Demo.Logic".into(),
            source_path: PathBuf::from("demo/logic"),
            source_subfolders: vec!["Services".into()],
            target_project: "Demo.Api".into(),
            target_path: PathBuf::from("demo/api"),
            target_subfolders: vec!["Contracts".into()],
        }
    }

    fn test_strategy() -> Arc<GenerationStrategy> {
        Arc::new(GenerationStrategy {
            copyright: String::new(),
            file_stamp: String::new(),
            fully_qualified_names: true,
            nested_folder: "Common".into(),
            registration: RegistrationSettings {
                file_name: "ApiRegistrations".into(),
                subfolders: vec![],
                di_import: "Demo.Injection".into(),
                di_service: "IServiceCollection".into(),
                di_method: "AddTransient".into(),
            },
        })
    }

    #[test]
    fn settings_compose_paths_and_namespace() {
        let settings = GenerationSettings::new(&test_task(), test_strategy()).unwrap();
        assert_eq!(
            settings.source_catalog_path,
            PathBuf::from("demo/logic/Services")
        );
        assert_eq!(
            settings.target_catalog_path,
            PathBuf::from("demo/api/Contracts")
        );
        // No project descriptor on disk: root namespace falls back to the
        // project name.
        assert_eq!(settings.target_namespace, "Demo.Api.Contracts");
    }

    #[test]
    fn blank_source_project_fails_fast() {
        let mut task = test_task();
        task.source_project = "  ".into();
        let error = GenerationSettings::new(&task, test_strategy()).unwrap_err();
        assert!(matches!(error, GenerationError::MissingSetting { .. }));
    }

    #[test]
    fn nesting_is_idempotent() {
        let settings = GenerationSettings::new(&test_task(), test_strategy()).unwrap();
        let nested = settings.for_nested_folder();
        assert_eq!(
            nested.target_catalog_path,
            PathBuf::from("demo/api/Contracts/Common")
        );
        assert_eq!(nested.target_namespace, "Demo.Api.Contracts.Common");

        let twice = nested.for_nested_folder();
        assert_eq!(twice.target_catalog_path, nested.target_catalog_path);
        assert_eq!(twice.target_namespace, nested.target_namespace);
    }
}
