use std::fmt;
use std::path::PathBuf;

/// Failure categories of a generation run.
///
/// Configuration and type-resolution problems are fatal; everything softer
/// (missing documentation, duplicate names, unrecognized declarations) is
/// reported and the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A required setting is blank or absent; fatal at task construction.
    MissingSetting {
        /// The configuration key that was blank.
        name: String,
    },
    /// A source file's declared type could not be matched against the type
    /// model, even after re-deriving the name from the declaration line.
    TypeResolution {
        /// The source file whose type failed to resolve.
        file: PathBuf,
        /// What was tried and why it failed.
        details: String,
    },
    /// A whole task produced no registration bindings; likely a
    /// misconfiguration. Soft: marks the run unsuccessful without aborting.
    ZeroRegistrations {
        /// The source project of the task.
        project: String,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MissingSetting { name } => {
                write!(f, "the value of \"{name}\" is missing")
            }
            GenerationError::TypeResolution { file, details } => {
                write!(
                    f,
                    "cannot recognize the type declared in {file:?}: {details}"
                )
            }
            GenerationError::ZeroRegistrations { project } => {
                write!(
                    f,
                    "nothing was registered for project \"{project}\"; check the class annotation settings if that was not intended"
                )
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Guards a required configuration string; blank values fail fast.
pub fn required<'a>(value: &'a str, name: &str) -> Result<&'a str, GenerationError> {
    if value.trim().is_empty() {
        Err(GenerationError::MissingSetting {
            name: name.to_string(),
        })
    } else {
        Ok(value)
    }
}
