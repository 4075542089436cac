use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::feedback;
use crate::model::TypeCatalog;
use crate::rewrite;
use crate::workflow::{GenerationManager, RunConfig};

/// Command-line interface for the interface generator.
#[derive(Parser)]
#[command(name = "ifacegen")]
#[command(about = "Generates capability interfaces from annotated classes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the configured generation tasks
    Generate {
        /// Path to the run configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// Path to the type model document; overrides the configured one
        #[arg(long)]
        model: Option<PathBuf>,

        /// Force fully qualified (true) or simplified (false) names,
        /// overriding the configured strategy
        #[arg(long)]
        fully_qualified: Option<bool>,

        /// Run the annotation cleanup without prompting
        #[arg(long, default_value_t = false)]
        clean: bool,

        /// Skip the annotation cleanup prompt and keep the annotations
        #[arg(long, default_value_t = false)]
        keep_annotations: bool,
    },
}

/// Executes the CLI command. Returns the overall run verdict; the caller
/// maps it onto the process exit code.
pub fn run_cli() -> anyhow::Result<bool> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            config,
            model,
            fully_qualified,
            clean,
            keep_annotations,
        } => {
            let mut run_config = RunConfig::load(config)?;
            if let Some(switch) = fully_qualified {
                run_config.strategy.fully_qualified_names = *switch;
            }
            let model_path = model.as_ref().unwrap_or(&run_config.model).clone();
            let catalog = TypeCatalog::load(&model_path)?;

            let manager = GenerationManager::new(run_config);
            let outcome = match manager.run(&catalog) {
                Ok(outcome) => outcome,
                Err(error) => {
                    feedback::report_warning(&format!("{error:#}"));
                    feedback::print_result(false);
                    return Ok(false);
                }
            };

            if !outcome.annotations.is_empty() && !keep_annotations {
                let confirmed = *clean || feedback::confirm_cleanup();
                if confirmed {
                    rewrite::final_cleanup(&outcome.annotations)?;
                    println!("marker annotations were removed");
                }
            }

            feedback::print_result(outcome.success);
            Ok(outcome.success)
        }
    }
}
