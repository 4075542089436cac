use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let success = ifacegen::cli::run_cli()?;
    if !success {
        std::process::exit(1);
    }
    Ok(())
}
