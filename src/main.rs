use identity_catalog::{cli, config::Config, observability::init_tracing};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize tracing/logging
    init_tracing(&config.observability);

    tracing::debug!("Configuration loaded: {:?}", config);

    cli::run(&config)?;

    Ok(())
}
