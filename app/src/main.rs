use clap::Parser;
use daylight::cli::{self, Cli};
use daylight::{bootstrap, config, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = match config::init_config(cli.config.as_deref()).config() {
        Ok(app_config) => app_config,
        Err(e) => {
            eprintln!("{e}");
            anyhow::bail!("Invalid configuration");
        }
    };

    if let Err(e) = logger::setup_logger(app_config.logging()) {
        eprintln!("Warning: Failed to initialize logger: {e}");
    }

    let controller = bootstrap::start(app_config);
    cli::run(cli.command, &controller).await
}
