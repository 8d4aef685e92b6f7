// src/main.rs
use clap::Parser;
use solutio_catalogue::cli::CliArgs;
use solutio_catalogue::core::config::Config;
use solutio_catalogue::output::{display, logging};
use solutio_catalogue::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // The log level lives in the config, so the config loads first and its
    // messages are replayed once the logger is up.
    let config = match &args.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::load().await?,
    };

    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("Logger initialization failed: {}", e);
    }
    log::info!(
        "{} v{} starting",
        solutio_catalogue::core::constants::APP_TITLE,
        solutio_catalogue::core::constants::VERSION
    );
    config.log_startup();

    let state = solutio_catalogue::run_with_config(config, args).await?;
    print!("{}", display::render_state(&state));

    if state.error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}
