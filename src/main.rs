mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();
    let loaded = Config::load();
    let cli = cli.with_config(&loaded.config);

    utils::init_logging(cli.debug, cli.quiet, cli.use_log_color());
    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }
    if let Some(path) = loaded.source() {
        tracing::debug!("Loaded config from {}", path.display());
    }

    if let Err(e) = app::run(&cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
