mod config;
mod error;
mod export;
mod import;
mod logging;
mod models;
mod pipeline;
mod reconcile;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let settings = config::Settings::from_env();

    let logging = match args.len() {
        1 => logging::init_tui(settings.log_filter.as_deref(), settings.log_file.as_deref()),
        _ => logging::init_cli(settings.log_filter.as_deref()),
    };
    if let Err(e) = logging {
        eprintln!("Warning: {e:#}");
    }
    for warning in &settings.warnings {
        tracing::warn!("{warning}");
    }

    match args.len() {
        1 => run::as_tui(settings),
        _ => run::as_cli(&args, &settings),
    }
}
