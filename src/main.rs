use std::env;
use std::process::ExitCode;

use anyhow::Context;
use minipac::app::App;
use minipac::config::Config;
use minipac::constants::LOOP_TIME;
use minipac::platform;
use tracing::{error, info};

/// The main entry point of the application.
///
/// Loads the configuration, installs logging, then runs frames until the app asks to stop.
/// Buffered log lines are printed once the terminal has been restored.
fn main() -> ExitCode {
    let config = match Config::load(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Usage: minipac [--grid | --pixel | --variant <grid|pixel>] [--skip-gate] [--mute] [--seed <n>] [--log-file <path>]");
            return ExitCode::from(2);
        }
    };

    let logs = match platform::init_logging(config.log_file.as_deref()) {
        Ok(logs) => logs,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(config);
    logs.release();

    match result {
        Ok(Some(score)) => {
            println!("Final score: {score}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> anyhow::Result<Option<u32>> {
    let mut app = App::new(config).context("Could not create app")?;
    info!(loop_time = ?LOOP_TIME, "Starting game loop");

    loop {
        match app.run() {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!("Game loop failed: {}", e);
                return Err(e).context("Game loop failed");
            }
        }
    }

    let score = app.final_score();
    info!(score = ?score, "Exiting");
    Ok(score)
}
