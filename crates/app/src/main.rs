use std::process::ExitCode;

use clap::Parser;
use engine::{Engine, FileStorage};
use tracing_subscriber::EnvFilter;

use crate::commands::{Cli, Outcome};

mod commands;
mod error;
mod settings;

fn main() -> ExitCode {
    match run() {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> error::Result<Outcome> {
    let cli = Cli::parse();
    let settings = settings::load(&settings::Overrides {
        config: cli.config.as_deref(),
        data_dir: cli.data_dir.as_deref(),
    })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "spendlog={level},engine={level}",
            level = settings.level
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("using data directory {}", settings.data_dir);
    let mut engine = Engine::builder()
        .key(settings.storage_key)
        .storage(FileStorage::new(settings.data_dir))
        .build();

    commands::run(cli.command, &mut engine, &mut std::io::stdout().lock())
}
