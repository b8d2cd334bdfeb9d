//! Console entry point for the student roster management system.
mod config;
mod shell;

use anyhow::Result;
use config::CliConfig;
use roster_store::{FileRosterRepository, RosterStore};

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never interleave with the prompt.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    tracing::info!("Using roster file {}", config.data_file.display());

    let repository = FileRosterRepository::new(&config.data_file)?;
    let store = RosterStore::open(Box::new(repository));

    shell::run(store)
}
