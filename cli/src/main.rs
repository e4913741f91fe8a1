use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use top50_core::config::Settings;
use top50_core::logger::{init_logger, init_tracing};

mod handlers;
mod snapshots;

use handlers::{CommandHandler, utils::WriteAdapter};

/// Options configurable via the CLI.
#[derive(Debug, Parser)]
#[command(name = "top50", version = env!("CARGO_PKG_VERSION"), about)]
struct Flags {
    /// config file path
    #[clap(long)]
    config: Option<PathBuf>,
    /// Override the configured snapshot directory
    #[clap(long)]
    data_dir: Option<PathBuf>,
    /// log level
    #[clap(long)]
    log_level: Option<log::LevelFilter>,
    /// subcommand to run
    #[clap(subcommand)]
    subcommand: Option<handlers::Command>,
}

#[test]
fn verify_cli() {
    Flags::command().debug_assert();
}

#[cfg(not(tarpaulin_include))]
fn main() -> anyhow::Result<()> {
    clap_complete::CompleteEnv::with_factory(Flags::command).complete();

    let flags = Flags::parse();

    let config_file = match flags.config {
        Some(config) => config,
        None => Settings::get_config_path()?,
    };
    let settings = Settings::init(config_file, flags.data_dir, flags.log_level)?;

    init_logger(settings.charts.log_level);
    tracing::subscriber::set_global_default(init_tracing())?;

    let mut stdout_adapter = WriteAdapter(std::io::stdout());
    let mut stderr_adapter = WriteAdapter(std::io::stderr());

    if let Some(command) = flags.subcommand {
        command.handle(&settings, &mut stdout_adapter, &mut stderr_adapter)?;
    } else {
        eprintln!("No subcommand provided");
    }

    Ok(())
}
