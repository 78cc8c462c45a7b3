//! Hugopod CLI entry point.

use clap::Parser;
use hugopod::cli::args::{Cli, Commands};
use hugopod::cli::export;
use hugopod::cli::output::Output;
use hugopod::config::PodConfig;
use hugopod::error::{exit_code, ExportError};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    // stdout carries the command result
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: &Cli) -> Result<(), ExportError> {
    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Export(args) => {
            export::run(args, args.dry_run, &output).await?;
        }
        Commands::Plan(args) => {
            export::run(args, true, &output).await?;
        }
        Commands::Schema => {
            output.print(&PodConfig::schema())?;
        }
    }
    Ok(())
}
