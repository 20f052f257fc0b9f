//! seriesbridge CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use seriesbridge_cli::cli::{Cli, Command};
use seriesbridge_cli::commands;
use seriesbridge_cli::error::CliResult;
use seriesbridge_core::{TracingConfig, TracingOutputFormat, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default().with_format(TracingOutputFormat::Compact)
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::CreateMeetings { config, dry_run } => {
            commands::meetings::run(&config, dry_run).await
        }
        Command::CreateEvents {
            config,
            dry_run,
            schema,
        } => commands::events::run(&config, dry_run, schema.version()).await,
        Command::Map {
            input,
            output,
            wordpress_url,
            username,
            app_password,
            status,
            default_timezone,
        } => commands::map::run(
            &input,
            output.as_deref(),
            commands::map::MapArgs {
                wordpress_url,
                username,
                app_password,
                status,
                default_timezone,
            },
        ),
    }
}
