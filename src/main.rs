mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::command_error::CommandError;
use crate::commands::dashboard_cmd::dashboard_command;
use crate::commands::forecast_cmd::forecast_command;
use crate::commands::inventory_cmd::inventory_command;
use crate::commands::optimize_cmd::optimize_command;
use crate::commands::products_cmd::products_command;
use crate::services::backend_api::BackendApiClient;
use crate::services::dashboard_config::DashboardConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: CliArgs) -> Result<(), CommandError> {
    let config = DashboardConfig::load(args.config.as_deref(), args.base_url.as_deref())?;
    let client = BackendApiClient::new(&config).map_err(CommandError::Client)?;
    tracing::debug!(base_url = %config.base_url, "using inventory service");
    let mut stdout = std::io::stdout();

    match args.command {
        Commands::Products => products_command(&client, &mut stdout).await,
        Commands::Forecast { forecast, chart } => {
            forecast_command(&client, &forecast, chart.as_deref(), &mut stdout).await
        }
        Commands::Optimize {
            forecast,
            assumptions,
        } => optimize_command(&client, &forecast, &assumptions, &mut stdout).await,
        Commands::Inventory { product } => inventory_command(&client, &product, &mut stdout).await,
        Commands::Dashboard { model, chart } => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            dashboard_command(Arc::new(client), &config, model, chart, input, stdout).await
        }
        Commands::Completions { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();

    if let Commands::Completions { shell } = args.command {
        clap_complete::generate(shell, &mut CliArgs::command(), "stockcast", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
