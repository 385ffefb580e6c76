use thiserror::Error;

use crate::domain::assumptions::{Field, ValidationError};
use crate::services::dashboard_config::ConfigError;
use crate::services::dashboard_runtime::RuntimeError;
use crate::services::data_source::DataSourceError;
use crate::services::forecast_chart::ChartError;

/// Everything a subcommand can fail with. `Display` is printed to stderr
/// as-is before the process exits with a failure code.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{} must not be empty", .0.label())]
    MissingValue(Field),
    #[error("Failed to create client: {0}")]
    Client(DataSourceError),
    #[error("{context}: {source}")]
    Request {
        context: &'static str,
        source: DataSourceError,
    },
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CommandError {
    pub fn request(context: &'static str) -> impl FnOnce(DataSourceError) -> CommandError {
        move |source| CommandError::Request { context, source }
    }
}
