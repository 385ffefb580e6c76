use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::assumptions::{Field, ValidationError};
use crate::domain::forecast::ModelType;
use crate::domain::inputs::DashboardInputs;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,
    /// Base URL of the inventory service (overrides config and STOCKCAST_BASE_URL)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    /// Product identifier
    #[arg(short, long)]
    pub product: String,
    /// Forecasting model: arima or exponential-smoothing (es)
    #[arg(short, long, default_value = "arima")]
    pub model: ModelType,
    /// Number of days to forecast
    #[arg(long, default_value = "30")]
    pub forecast_days: String,
    /// Seasonal periods, used by exponential smoothing
    #[arg(long, default_value = "7")]
    pub seasonal_periods: String,
}

#[derive(Args, Debug, Clone)]
pub struct AssumptionArgs {
    /// Supplier lead time in days
    #[arg(long, default_value = "7")]
    pub lead_time: String,
    /// Target service level in percent (0-100)
    #[arg(long, default_value = "95")]
    pub service_level: String,
    /// Holding cost per unit per year
    #[arg(long, default_value = "1.5")]
    pub holding_cost: String,
    /// Cost per order placed
    #[arg(long, default_value = "50")]
    pub ordering_cost: String,
}

impl ForecastArgs {
    pub fn apply(&self, inputs: &mut DashboardInputs) -> Result<(), ValidationError> {
        inputs.edit(Field::ForecastDays, &self.forecast_days)?;
        inputs.edit(Field::SeasonalPeriods, &self.seasonal_periods)?;
        Ok(())
    }
}

impl AssumptionArgs {
    pub fn apply(&self, inputs: &mut DashboardInputs) -> Result<(), ValidationError> {
        inputs.edit(Field::LeadTime, &self.lead_time)?;
        inputs.edit(Field::ServiceLevel, &self.service_level)?;
        inputs.edit(Field::HoldingCost, &self.holding_cost)?;
        inputs.edit(Field::OrderingCost, &self.ordering_cost)?;
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the product identifiers known to the service
    Products,
    /// Fetch a demand forecast for one product
    Forecast {
        #[command(flatten)]
        forecast: ForecastArgs,
        /// Optional PNG file for the forecast chart
        #[arg(long)]
        chart: Option<String>,
    },
    /// Fetch reorder metrics (safety stock, EOQ, reorder point) for one product
    Optimize {
        #[command(flatten)]
        forecast: ForecastArgs,
        #[command(flatten)]
        assumptions: AssumptionArgs,
    },
    /// Show the latest historical inventory records for one product
    Inventory {
        /// Product identifier
        #[arg(short, long)]
        product: String,
    },
    /// Interactive dashboard driven by commands on stdin
    Dashboard {
        /// Initial forecasting model
        #[arg(short, long, default_value = "arima")]
        model: ModelType,
        /// PNG file rewritten after every refresh
        #[arg(long)]
        chart: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
