pub mod base_commands;
pub mod command_error;
pub mod dashboard_cmd;
pub mod forecast_cmd;
pub mod inventory_cmd;
pub mod optimize_cmd;
pub mod products_cmd;
