pub mod assumptions_input;
pub mod backend_api;
pub mod dashboard;
pub mod dashboard_config;
pub mod dashboard_runtime;
pub mod dashboard_view;
pub mod data_source;
pub mod debounce;
pub mod forecast_chart;
pub mod inventory_table;
pub mod optimization_display;
