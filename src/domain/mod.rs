pub mod assumptions;
pub mod forecast;
pub mod inputs;
pub mod inventory;
pub mod optimization;
