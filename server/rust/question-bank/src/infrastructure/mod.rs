pub mod config;
pub mod database;
pub mod metrics;
pub mod password;
pub mod telemetry;
pub mod token;
