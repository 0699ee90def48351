pub mod api;
pub mod app_state;
pub mod config;
pub mod health;
pub mod language;
pub mod startup;
pub mod telemetry;
