pub mod api;
mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod plan;
pub mod telemetry;

pub use cli::run;
