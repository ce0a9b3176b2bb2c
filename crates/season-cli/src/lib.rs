//! CLI library components for the seasonality tool.

pub mod commands;
pub mod logging;
pub mod types;
