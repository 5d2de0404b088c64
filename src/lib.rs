// src/lib.rs - Library interface for internal module access

pub mod cli;
pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod figures;
pub mod font_config;
pub mod logging;
pub mod model_names;
pub mod plot_framework;
pub mod plot_functions;
pub mod tables;

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// src/lib.rs
