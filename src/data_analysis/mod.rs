// src/data_analysis/mod.rs

pub mod calibration;
pub mod curves;
pub mod distribution;
pub mod emergence;
pub mod fitting;
pub mod synthetic;
pub mod ucs;

// src/data_analysis/mod.rs
