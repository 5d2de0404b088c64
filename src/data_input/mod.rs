// src/data_input/mod.rs

pub mod builtin;
pub mod record_parser;
pub mod records;

// src/data_input/mod.rs
