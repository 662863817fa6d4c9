//! fibdrv library: application logic for the benchmark client.

pub mod app;
pub mod config;
pub mod errors;
