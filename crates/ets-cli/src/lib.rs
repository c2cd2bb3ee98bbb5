//! `ets-query`: command-line access to the ets language service core.

pub mod args;
pub mod driver;
pub mod tracing_config;
