//! Shared utilities for finmcp
//!
//! This crate provides the process-level plumbing used by the binary:
//! logging setup and configuration loaded from the environment.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, LogFormat, LoggingConfig, load_dotenv};
pub use logging::init_tracing;
