//! Core types for the bridge.
//!
//! This module provides foundational types used throughout the system:
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for the host contract and logging

mod config;
mod errors;

pub use config::{Config, HostConfig, ObservabilityConfig, CONFIG_FILE_NAME};
pub use errors::{Error, Result};
