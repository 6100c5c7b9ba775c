//! # Daylight Application Library
//!
//! Command-line front end and bootstrap for the theme engine.
//!
//! ## Modules
//!
//! - [`bootstrap`] - Wires storage, surface and events from configuration and applies the startup theme
//! - [`cli`] - Command-line parsing and command execution
//! - [`config`] - Configuration loading and validation
//! - [`logger`] - Logging configuration
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod logger;

pub use config::{AppConfig, ConfigLoadResult};
