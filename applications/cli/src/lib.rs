//! Encore CLI
//!
//! Wires the playback controller to a file-backed favorites store and the
//! simulated audio backend, driven from a JSON track catalog.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{CliError, Result};
