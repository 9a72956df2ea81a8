//! virtkit library crate.

/// Guest model and emulator control.
pub mod core;

/// CLI argument parsing (only when the `cli` feature is enabled).
#[cfg(feature = "cli")]
pub mod cli;

/// CLI-facing command handlers (only when the `cli` feature is enabled).
#[cfg(feature = "cli")]
pub mod app;

mod config;
mod error;

pub use config::*;
pub use error::*;
