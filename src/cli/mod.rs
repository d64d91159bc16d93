//! # CLI Module
//!
//! Command-line interface of the `brrthooks` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Serve the demo catalogue app:
//!
//! ```bash
//! brrthooks serve --addr 127.0.0.1:8080 --config config.yaml
//! ```
//!
//! Options:
//! - `--addr <ADDR>` - Listen address (env `BRRTR_ADDR`, overrides the config file)
//! - `--config <FILE>` - YAML configuration (see [`crate::config::AppConfig`])
//!
//! ### `routes`
//!
//! Print the demo route table, one `METHOD /path -> Controller::action` per line.
//!
//! ### `openapi`
//!
//! Print the OpenAPI parameters registered by the demo app's hooks as JSON.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use brrthooks::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;
mod demo;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
pub use demo::catalogue_app;
