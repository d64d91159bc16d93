use anyhow::{anyhow, Context as _, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use super::demo::catalogue_app;
use crate::app::App;
use crate::config::AppConfig;
use crate::runtime_config::RuntimeConfig;
use crate::server::{AppService, HttpServer};
use crate::validator::ValidationSettings;

/// Command-line interface for brrthooks
#[derive(Parser)]
#[command(name = "brrthooks")]
#[command(about = "Validation hooks demo server", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the demo catalogue app
    Serve {
        /// Listen address, overrides the config file
        #[arg(short, long, env = "BRRTR_ADDR")]
        addr: Option<String>,

        /// Path to a YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the route table
    Routes,
    /// Print per-route OpenAPI parameters as JSON
    Openapi,
}

/// Run a parsed command line.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, a demo hook
/// fails to build, or the server cannot bind its address.
pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { addr, config } => serve(addr, config),
        Commands::Routes => {
            let app = catalogue_app(ValidationSettings::from_env())?;
            for route in app.routes() {
                println!("{route}");
            }
            Ok(())
        }
        Commands::Openapi => {
            let app = catalogue_app(ValidationSettings::from_env())?;
            let doc = openapi_document(&app)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
    }
}

fn serve(addr: Option<String>, config: Option<PathBuf>) -> Result<()> {
    let mut config = match config {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::from_env(),
    };
    if let Some(addr) = addr {
        config.http.addr = addr;
    }

    RuntimeConfig::from_env().apply();

    let app = Arc::new(catalogue_app(config.validation)?);
    let service = AppService::new(Arc::clone(&app));
    let handle = HttpServer(service)
        .start(config.http.addr.as_str())
        .with_context(|| format!("failed to bind {}", config.http.addr))?;
    info!(
        addr = %handle.addr(),
        routes_count = app.routes().len(),
        "Serving catalogue app"
    );

    handle
        .join()
        .map_err(|_| anyhow!("server coroutine panicked"))
}

/// One entry per route: method, path and the merged parameter list.
pub(crate) fn openapi_document(app: &App) -> Result<Value> {
    let mut operations = Vec::with_capacity(app.routes().len());
    for route in app.routes() {
        let parameters = serde_json::to_value(app.api_parameters_for(route))?;
        operations.push(json!({
            "method": route.method.as_str(),
            "path": route.path,
            "operation": format!("{}::{}", route.controller(), route.action),
            "parameters": parameters,
        }));
    }
    Ok(Value::Array(operations))
}
