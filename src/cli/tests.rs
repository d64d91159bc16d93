//! Unit tests for CLI commands

use super::commands::openapi_document;
use crate::cli::{catalogue_app, Cli, Commands};
use crate::validator::ValidationSettings;
use clap::Parser;

#[test]
fn test_serve_command_with_flags() {
    let cli = Cli::try_parse_from([
        "brrthooks",
        "serve",
        "--addr",
        "127.0.0.1:9999",
        "--config",
        "config.yaml",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve { addr, config } => {
            assert_eq!(addr.as_deref(), Some("127.0.0.1:9999"));
            assert_eq!(config.unwrap().to_string_lossy(), "config.yaml");
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_routes_and_openapi_commands_exist() {
    assert!(matches!(
        Cli::try_parse_from(["brrthooks", "routes"]).unwrap().command,
        Commands::Routes
    ));
    assert!(matches!(
        Cli::try_parse_from(["brrthooks", "openapi"]).unwrap().command,
        Commands::Openapi
    ));
    assert!(Cli::try_parse_from(["brrthooks", "bogus"]).is_err());
}

#[test]
fn test_catalogue_routes() {
    let app = catalogue_app(ValidationSettings::default()).unwrap();
    let routes: Vec<String> = app.routes().iter().map(|r| r.to_string()).collect();
    assert_eq!(
        routes,
        vec![
            "GET /products -> ProductController::list",
            "GET /products/:id -> ProductController::get",
            "DELETE /products/:id -> ProductController::delete",
        ]
    );
}

#[test]
fn test_openapi_document_merges_controller_and_action_parameters() {
    let app = catalogue_app(ValidationSettings::default()).unwrap();
    let doc = openapi_document(&app).unwrap();
    let list = &doc[0];
    assert_eq!(list["path"], "/products");
    let names: Vec<(&str, &str)> = list["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| (p["in"].as_str().unwrap(), p["name"].as_str().unwrap()))
        .collect();
    assert_eq!(
        names,
        vec![("cookie", "currency"), ("query", "q"), ("query", "limit")]
    );

    let get = &doc[1];
    assert_eq!(get["parameters"].as_array().unwrap().len(), 1);
}
