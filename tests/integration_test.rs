//! End-to-end tests: settings files on disk through the factory to client output.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use relational_db_factory::app::{AppService, RelationalDatabaseFactory};
use relational_db_factory::domain::{AppError, ConfigError, RelationalDatabaseKind, ValidationError};
use relational_db_factory::infra::{BufferConsole, Settings, SettingsLoader};

const BASE: &str = r#"
relational:
  prices:
    kind: postgres
    configuration:
      user: app
      password: secret
      host: localhost
      port: 5432
      database: prices
  file-manager:
    kind: bigquery
    configuration:
      project_id: acme
      dataset_id: files
      table_id: uploads
  legacy:
    kind: mysql
    configuration:
      host: localhost
  broken:
    kind: postgres
    configuration:
      host: localhost
      port: 5432
"#;

fn settings_dir(overlays: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.yaml"), BASE).unwrap();
    for (name, content) in overlays {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn load(dir: &TempDir, vars: &[(&str, &str)]) -> Settings {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SettingsLoader::new()
        .folder(dir.path())
        .env_source(vars)
        .load()
        .unwrap()
}

fn factory(settings: Settings, console: &BufferConsole) -> RelationalDatabaseFactory {
    RelationalDatabaseFactory::new(Arc::new(settings), Arc::new(console.clone()))
}

#[test]
fn test_prices_connects_to_localhost() {
    let dir = settings_dir(&[]);
    let console = BufferConsole::new();
    let factory = factory(load(&dir, &[]), &console);

    let db = factory.get_database_instance_from_identifier("prices").unwrap();
    db.connect();

    assert_eq!(db.kind(), RelationalDatabaseKind::Postgres);
    assert!(console.output().contains("localhost:5432"));
}

#[test]
fn test_run_connects_prices_and_file_manager() {
    let dir = settings_dir(&[]);
    let console = BufferConsole::new();
    let service = AppService::new(Arc::new(factory(load(&dir, &[]), &console)));

    service.run().unwrap();

    assert_eq!(
        console.lines(),
        vec![
            "Connecting to PostgresSQL on localhost:5432",
            "Connecting to BigQuery on acme:files:uploads",
        ]
    );
}

#[test]
fn test_environment_overlay_changes_pool_notice() {
    let overlay = r#"
relational:
  prices:
    configuration:
      host: db.staging
      pool_configuration:
        pool_size: 3
"#;
    let dir = settings_dir(&[("settings-staging.yaml", overlay)]);
    let console = BufferConsole::new();
    let factory = factory(load(&dir, &[("NGX_ENV", "staging")]), &console);

    factory
        .get_database_instance_from_identifier("prices")
        .unwrap()
        .connect();

    assert_eq!(
        console.lines(),
        vec![
            "Connecting to PostgresSQL on db.staging:5432",
            "Pool size default value has been changed: 3",
        ]
    );
}

#[test]
fn test_environment_variable_beats_overlay() {
    let overlay = "relational:\n  prices:\n    configuration:\n      port: 6000\n";
    let dir = settings_dir(&[("settings-local.yaml", overlay)]);
    let console = BufferConsole::new();
    let settings = load(
        &dir,
        &[("NGX_RELATIONAL__PRICES__CONFIGURATION__PORT", "7000")],
    );

    factory(settings, &console)
        .get_database_instance_from_identifier("prices")
        .unwrap()
        .connect();

    assert!(console.output().contains("localhost:7000"));
}

#[test]
fn test_unregistered_kind_is_not_implemented() {
    let dir = settings_dir(&[]);
    let factory = factory(load(&dir, &[]), &BufferConsole::new());

    let Err(err) = factory.get_database_instance_from_identifier("legacy") else {
        panic!("unregistered kind should not resolve");
    };

    assert!(matches!(err, AppError::NotImplemented(ref kind) if kind == "mysql"));
    assert_eq!(err.to_string(), "missing implementation for [mysql] database.");
}

#[test]
fn test_incomplete_postgres_block_fails_validation() {
    let dir = settings_dir(&[]);
    let factory = factory(load(&dir, &[]), &BufferConsole::new());

    let Err(err) = factory.get_database_instance_from_identifier("broken") else {
        panic!("incomplete block should not resolve");
    };

    assert!(matches!(
        err,
        AppError::Validation(ValidationError::MissingField(_))
    ));
}

#[test]
fn test_unknown_identifier_is_config_error() {
    let dir = settings_dir(&[]);
    let factory = factory(load(&dir, &[]), &BufferConsole::new());

    let Err(err) = factory.get_database_instance_from_identifier("orders") else {
        panic!("unknown identifier should not resolve");
    };

    assert!(matches!(
        err,
        AppError::Config(ConfigError::UnknownIdentifier(ref id)) if id == "orders"
    ));
}

#[test]
fn test_block_without_kind_does_not_break_loading() {
    let overlay = "relational:\n  draft:\n    configuration:\n      host: x\n";
    let dir = settings_dir(&[("settings-local.yaml", overlay)]);
    let console = BufferConsole::new();
    let factory = factory(load(&dir, &[]), &console);

    factory
        .get_database_instance_from_identifier("prices")
        .unwrap()
        .connect();
    assert_eq!(console.lines(), vec!["Connecting to PostgresSQL on localhost:5432"]);

    let Err(err) = factory.get_database_instance_from_identifier("draft") else {
        panic!("block without a kind should not resolve");
    };
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::MissingField(ref field)) if field == "kind"
    ));
}

#[test]
fn test_mixed_case_keys_are_preserved() {
    let overlay = r#"
relational:
  Orders:
    kind: postgres
    configuration:
      user: app
      password: secret
      host: orders-db
      port: 5433
      database: orders
      labels:
        Team: Pricing
"#;
    let dir = settings_dir(&[("settings-local.yaml", overlay)]);
    let settings = load(&dir, &[]);

    assert!(settings.identifiers().contains(&"Orders"));
    let orders = settings.relational("Orders").unwrap();
    assert_eq!(orders.configuration["labels"]["Team"], "Pricing");

    let console = BufferConsole::new();
    let factory = factory(settings, &console);
    for identifier in ["Orders", "orders"] {
        factory
            .get_database_instance_from_identifier(identifier)
            .unwrap()
            .connect();
    }
    assert_eq!(
        console.lines(),
        vec![
            "Connecting to PostgresSQL on orders-db:5433",
            "Connecting to PostgresSQL on orders-db:5433",
        ]
    );
}

#[test]
fn test_query_output() {
    let dir = settings_dir(&[]);
    let console = BufferConsole::new();
    let service = AppService::new(Arc::new(factory(load(&dir, &[]), &console)));

    service.query("file-manager", "SELECT COUNT(*) FROM uploads").unwrap();

    assert_eq!(
        console.lines().last().map(String::as_str),
        Some("Executing query: SELECT COUNT(*) FROM uploads")
    );
}
