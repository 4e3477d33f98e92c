//! Checks the settings files shipped in `config/` resolve cleanly.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use relational_db_factory::app::{AppService, RelationalDatabaseFactory};
use relational_db_factory::infra::{BufferConsole, SettingsLoader};

fn shipped_loader() -> SettingsLoader {
    SettingsLoader::new()
        .folder(Path::new(env!("CARGO_MANIFEST_DIR")).join("config"))
        .env_source(HashMap::new())
}

#[test]
fn test_local_profile_connects_both_identifiers() {
    let settings = shipped_loader().load().unwrap();
    let console = BufferConsole::new();
    let factory = RelationalDatabaseFactory::new(Arc::new(settings), Arc::new(console.clone()));

    AppService::new(Arc::new(factory)).run().unwrap();

    assert_eq!(
        console.lines(),
        vec![
            "Connecting to PostgresSQL on localhost:5432",
            "Pool size default value has been changed: 2",
            "Connecting to BigQuery on file-manager:storage:files",
        ]
    );
}

#[test]
fn test_profile_without_overlay_uses_base_only() {
    let settings = shipped_loader().environment("production").load().unwrap();
    let console = BufferConsole::new();
    let factory = RelationalDatabaseFactory::new(Arc::new(settings), Arc::new(console.clone()));

    factory
        .get_database_instance_from_identifier("prices")
        .unwrap()
        .connect();

    assert_eq!(console.lines(), vec!["Connecting to PostgresSQL on localhost:5432"]);
}
