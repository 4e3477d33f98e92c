use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::warn;

use relational_db_factory::app::{AppService, RelationalDatabaseFactory};
use relational_db_factory::infra::{LogFormat, Settings, StdoutConsole, init_tracing};

fn main() -> Result<()> {
    // Load environment variables from .env file
    let dotenv_result = dotenv();

    init_tracing(LogFormat::from_env()).context("Failed to initialise tracing")?;
    if let Err(err) = dotenv_result {
        if !err.not_found() {
            warn!(error = %err, "Ignoring unreadable .env file");
        }
    }

    let settings = Settings::load().context("Failed to load settings")?;

    let factory = RelationalDatabaseFactory::new(Arc::new(settings), Arc::new(StdoutConsole));
    let service = AppService::new(Arc::new(factory));

    service.run()?;

    Ok(())
}
