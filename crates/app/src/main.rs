use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budget_bot={level},telegram_bot={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.database)
        .await
        .inspect_err(|err| tracing::error!("failed to initialize database: {err}"))?;
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .inspect_err(|err| tracing::error!("failed to build engine from database: {err}"))?;

    let telegram = settings.telegram;
    let timezone: chrono_tz::Tz = telegram
        .timezone
        .parse()
        .map_err(|err| format!("invalid timezone \"{}\": {err}", telegram.timezone))?;

    let bot = telegram_bot::Bot::builder()
        .token(&telegram.token)
        .allowed_users(telegram.allowed_users)
        .timezone(timezone)
        .repository(Arc::new(engine))
        .build()
        .inspect_err(|err| tracing::error!("failed to initialize telegram bot: {err}"))?;
    bot.run().await?;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => {
            tracing::warn!("using an in-memory database, data is lost on exit");
            String::from("sqlite::memory:")
        }
        Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
