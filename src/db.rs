use std::str::FromStr;

use anyhow::Context;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, Schema, SqlxSqliteConnector,
    sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};

use crate::entities::{director, genre, movie};

pub async fn connect_and_bootstrap(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    // Movie foreign keys are informational only: dangling director/genre ids
    // are stored as given, so enforcement stays off on every pooled connection.
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid DATABASE_URL {database_url}"))?
        .foreign_keys(false)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let mut pool_options = SqlitePoolOptions::new();
    if database_url.contains(":memory:") {
        // The database lives only as long as its connection.
        pool_options =
            pool_options.max_connections(1).min_connections(1).idle_timeout(None).max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .context("opening sqlite database")?;
    let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);

    // Movie references both lookup tables, so it goes last.
    create_table(&db, director::Entity).await?;
    create_table(&db, genre::Entity).await?;
    create_table(&db, movie::Entity).await?;
    Ok(db)
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> anyhow::Result<()> {
    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(entity).if_not_exists().to_owned();
    db.execute(backend.build(&stmt))
        .await
        .with_context(|| format!("creating table {}", entity.table_name()))?;
    tracing::debug!(table = entity.table_name(), "table ready");
    Ok(())
}
