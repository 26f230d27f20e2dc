use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Open a connection pool for `profile`. Runs no migrations.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile)?;
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);

    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    info!(profile = ?profile, "bootstrap=start");
    let conn = connect_db(profile).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(profile = ?profile, "bootstrap=done");
    Ok(conn)
}
