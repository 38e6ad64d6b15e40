pub mod config;
pub mod database;
pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use types::errors::AppResult;

/// Open (or create) the budget database, apply pending migrations and seed
/// the default group catalog. Call once at startup; the returned pool is
/// shared by every repo and service.
pub async fn init_pool(db_path: &Path) -> AppResult<SqlitePool> {
    if let Some(dir) = db_path.parent() {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let opts = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    // Versioned migrations compiled into the binary; each one is recorded
    // against the stored schema version, so re-running is a no-op.
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(sqlx::Error::from)?;

    database::group_repo::seed_default_groups(&pool).await?;

    Ok(pool)
}
