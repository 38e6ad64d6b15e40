use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Once;

static INIT: Once = Once::new();

/// In-memory database in the same state `sio::init_pool` produces on a
/// fresh install: migrations applied, default groups seeded.
pub async fn setup_db() -> SqlitePool {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    sio::database::group_repo::seed_default_groups(&pool)
        .await
        .expect("Failed to seed groups");

    pool
}
