use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Once;

static INIT: Once = Once::new();

/// Fresh in-memory database with migrations applied and the default group
/// catalog seeded, the same state `init_pool` produces on a new install.
pub async fn init_test_db() -> SqlitePool {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    // Single connection: every handle must see the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    crate::database::group_repo::seed_default_groups(&pool)
        .await
        .expect("Failed to seed groups");

    pool
}
