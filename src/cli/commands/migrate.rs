use crate::config::config;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let mut db = config().database.clone();
    // connect() would migrate too when configured; run it exactly once here
    db.run_migrations = false;

    let pool = DatabaseManager::connect(&db).await?;
    DatabaseManager::migrate(&pool).await?;
    pool.close().await;
    Ok(())
}
