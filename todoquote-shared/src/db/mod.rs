/// Database layer
///
/// - `pool`: PostgreSQL connection pool with bounded latency and health checks
/// - `migrations`: Applies the bootstrap schema in `migrations/`
///
/// Models live in the `models` module at crate root level.
///
/// # Example
///
/// ```no_run
/// use todoquote_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

pub mod migrations;
pub mod pool;
