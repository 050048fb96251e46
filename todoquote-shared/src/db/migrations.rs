/// Bootstrap schema runner
///
/// Applies the SQL files in the workspace `migrations/` directory with sqlx's
/// migrator. Already-applied files are skipped, so running this at every
/// startup is safe.

use sqlx::{migrate::Migrator, postgres::PgPool};
use tracing::{info, warn};

/// Embedded schema files
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Applies every pending schema file.
///
/// # Errors
///
/// Returns an error if a file fails to apply or the connection drops.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(files = MIGRATOR.iter().count(), "Applying database schema");

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!("Applying schema failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_files_are_embedded() {
        assert!(MIGRATOR.iter().count() >= 1);
        assert!(MIGRATOR
            .iter()
            .any(|migration| migration.description.contains("initial schema")));
    }
}
