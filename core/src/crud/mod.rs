use std::time::Duration;

use crate::error::MigrationError;
use crate::error::Result;

use diesel::Connection;
use diesel::PgConnection;
use diesel_async::{
    pooled_connection::bb8::{Pool, PooledConnection},
    AsyncPgConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{error, info};

mod section_questions;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Creates the question group, section and section question tables the lookup reads, using the
/// embedded diesel migrations. Connection failures are logged and retried every 5 seconds until
/// Postgres accepts connections. Panics if a migration itself fails.
pub fn run_migrations(db_url: &str) {
    let mut con;
    loop {
        let maybe_connected = PgConnection::establish(db_url);
        match maybe_connected {
            Ok(c) => {
                con = c;
                break;
            }
            Err(e) => {
                error!("Questionnaire database not reachable ({e}), retrying table setup in 5 seconds");
                std::thread::sleep(Duration::from_secs(5))
            }
        }
    }

    let applied = con
        .run_pending_migrations(MIGRATIONS)
        .unwrap_or_else(|e| panic!("Error running migrations for {} with error {e}", db_url));
    info!("Applied {} pending questionnaire migrations", applied.len());
}

/// Connection to the questionnaire database of saved question groups, used to find where a
/// migrated question was placed. See [SectionQuestionLookup][crate::lookup::SectionQuestionLookup].
pub struct PgDb<'a> {
    con: PooledConnection<'a, AsyncPgConnection>,
}

// Placement queries live in section_questions.rs
impl<'a> PgDb<'a> {
    pub async fn try_from_pool(pool: &'a Pool<AsyncPgConnection>) -> Result<PgDb<'a>> {
        let con = pool.get().await.map_err(|_| {
            MigrationError::DbError(
                "No questionnaire database connection available in the pool".into(),
            )
        })?;
        Ok(Self { con })
    }
}
