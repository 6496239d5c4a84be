//! Database migrations.

use rusqlite_migration::{Migrations, M};

use crate::pool::{DbPool, DbResult, DbError};

/// SQL schema definition.
const SCHEMA: &str = include_str!("schema.sql");

/// Run all database migrations.
pub fn run_migrations(pool: &DbPool) -> DbResult<()> {
    let migrations = Migrations::new(vec![
        M::up(SCHEMA),
    ]);

    pool.with_conn_mut(|conn| {
        migrations
            .to_latest(conn)
            .map_err(|e| DbError::Migration(e.to_string()))
    })
}
