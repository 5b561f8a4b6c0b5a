pub mod models;
pub mod polls;
pub mod ranks;
pub mod schema;

use std::env;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use dotenvy::dotenv;

use crate::error::Error;

/// Connection pool for the embedding bot process.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn establish_connection() -> Result<SqliteConnection, Error> {
    dotenv().ok();

    let db_url = env::var("DATABASE_URL").map_err(|_| {
        Error::Config(String::from(
            "environment variable 'DATABASE_URL' must be set",
        ))
    })?;
    let mut conn = SqliteConnection::establish(&db_url)?;
    // cascade deletes from parents to options and votes rely on this
    conn.batch_execute("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), Error> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?;
    Ok(())
}
