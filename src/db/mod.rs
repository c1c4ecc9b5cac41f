use std::ops::Deref;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, PooledConnection};
use diesel::sqlite::SqliteConnection;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;

pub mod schema;

embed_migrations!("migrations");

pub type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Settings applied to every physical connection when the pool opens it.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        // foreign_keys is off by default in SQLite and cannot change inside a transaction
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub fn init_pool(config: &Config) -> Result<Pool> {
    let manager = ConnectionManager::<SqliteConnection>::new(config.database_url.as_str());
    let mut builder = Pool::builder()
        .max_size(config.effective_pool_size())
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout_ms: config.busy_timeout_ms,
        }));
    if config.is_in_memory() {
        // the database dies with its only connection, so never recycle it
        builder = builder.max_lifetime(None).idle_timeout(None);
    }
    let pool = builder.build(manager)?;
    debug!(
        url = %config.database_url,
        size = config.effective_pool_size(),
        "connection pool ready"
    );
    Ok(pool)
}

pub fn run_migrations(conn: &SqliteConnection) -> Result<()> {
    info!("running pending migrations");
    embedded_migrations::run(conn)?;
    Ok(())
}

pub struct Conn(PooledConnection<ConnectionManager<SqliteConnection>>);

impl Conn {
    pub fn get(pool: &Pool) -> Result<Conn> {
        Ok(Conn(pool.get()?))
    }
}

impl Deref for Conn {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
