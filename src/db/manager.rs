use crate::config::DatabaseConfig;
use crate::db::sqlite::{SqliteBillStore, SqlitePool, SqliteSupplierStore};
use crate::db::{BillStore, DatabaseError, SupplierStore};
use std::sync::Arc;
use std::time::Duration;

use diesel::RunQueryDsl;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use tracing::{debug, info};

/// Applied to every connection the pool hands out. SQLite leaves foreign key
/// enforcement off unless each connection asks for it.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

/// Owns the connection pool and the stores built on top of it. Constructed
/// once at startup and shared with the web layer by cloning.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: SqlitePool,
    supplier_store: Arc<dyn SupplierStore>,
    bill_store: Arc<dyn BillStore>,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let path = config.sqlite_path();
        let options = ConnectionOptions {
            busy_timeout_ms: config.busy_timeout_ms,
        };
        let max_connections = config.max_connections;

        let pool = tokio::task::spawn_blocking(move || {
            let manager = ConnectionManager::<SqliteConnection>::new(path);
            r2d2::Pool::builder()
                .max_size(max_connections)
                .connection_timeout(Duration::from_secs(30))
                .connection_customizer(Box::new(options))
                .build(manager)
                .map_err(|e| DatabaseError::Connection(e.to_string()))
        })
        .await
        .map_err(|e| DatabaseError::Connection(format!("pool setup task failed: {e}")))??;

        info!(
            path = %config.sqlite_path(),
            max_connections,
            "sqlite connection pool ready"
        );

        let supplier_store = Arc::new(SqliteSupplierStore::new(pool.clone()));
        let bill_store = Arc::new(SqliteBillStore::new(pool.clone()));

        Ok(Self {
            pool,
            supplier_store,
            bill_store,
        })
    }

    /// Creates the schema when it is missing. Safe to run on every start.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::Connection(e.to_string()))?;

            let statements = [
                r#"
                CREATE TABLE IF NOT EXISTS supplier (
                    id INTEGER NOT NULL PRIMARY KEY,
                    name VARCHAR(150) NOT NULL,
                    cuit VARCHAR(20) NOT NULL UNIQUE
                )
                "#,
                r#"
                CREATE TABLE IF NOT EXISTS bill (
                    id INTEGER NOT NULL PRIMARY KEY,
                    invoice_number VARCHAR(50) NOT NULL,
                    invoice_date DATE NOT NULL,
                    classification VARCHAR(50) NOT NULL,
                    description TEXT NOT NULL,
                    supplier_id INTEGER NOT NULL REFERENCES supplier(id)
                )
                "#,
                "CREATE INDEX IF NOT EXISTS idx_supplier_name ON supplier(name)",
                "CREATE INDEX IF NOT EXISTS idx_bill_invoice_date ON bill(invoice_date)",
                "CREATE INDEX IF NOT EXISTS idx_bill_supplier_id ON bill(supplier_id)",
            ];

            for statement in statements {
                diesel::sql_query(statement)
                    .execute(&mut conn)
                    .map_err(|e| DatabaseError::Migration(e.to_string()))?;
            }

            debug!("schema is up to date");
            Ok(())
        })
        .await
        .map_err(|e| DatabaseError::Migration(format!("migration task failed: {e}")))?
    }

    pub fn supplier_store(&self) -> Arc<dyn SupplierStore> {
        self.supplier_store.clone()
    }

    pub fn bill_store(&self) -> Arc<dyn BillStore> {
        self.bill_store.clone()
    }
}
