use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;

use crate::db::schema::{bill, supplier};

use super::{
    DatabaseError,
    models::{Bill, BillSummary, NewBill, NewSupplier, Supplier},
};

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

// SQLite uses i32 for INTEGER (primary keys), but we want to keep i64 in our API
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = supplier)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct DbSupplier {
    id: i32,
    name: String,
    cuit: String,
}

impl From<DbSupplier> for Supplier {
    fn from(row: DbSupplier) -> Self {
        Supplier {
            id: row.id as i64,
            name: row.name,
            cuit: row.cuit,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = supplier)]
struct InsertSupplier<'a> {
    name: &'a str,
    cuit: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bill)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct DbBill {
    id: i32,
    invoice_number: String,
    invoice_date: NaiveDate,
    classification: String,
    description: String,
    supplier_id: i32,
}

impl From<DbBill> for Bill {
    fn from(row: DbBill) -> Self {
        Bill {
            id: row.id as i64,
            invoice_number: row.invoice_number,
            invoice_date: row.invoice_date,
            classification: row.classification,
            description: row.description,
            supplier_id: row.supplier_id as i64,
        }
    }
}

impl DbBill {
    fn into_summary(self, supplier_name: String) -> BillSummary {
        BillSummary {
            id: self.id as i64,
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            classification: self.classification,
            description: self.description,
            supplier_name,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = bill)]
struct InsertBill<'a> {
    invoice_number: &'a str,
    invoice_date: NaiveDate,
    classification: &'a str,
    description: &'a str,
    supplier_id: i32,
}

/// Runs a blocking diesel operation on a pooled connection off the async runtime.
async fn with_connection<T, F>(pool: &SqlitePool, op: F) -> Result<T, DatabaseError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, DatabaseError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool
            .get()
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;
        op(&mut conn)
    })
    .await
    .map_err(|e| DatabaseError::Query(format!("database task failed: {e}")))?
}

pub struct SqliteSupplierStore {
    pool: SqlitePool,
}

impl SqliteSupplierStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl super::SupplierStore for SqliteSupplierStore {
    async fn list_suppliers(&self) -> Result<Vec<Supplier>, DatabaseError> {
        with_connection(&self.pool, |conn| {
            let rows = supplier::table
                .order((supplier::name.asc(), supplier::id.asc()))
                .select(DbSupplier::as_select())
                .load::<DbSupplier>(conn)?;
            Ok(rows.into_iter().map(Supplier::from).collect())
        })
        .await
    }

    async fn count_suppliers(&self) -> Result<i64, DatabaseError> {
        with_connection(&self.pool, |conn| {
            Ok(supplier::table.count().get_result::<i64>(conn)?)
        })
        .await
    }

    async fn create_supplier(&self, new_supplier: &NewSupplier) -> Result<Supplier, DatabaseError> {
        let new_supplier = new_supplier.clone();
        with_connection(&self.pool, move |conn| {
            let row = InsertSupplier {
                name: &new_supplier.name,
                cuit: &new_supplier.cuit,
            };

            let created = diesel::insert_into(supplier::table)
                .values(&row)
                .returning(DbSupplier::as_returning())
                .get_result::<DbSupplier>(conn)?;
            Ok(created.into())
        })
        .await
    }
}

pub struct SqliteBillStore {
    pool: SqlitePool,
}

impl SqliteBillStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl super::BillStore for SqliteBillStore {
    async fn list_bills(&self) -> Result<Vec<BillSummary>, DatabaseError> {
        with_connection(&self.pool, |conn| {
            let rows = bill::table
                .inner_join(supplier::table)
                .order((bill::invoice_date.desc(), bill::id.desc()))
                .select((DbBill::as_select(), supplier::name))
                .load::<(DbBill, String)>(conn)?;
            Ok(rows
                .into_iter()
                .map(|(row, supplier_name)| row.into_summary(supplier_name))
                .collect())
        })
        .await
    }

    async fn count_bills(&self) -> Result<i64, DatabaseError> {
        with_connection(&self.pool, |conn| {
            Ok(bill::table.count().get_result::<i64>(conn)?)
        })
        .await
    }

    async fn create_bill(&self, new_bill: &NewBill) -> Result<Bill, DatabaseError> {
        let new_bill = new_bill.clone();
        // An id outside the INTEGER range cannot reference any stored supplier.
        let supplier_id = i32::try_from(new_bill.supplier_id).map_err(|_| {
            DatabaseError::ForeignKeyViolation(format!(
                "supplier id {} is out of range",
                new_bill.supplier_id
            ))
        })?;

        with_connection(&self.pool, move |conn| {
            let row = InsertBill {
                invoice_number: &new_bill.invoice_number,
                invoice_date: new_bill.invoice_date,
                classification: &new_bill.classification,
                description: &new_bill.description,
                supplier_id,
            };

            let created = diesel::insert_into(bill::table)
                .values(&row)
                .returning(DbBill::as_returning())
                .get_result::<DbBill>(conn)?;
            Ok(created.into())
        })
        .await
    }
}
