use async_trait::async_trait;

use super::DatabaseError;
use super::models::{Bill, BillSummary, NewBill, NewSupplier, Supplier};

#[async_trait]
pub trait SupplierStore: Send + Sync {
    /// All suppliers ordered by name ascending.
    async fn list_suppliers(&self) -> Result<Vec<Supplier>, DatabaseError>;
    async fn count_suppliers(&self) -> Result<i64, DatabaseError>;
    async fn create_supplier(&self, supplier: &NewSupplier) -> Result<Supplier, DatabaseError>;
}

#[async_trait]
pub trait BillStore: Send + Sync {
    /// All bills, newest invoice date first, each resolved against its supplier.
    async fn list_bills(&self) -> Result<Vec<BillSummary>, DatabaseError>;
    async fn count_bills(&self) -> Result<i64, DatabaseError>;
    async fn create_bill(&self, bill: &NewBill) -> Result<Bill, DatabaseError>;
}
