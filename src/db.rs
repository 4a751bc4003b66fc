pub use self::error::DatabaseError;
pub use self::manager::DatabaseManager;
pub use self::models::{Bill, BillSummary, NewBill, NewSupplier, Supplier};
pub use self::stores::{BillStore, SupplierStore};

pub mod error;
pub mod manager;
pub mod models;
pub mod schema;
pub mod sqlite;
pub mod stores;
