use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub cuit: String,
}

#[derive(Debug, Clone)]
pub struct NewSupplier {
    pub name: String,
    pub cuit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    pub id: i64,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub classification: String,
    pub description: String,
    pub supplier_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewBill {
    pub supplier_id: i64,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub classification: String,
    pub description: String,
}

/// A bill row joined with the name of the supplier that issued it.
///
/// `invoice_date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillSummary {
    pub id: i64,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub classification: String,
    pub description: String,
    pub supplier_name: String,
}
