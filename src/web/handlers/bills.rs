use salvo::prelude::*;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::db::{Bill, BillStore, DatabaseError, NewBill};
use crate::web::error::{ApiError, render_error};
use crate::web::validation::{parse_invoice_date, required_string};
use crate::web::web_state;

const CREATE_CONTEXT: &str = "Error al registrar factura";
const CREATED_MESSAGE: &str = "Factura registrada exitosamente";

/// Every field stays loosely typed so that a bad date is reported as such
/// even when other fields are malformed too.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBillRequest {
    supplier_id: Option<Value>,
    classification: Option<Value>,
    invoice_number: Option<Value>,
    invoice_date: Option<Value>,
    description: Option<Value>,
}

impl CreateBillRequest {
    fn validate(self) -> Result<NewBill, ApiError> {
        let invoice_date = parse_invoice_date(self.invoice_date.as_ref().and_then(Value::as_str))?;

        Ok(NewBill {
            supplier_id: parse_supplier_id(self.supplier_id)?,
            invoice_number: required_string("invoiceNumber", self.invoice_number)?,
            invoice_date,
            classification: required_string("classification", self.classification)?,
            description: required_string("description", self.description)?,
        })
    }
}

/// Accepts a JSON integer or a string holding one; HTML form selects send the
/// latter.
fn parse_supplier_id(value: Option<Value>) -> Result<i64, ApiError> {
    match value {
        None | Some(Value::Null) => Err(ApiError::Validation(
            "el campo 'supplierId' es obligatorio".to_string(),
        )),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(invalid_supplier_id),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid_supplier_id()),
        Some(_) => Err(invalid_supplier_id()),
    }
}

fn invalid_supplier_id() -> ApiError {
    ApiError::Validation("el campo 'supplierId' debe ser un número entero".to_string())
}

#[handler]
pub async fn list_bills(depot: &mut Depot, res: &mut Response) {
    let store = match web_state(depot) {
        Ok(state) => state.db_manager.bill_store(),
        Err(err) => {
            render_error(res, &err, None);
            return;
        }
    };

    match store.list_bills().await {
        Ok(bills) => {
            res.status_code(StatusCode::OK);
            res.render(Json(json!({ "bills": bills })));
        }
        Err(err) => render_error(res, &ApiError::Internal(err.to_string()), None),
    }
}

#[handler]
pub async fn create_bill(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let store = match web_state(depot) {
        Ok(state) => state.db_manager.bill_store(),
        Err(err) => {
            render_error(res, &err, Some(CREATE_CONTEXT));
            return;
        }
    };

    match insert_bill(req, store.as_ref()).await {
        Ok(bill) => {
            info!(
                bill_id = bill.id,
                supplier_id = bill.supplier_id,
                invoice_number = %bill.invoice_number,
                "bill created"
            );
            res.status_code(StatusCode::CREATED);
            res.render(Json(json!({ "message": CREATED_MESSAGE })));
        }
        Err(err) => render_error(res, &err, Some(CREATE_CONTEXT)),
    }
}

async fn insert_bill(req: &mut Request, store: &dyn BillStore) -> Result<Bill, ApiError> {
    let new_bill = req
        .parse_json::<CreateBillRequest>()
        .await
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?
        .validate()?;

    store.create_bill(&new_bill).await.map_err(|err| match err {
        DatabaseError::ForeignKeyViolation(_) => ApiError::UnknownSupplier(new_bill.supplier_id),
        other => ApiError::Internal(other.to_string()),
    })
}
