use salvo::prelude::*;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::db::{DatabaseError, NewSupplier, Supplier, SupplierStore};
use crate::web::error::{ApiError, render_error};
use crate::web::validation::required_text;
use crate::web::web_state;

const CREATE_CONTEXT: &str = "Error al guardar proveedor";

#[derive(Debug, Deserialize)]
struct CreateSupplierRequest {
    name: Option<String>,
    cuit: Option<String>,
}

impl CreateSupplierRequest {
    fn validate(self) -> Result<NewSupplier, ApiError> {
        Ok(NewSupplier {
            name: required_text("name", self.name)?,
            cuit: required_text("cuit", self.cuit)?,
        })
    }
}

#[handler]
pub async fn list_suppliers(depot: &mut Depot, res: &mut Response) {
    let store = match web_state(depot) {
        Ok(state) => state.db_manager.supplier_store(),
        Err(err) => {
            render_error(res, &err, None);
            return;
        }
    };

    match store.list_suppliers().await {
        Ok(suppliers) => {
            res.status_code(StatusCode::OK);
            res.render(Json(json!({ "suppliers": suppliers })));
        }
        Err(err) => render_error(res, &ApiError::Internal(err.to_string()), None),
    }
}

#[handler]
pub async fn create_supplier(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let store = match web_state(depot) {
        Ok(state) => state.db_manager.supplier_store(),
        Err(err) => {
            render_error(res, &err, Some(CREATE_CONTEXT));
            return;
        }
    };

    match insert_supplier(req, store.as_ref()).await {
        Ok(supplier) => {
            info!(supplier_id = supplier.id, cuit = %supplier.cuit, "supplier created");
            res.status_code(StatusCode::CREATED);
            res.render(Json(supplier));
        }
        Err(err) => render_error(res, &err, Some(CREATE_CONTEXT)),
    }
}

async fn insert_supplier(
    req: &mut Request,
    store: &dyn SupplierStore,
) -> Result<Supplier, ApiError> {
    let new_supplier = req
        .parse_json::<CreateSupplierRequest>()
        .await
        .map_err(|e| ApiError::InvalidBody(e.to_string()))?
        .validate()?;

    store
        .create_supplier(&new_supplier)
        .await
        .map_err(|err| match err {
            DatabaseError::UniqueViolation(_) => ApiError::DuplicateCuit(new_supplier.cuit.clone()),
            other => ApiError::Internal(other.to_string()),
        })
}
