use salvo::prelude::*;
use serde_json::json;
use tracing::warn;

use crate::db::{BillStore, DatabaseError, SupplierStore};
use crate::web::web_state;

/// Reports liveness plus row counts. The counts double as a storage check: a
/// failing query turns the answer into 503.
#[handler]
pub async fn health_check(depot: &mut Depot, res: &mut Response) {
    let (started_at, supplier_store, bill_store) = match web_state(depot) {
        Ok(state) => (
            state.started_at,
            state.db_manager.supplier_store(),
            state.db_manager.bill_store(),
        ),
        Err(err) => {
            warn!(error = %err, "health check without web state");
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);
            res.render(Json(json!({ "status": "unavailable" })));
            return;
        }
    };

    let counts = row_counts(supplier_store.as_ref(), bill_store.as_ref()).await;

    let uptime_seconds = started_at.elapsed().as_secs();
    match counts {
        Ok((suppliers, bills)) => {
            res.status_code(StatusCode::OK);
            res.render(Json(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
                "uptime_seconds": uptime_seconds,
                "suppliers": suppliers,
                "bills": bills,
            })));
        }
        Err(err) => {
            warn!(error = %err, "health check could not reach the database");
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);
            res.render(Json(json!({
                "status": "unavailable",
                "version": env!("CARGO_PKG_VERSION"),
                "uptime_seconds": uptime_seconds,
            })));
        }
    }
}

async fn row_counts(
    suppliers: &dyn SupplierStore,
    bills: &dyn BillStore,
) -> Result<(i64, i64), DatabaseError> {
    Ok((suppliers.count_suppliers().await?, bills.count_bills().await?))
}
