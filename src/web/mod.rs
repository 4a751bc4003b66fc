use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use salvo::affix_state;
use salvo::logging::Logger;
use salvo::prelude::*;
use tracing::{error, info};

use crate::config::Config;
use crate::db::DatabaseManager;

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validation;

use self::error::ApiError;
use self::handlers::{
    bills::{create_bill, list_bills},
    health::health_check,
    suppliers::{create_supplier, list_suppliers},
};
use self::middleware::cors::cors_handler;

/// Shared state handed to every request through the depot.
#[derive(Clone)]
pub struct WebState {
    pub db_manager: DatabaseManager,
    pub started_at: Instant,
}

impl WebState {
    pub fn new(db_manager: DatabaseManager) -> Self {
        Self {
            db_manager,
            started_at: Instant::now(),
        }
    }
}

pub fn web_state(depot: &Depot) -> Result<&WebState, ApiError> {
    depot
        .obtain::<WebState>()
        .map_err(|_| ApiError::Internal("web state is not injected into the depot".to_string()))
}

pub fn create_router(state: WebState) -> Router {
    Router::new()
        .hoop(affix_state::inject(state))
        .push(Router::with_path("health").get(health_check))
        .push(
            Router::with_path("api")
                .push(
                    Router::with_path("suppliers")
                        .get(list_suppliers)
                        .post(create_supplier),
                )
                .push(Router::with_path("bills").get(list_bills).post(create_bill)),
        )
}

/// Router wrapped with access logging and CORS. CORS sits on the service so
/// that preflight requests to any path are answered.
pub fn create_service(config: &Config, state: WebState) -> Service {
    Service::new(create_router(state))
        .hoop(Logger::new())
        .hoop(cors_handler(&config.cors))
}

pub struct WebServer {
    config: Arc<Config>,
    state: WebState,
}

impl WebServer {
    pub fn new(config: Arc<Config>, db_manager: DatabaseManager) -> Self {
        Self {
            config,
            state: WebState::new(db_manager),
        }
    }

    /// Serves until Ctrl-C, then drains in-flight requests.
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.server.listen_address();
        info!("Starting web server on {}", bind_addr);

        let acceptor = TcpListener::new(bind_addr).try_bind().await?;
        let server = Server::new(acceptor);
        let handle = server.handle();

        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for shutdown signal: {}", e);
                return;
            }
            info!("shutdown signal received");
            handle.stop_graceful(None);
        });

        server
            .serve(create_service(&self.config, self.state))
            .await;

        Ok(())
    }
}
