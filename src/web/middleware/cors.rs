use salvo::cors::{AllowHeaders, AllowOrigin, Cors, CorsHandler};
use salvo::http::{HeaderValue, Method};
use tracing::warn;

use crate::config::CorsConfig;

pub fn cors_handler(config: &CorsConfig) -> CorsHandler {
    let allow_origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.allowed_origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| warn!(%origin, "ignoring malformed CORS origin"))
                .ok()
        }))
    };

    Cors::new()
        .allow_origin(allow_origin)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::any())
        .into_handler()
}
