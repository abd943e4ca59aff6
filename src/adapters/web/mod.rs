//! Web server adapter.
//!
//! Axum router exposing the read-only investor API as JSON, behind a CORS
//! layer restricted to the configured origins.

mod error;
mod handlers;

pub use error::WebError;
pub use handlers::*;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::error::InvestorError;
use crate::domain::settings::invalid;
use crate::ports::investor_port::InvestorPort;

pub struct AppState {
    pub investors: Arc<dyn InvestorPort + Send + Sync>,
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/investors", get(handlers::list_investors))
        .route("/api/investors/{id}", get(handlers::get_investor))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// CORS for an explicit origin list. Methods and headers mirror the request
/// so credentials can be allowed alongside them. A `*` entry allows any
/// origin, which is only valid without credentials.
pub fn cors_layer(origins: &[String], allow_credentials: bool) -> Result<CorsLayer, InvestorError> {
    let wildcard = origins.iter().any(|origin| origin == "*");
    if wildcard && allow_credentials {
        return Err(invalid(
            "web",
            "cors_origins",
            "'*' cannot be combined with cors_allow_credentials = true",
        ));
    }

    let allow_origin = if wildcard {
        AllowOrigin::any()
    } else {
        let origins = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|e| invalid("web", "cors_origins", format!("'{origin}': {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    let layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(allow_credentials);

    Ok(if allow_credentials {
        layer
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    } else {
        layer
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(tower_http::cors::Any)
    })
}
