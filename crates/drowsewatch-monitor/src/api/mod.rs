//! REST command API for the drowsewatch monitor.
//!
//! The remote command surface the external chat/bot layer drives. It only
//! reads the monitoring store and writes the recipient registration and
//! the running flag; it never talks to the classifiers directly.
//!
//! ## Endpoints
//!
//! - `GET  /api/v1/capabilities` - Capability listing
//! - `GET  /api/v1/monitor` - Latest and average readings per channel
//! - `PUT  /api/v1/recipient` - Register the alert recipient
//! - `POST /api/v1/shutdown` - Request cooperative shutdown

pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

pub use dto::*;
pub use error::ApiError;

use crate::store::MonitorStore;

/// Create the command API router.
///
/// # Example
///
/// ```rust,no_run
/// use drowsewatch_monitor::{create_router, MonitorStore};
///
/// #[tokio::main]
/// async fn main() {
///     let store = MonitorStore::with_defaults();
///     let app = create_router(store);
///     // ... serve with axum
/// }
/// ```
pub fn create_router(store: MonitorStore) -> Router {
    Router::new()
        .route("/api/v1/capabilities", get(handlers::capabilities))
        .route("/api/v1/monitor", get(handlers::monitor))
        .route("/api/v1/recipient", put(handlers::set_recipient))
        .route("/api/v1/shutdown", post(handlers::shutdown))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
