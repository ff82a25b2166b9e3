//! The features of the service, one module per resource.

use crate::infra::state::AppState;
use axum::Router;

pub mod health;
pub mod item;

/// Every feature's endpoints.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(item::item_api::routes())
        .merge(health::health_api::routes())
}
