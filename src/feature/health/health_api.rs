//! Liveness of the service and its database.

use crate::infra::{
    database::{self, DbPool},
    error::{ApiResult, ErrorBody},
    extract::Json,
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

/// The health API endpoints.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// The answer of a healthy service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pong {
    #[schema(example = "PONG!")]
    message: String,
}

impl Pong {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Pings the database.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Healthy", body = Pong),
        (status = 500, description = "Database unreachable", body = ErrorBody),
    )
)]
#[instrument(skip_all)]
pub async fn health(State(db): State<DbPool>) -> ApiResult<Json<Pong>> {
    database::ping(&db).await?;
    Ok(Json(Pong {
        message: "PONG!".to_string(),
    }))
}
