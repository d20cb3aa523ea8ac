use axum::{extract::State, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};

use common::types::Health;
use service::gapminder::Row;

use crate::errors::ApiError;
use crate::state::AppState;

pub async fn health() -> Json<Health> {
    Json(Health::ready())
}

pub async fn get_gapminder(State(state): State<AppState>) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = state.source.fetch_all().await?;
    debug!(source = state.source.name(), rows = rows.len(), "gapminder rows served");
    Ok(Json(rows))
}

/// Build the application router: health check, data route, CORS and tracing.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/gapminder", get(get_gapminder))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
