pub mod animals;
pub mod export;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// `/api/animals/...` routes. Static segments (`search`, `species/list`,
/// `export`) take precedence over the `:id` / `:species` captures.
fn animal_routes() -> Router<ServerState> {
    Router::new()
        .route("/api/animals", get(animals::list).post(animals::create).delete(animals::delete_all))
        .route("/api/animals/search", get(animals::search))
        .route("/api/animals/search/prefix", get(animals::search_prefix))
        .route("/api/animals/age-range", get(animals::age_range))
        .route("/api/animals/younger/:age", get(animals::younger))
        .route("/api/animals/older/:age", get(animals::older))
        .route("/api/animals/species", get(animals::by_species_set))
        .route("/api/animals/species/list", get(animals::species_list))
        .route("/api/animals/species/:species", get(animals::by_species))
        .route("/api/animals/species/:species/age-range", get(animals::by_species_and_age_range))
        .route("/api/animals/species/:species/count", get(animals::count_by_species))
        .route("/api/animals/export", get(export::list_files))
        .route("/api/animals/export/download/:filename", get(export::download))
        .route("/api/animals/export/:format", get(export::export))
        .route("/api/animals/:id", get(animals::get).put(animals::update).delete(animals::delete))
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    public
        .merge(animal_routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
