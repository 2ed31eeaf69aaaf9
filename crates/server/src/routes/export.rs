use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use service::export::ExportFormat;
use tracing::info;

use crate::{errors::JsonApiError, extract::ApiPath, state::ServerState};

#[derive(Debug, Serialize)]
pub struct ExportResult {
    pub message: String,
    pub path: String,
}

#[utoipa::path(
    get, path = "/api/animals/export/{format}", tag = "export",
    params(("format" = String, Path, description = "json, csv or txt")),
    responses(
        (status = 200, description = "File written", body = crate::openapi::ExportResultDoc),
        (status = 404, description = "Unknown format")
    )
)]
pub async fn export(State(state): State<ServerState>, WithRejection(Path(format), _): ApiPath<String>) -> Result<Json<ExportResult>, JsonApiError> {
    let format: ExportFormat = format.parse()?;
    let path = state.animals.export(format).await?;
    Ok(Json(ExportResult { message: format!("Animals exported to file: {}", path), path }))
}

#[utoipa::path(get, path = "/api/animals/export", tag = "export", responses((status = 200, description = "Generated file names", body = [String])))]
pub async fn list_files(State(state): State<ServerState>) -> Json<Vec<String>> {
    Json(state.animals.exported_files().await)
}

#[utoipa::path(
    get, path = "/api/animals/export/download/{filename}", tag = "export",
    params(("filename" = String, Path, description = "Name returned by the listing")),
    responses(
        (status = 200, description = "File bytes"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn download(State(state): State<ServerState>, WithRejection(Path(filename), _): ApiPath<String>) -> Result<Response, JsonApiError> {
    let file = state.animals.load_export(&filename).await?;
    info!(filename = %file.filename, size = file.bytes.len(), "serving export file");
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::ACCESS_CONTROL_EXPOSE_HEADERS, header::CONTENT_DISPOSITION.as_str().to_string()),
        ],
        file.bytes,
    )
        .into_response())
}
