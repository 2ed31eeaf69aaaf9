use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::FieldError;
use service::errors::ServiceError;
use tracing::error;

/// JSON error body: `{"status", "title", "detail", "errors": {field: message}}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
    pub errors: BTreeMap<&'static str, String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail, errors: BTreeMap::new() }
    }

    pub fn with_fields(mut self, fields: &[FieldError]) -> Self {
        for f in fields {
            self.errors.insert(f.field, f.message.clone());
        }
        self
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_validation() {
            let fields = e.field_errors().map(<[FieldError]>::to_vec).unwrap_or_default();
            return JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())).with_fields(&fields);
        }
        match e {
            ServiceError::NotFound(msg) => JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            other => {
                error!(err = %other, "request failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(other.to_string()))
            }
        }
    }
}

/// Fields a create/update body may carry.
const BODY_FIELDS: [&str; 3] = ["name", "species", "age"];
/// Query parameters accepted by the filter routes.
const QUERY_FIELDS: [&str; 5] = ["name", "prefix", "species", "min", "max"];

/// Field named by a deserializer message: either the `field: reason` form
/// produced for JSON bodies or the ``missing field `x` `` form.
fn rejected_field(detail: &str, known: &[&'static str]) -> Option<&'static str> {
    let reason = detail.split_once(": ").map_or(detail, |(_, rest)| rest);
    if let Some((path, _)) = reason.split_once(": ") {
        if let Some(f) = known.iter().copied().find(|f| *f == path) {
            return Some(f);
        }
    }
    known.iter().copied().find(|f| detail.contains(&format!("`{f}`")))
}

fn field_message(field: &str) -> String {
    match field {
        "age" | "min" | "max" => format!("{field} must be a whole number"),
        _ => format!("{field} must be a string"),
    }
}

fn invalid_input(detail: String, known: &[&'static str], fallback: &'static str) -> JsonApiError {
    let field = rejected_field(&detail, known);
    let mut err = JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail));
    match field {
        Some(f) => err.errors.insert(f, field_message(f)),
        None => err.errors.insert(fallback, "malformed input".to_string()),
    };
    err
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => invalid_input(detail, &BODY_FIELDS, "body"),
            JsonRejection::MissingJsonContentType(_) => {
                JsonApiError::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type", Some(detail))
            }
            _ => JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail)),
        }
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rejection: QueryRejection) -> Self {
        invalid_input(rejection.body_text(), &QUERY_FIELDS, "query")
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(rejection.body_text()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "status": self.status.as_u16(),
            "title": self.title,
            "detail": self.detail,
        });
        if !self.errors.is_empty() {
            body["errors"] = serde_json::json!(self.errors);
        }
        (self.status, Json(body)).into_response()
    }
}
