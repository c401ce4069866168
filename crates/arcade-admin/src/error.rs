use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use arcade_core::catalog::CatalogError;

use crate::store::StoreError;
use crate::writer::WriteError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Conflict(m) | Self::Internal(m) => {
                write!(f, "{m}")
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            Self::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            Self::Internal(m) => {
                tracing::error!("Request failed: {m}");
                (StatusCode::INTERNAL_SERVER_ERROR, m.clone())
            },
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::EmptySlug
            | CatalogError::ReservedSlug { .. }
            | CatalogError::Parse(_) => Self::BadRequest(e.to_string()),
            CatalogError::SlugConflict { .. } => Self::Conflict(e.to_string()),
            CatalogError::UnknownGame(_) => Self::NotFound(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        Self::Internal(format!("failed to save catalog: {e}"))
    }
}

impl From<WriteError> for AppError {
    fn from(e: WriteError) -> Self {
        Self::Internal(format!("failed to write page: {e}"))
    }
}
