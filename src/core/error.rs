//! Error types for the catalog service.
//!
//! Only two things can fail a request: the root entity is missing from its
//! primary table, or an upstream table could not be fetched or parsed.
//! Missing cross-references are not errors; the assembler omits the field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Kind of root entity a request asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Character,
    Lightcone,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Character => "Character",
            Self::Lightcone => "Lightcone",
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The requested root entity has no record in its primary table.
    #[error("{} not found", kind.label())]
    NotFound { kind: EntityKind, id: String },

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Upstream returned {status} for table {table}")]
    UpstreamStatus { table: String, status: u16 },

    #[error("Malformed table {table}: {reason}")]
    Malformed { table: String, reason: String },
}

impl CatalogError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::UpstreamStatus { .. } | Self::Malformed { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::NotFound { id, .. } => log::debug!("{self} (id={id})"),
            _ => log::error!("Request failed: {self}"),
        }

        (
            status,
            Json(serde_json::json!({
                "statusCode": status.as_u16(),
                "statusMessage": self.to_string(),
            })),
        )
            .into_response()
    }
}
