use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON body every error renders to.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing input, rejected before any store access.
    #[error("{0}")]
    Validation(String),

    /// Missing, invalid or expired credentials or token.
    #[error("{0}")]
    Auth(&'static str),

    /// No matching resource owned by the caller.
    #[error("{0}")]
    NotFound(&'static str),

    /// Store-level uniqueness violation.
    #[error("{0}")]
    Conflict(&'static str),

    /// Store or unexpected failure. Only `public` reaches the caller; the
    /// source is logged server-side.
    #[error("{public}")]
    Internal {
        public: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(public: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            public,
            source: source.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { public, ref source } = self {
            tracing::error!(error = ?source, public, "internal error");
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// True when the error wraps a Postgres unique-constraint violation
/// (SQLSTATE 23505).
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|db| db.code())
        .map_or(false, |code| code == "23505")
}
