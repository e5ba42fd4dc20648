use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use auriga_core::error::CoreError;
use auriga_db::store::StoreError;
use auriga_scripts::ScriptError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`ScriptError`] for script
/// acquisition and transformation failures, and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `auriga_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A script acquisition or transformation error.
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// A persistence error from the store boundary.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Script(script) => classify_script_error(script),

            AppError::Store(StoreError::Duplicate) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                "Script already exists for this content hash".to_string(),
            ),
            AppError::Store(StoreError::Backend(msg)) => {
                tracing::error!(error = %msg, "Store backend error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a script error into an HTTP status, error code, and message.
///
/// - Unresolvable scripts and unknown revisions or instruments map to 404.
/// - Malformed job parameters map to 400.
/// - Remote repository failures map to 502: the fault is upstream,
///   not in this service.
fn classify_script_error(err: &ScriptError) -> (StatusCode, &'static str, String) {
    match err {
        ScriptError::Unavailable { .. }
        | ScriptError::RevisionNotFound { .. }
        | ScriptError::MissingTransform { .. } => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        ScriptError::MissingParameter { .. } => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        ScriptError::RemoteStatus { .. } | ScriptError::Request(_) => {
            tracing::error!(error = %err, "Upstream script repository error");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Script repository is unavailable".to_string(),
            )
        }
        ScriptError::Core(core) => classify_core_error(core),
        ScriptError::Io(_) | ScriptError::EmptyScript { .. } => {
            tracing::error!(error = %err, "Script acquisition error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn script_errors_map_to_expected_statuses() {
        assert_eq!(
            status_of(AppError::Script(ScriptError::Unavailable {
                instrument: "mari".into()
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Script(ScriptError::RevisionNotFound {
                instrument: "mari".into(),
                revision: "abc".into()
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Script(ScriptError::MissingTransform {
                instrument: "nope".into()
            })),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Script(ScriptError::MissingParameter {
                name: "runno".into()
            })),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Script(ScriptError::RemoteStatus { status: 500 })),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn store_duplicate_maps_to_conflict() {
        assert_eq!(
            status_of(AppError::Store(StoreError::Duplicate)),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn core_not_found_maps_to_404() {
        assert_eq!(
            status_of(AppError::Core(CoreError::NotFound {
                entity: "Job",
                id: 7
            })),
            StatusCode::NOT_FOUND
        );
    }
}
