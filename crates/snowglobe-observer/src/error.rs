//! Error types for the Observer API server.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body is `{"error": <notice>, "status": <code>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snowglobe_db::{DbError, SaveError};
use snowglobe_studio::StudioError;
use snowglobe_world::WorldError;

/// Errors that can occur in the Observer API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The requested resource was not found.
    #[error("{0}")]
    NotFound(String),

    /// The request was malformed or failed validation.
    #[error("{0}")]
    BadRequest(String),

    /// The request hit a village cap.
    #[error("{0}")]
    Conflict(String),

    /// A UUID could not be parsed from the request path.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// A collaborator (archive, content gateway) is not configured.
    #[error("{0} is not available")]
    Unavailable(&'static str),

    /// A collaborator failed.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::InvalidUuid(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<WorldError> for ObserverError {
    fn from(e: WorldError) -> Self {
        match e {
            WorldError::CapReached { .. }
            | WorldError::VillageFull { .. }
            | WorldError::TooManyResidents { .. }
            | WorldError::InteriorFull { .. } => Self::Conflict(e.to_string()),
            WorldError::EntityNotFound(_) | WorldError::InteriorItemNotFound { .. } => {
                Self::NotFound(e.to_string())
            }
            WorldError::NotAStructure(_) => Self::BadRequest(e.to_string()),
        }
    }
}

impl From<DbError> for ObserverError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(id) => Self::NotFound(format!("village {id} not found")),
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl From<SaveError> for ObserverError {
    fn from(e: SaveError) -> Self {
        match e {
            SaveError::Archive(db) => db.into(),
            SaveError::NoArchive => Self::Unavailable("village archive"),
            validation => Self::BadRequest(validation.to_string()),
        }
    }
}

impl From<StudioError> for ObserverError {
    fn from(e: StudioError) -> Self {
        match e {
            StudioError::EmptyDescription => Self::BadRequest(e.to_string()),
            StudioError::NotConfigured => Self::Unavailable("content generation"),
            StudioError::Template(msg) => Self::Internal(msg),
            other => Self::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use snowglobe_types::{EntityId, PaletteItem};

    use super::*;

    fn status_of(err: ObserverError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn cap_rejections_are_conflicts() {
        let err: ObserverError = WorldError::CapReached {
            item: PaletteItem::Tree,
            cap: 10,
        }
        .into();
        assert_eq!(err.to_string(), "Maximum of 10 Trees reached!");
        assert_eq!(status_of(err), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_entities_are_not_found() {
        let err: ObserverError = WorldError::EntityNotFound(EntityId::new()).into();
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn save_validation_is_a_bad_request() {
        let err: ObserverError = SaveError::EmptyVillage.into();
        assert_eq!(err.to_string(), "Add something to your village before saving!");
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_archive_is_unavailable() {
        let err: ObserverError = SaveError::NoArchive.into();
        assert_eq!(err.to_string(), "village archive is not available");
        assert_eq!(status_of(err), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn archive_failures_unwrap_to_storage_status() {
        let id = uuid::Uuid::new_v4();
        let err: ObserverError = SaveError::Archive(DbError::NotFound(id)).into();
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn studio_errors_map_by_cause() {
        assert_eq!(
            status_of(StudioError::EmptyDescription.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(StudioError::NotConfigured.into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(
                StudioError::Gateway {
                    status: 429,
                    body: String::new()
                }
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
    }
}
