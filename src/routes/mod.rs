// Route exports
pub mod profiles;
pub mod verification;

use actix_web::{http::StatusCode, web, HttpResponse};
use crate::models::{ErrorResponse, Profile};
use crate::services::RepositoryError;

pub use profiles::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(profiles::configure)
            .configure(verification::configure),
    );
}

/// Build a JSON error body with the given status
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

/// Map a repository failure onto the matching HTTP status
pub(crate) fn repository_error_response(err: &RepositoryError, context: &str) -> HttpResponse {
    let status = match err {
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::DuplicateEmail(_) => StatusCode::CONFLICT,
        RepositoryError::Invalid(_) | RepositoryError::InvalidUpdate(_) => StatusCode::BAD_REQUEST,
    };

    if status == StatusCode::NOT_FOUND {
        tracing::debug!("{}: {}", context, err);
    } else {
        tracing::info!("{}: {}", context, err);
    }

    error_response(status, context, err)
}

/// Look up the optional viewer; an unknown id is reported as 404
pub(crate) async fn resolve_viewer(
    state: &AppState,
    viewer_id: Option<&str>,
) -> Result<Option<Profile>, HttpResponse> {
    let Some(viewer_id) = viewer_id.filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    match state.repository.get_profile_by_id(viewer_id).await {
        Ok(viewer) => Ok(Some(viewer)),
        Err(e) => Err(repository_error_response(&e, "Viewer not found")),
    }
}
