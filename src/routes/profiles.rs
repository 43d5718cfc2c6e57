use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde_json::{Map, Value};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{
    BrowseRequest, BrowseResponse, HealthResponse, PostFlatRequest, Profile, ProfileResponse,
    ViewerQuery,
};
use crate::routes::{error_response, repository_error_response, resolve_viewer};
use crate::services::{build_flat_listing, prepare_signup, PhoneVerifier, ProfileRepository};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ProfileRepository>,
    pub verifier: PhoneVerifier,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all profile routes
///
/// Literal paths are registered before `{id}` so they are not shadowed.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/profiles/browse", web::post().to(browse_profiles))
        .route("/profiles/flat", web::post().to(post_flat))
        .route("/profiles/email/{email}", web::get().to(get_profile_by_email))
        .route("/profiles/{id}/compatibility", web::get().to(get_compatibility))
        .service(
            web::resource("/profiles")
                .route(web::get().to(list_profiles))
                .route(web::post().to(create_profile)),
        )
        .service(
            web::resource("/profiles/{id}")
                .route(web::get().to(get_profile))
                .route(web::put().to(update_profile)),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, profiles) = match state.repository.count().await {
        Ok(count) => ("healthy", count),
        Err(e) => {
            tracing::warn!("Health check could not count profiles: {}", e);
            ("degraded", 0)
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        profiles,
        timestamp: chrono::Utc::now(),
    })
}

/// List every profile
///
/// GET /api/v1/profiles?viewerId={viewerId}
async fn list_profiles(
    state: web::Data<AppState>,
    query: web::Query<ViewerQuery>,
) -> HttpResponse {
    let viewer = match resolve_viewer(&state, query.viewer_id.as_deref()).await {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };

    match state.repository.list_profiles().await {
        Ok(profiles) => {
            let visible: Vec<Profile> = profiles
                .iter()
                .map(|p| p.visible_to(viewer.as_ref()))
                .collect();
            HttpResponse::Ok().json(visible)
        }
        Err(e) => {
            tracing::error!("Failed to list profiles: {}", e);
            repository_error_response(&e, "Failed to list profiles")
        }
    }
}

/// GET /api/v1/profiles/{id}?viewerId={viewerId}
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ViewerQuery>,
) -> HttpResponse {
    let viewer = match resolve_viewer(&state, query.viewer_id.as_deref()).await {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };

    match state.repository.get_profile_by_id(&path).await {
        Ok(profile) => HttpResponse::Ok().json(profile.visible_to(viewer.as_ref())),
        Err(e) => repository_error_response(&e, "Profile not found"),
    }
}

/// GET /api/v1/profiles/email/{email}?viewerId={viewerId}
async fn get_profile_by_email(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ViewerQuery>,
) -> HttpResponse {
    let viewer = match resolve_viewer(&state, query.viewer_id.as_deref()).await {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };

    match state.repository.get_profile_by_email(&path).await {
        Ok(profile) => HttpResponse::Ok().json(profile.visible_to(viewer.as_ref())),
        Err(e) => repository_error_response(&e, "Profile not found"),
    }
}

/// Create a profile at signup
///
/// POST /api/v1/profiles
async fn create_profile(
    state: web::Data<AppState>,
    req: web::Json<Profile>,
) -> HttpResponse {
    let profile = prepare_signup(req.into_inner());

    if let Err(errors) = profile.validate() {
        tracing::info!("Validation failed for create_profile: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.repository.create_profile(profile).await {
        Ok(created) => {
            tracing::info!("Created {:?} profile {}", created.kind, created.id);
            HttpResponse::Created().json(ProfileResponse {
                message: "Profile created successfully!".to_string(),
                profile: created,
            })
        }
        Err(e) => repository_error_response(&e, "Error creating profile"),
    }
}

/// Post a flat listing on behalf of an existing profile
///
/// POST /api/v1/profiles/flat
///
/// Request body:
/// ```json
/// {
///   "posterId": "string",
///   "title": "string",
///   "location": "area, city",
///   "rent": 25000,
///   "posterType": "owner|broker|student|professional",
///   "amenities": ["WiFi"],
///   "flatType": "2BHK",
///   "furnishing": "Semi-Furnished"
/// }
/// ```
async fn post_flat(
    state: web::Data<AppState>,
    req: web::Json<PostFlatRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for post_flat: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let poster = match state.repository.get_profile_by_id(&req.poster_id).await {
        Ok(poster) => poster,
        Err(e) => return repository_error_response(&e, "Poster not found"),
    };

    let listing = build_flat_listing(&poster, req.into_inner());

    match state.repository.create_profile(listing).await {
        Ok(created) => {
            tracing::info!("Profile {} posted flat listing {}", poster.id, created.id);
            HttpResponse::Created().json(ProfileResponse {
                message: "Your flat has been posted.".to_string(),
                // posterId is not proof of identity
                profile: created.visible_to(None),
            })
        }
        Err(e) => repository_error_response(&e, "Error posting flat"),
    }
}

/// Shallow update of an existing profile
///
/// PUT /api/v1/profiles/{id}?viewerId={viewerId}
///
/// Verification flags are owned by the verification flow and are ignored here.
/// The updated profile is returned through the same contact projection as reads.
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ViewerQuery>,
    req: web::Json<Map<String, Value>>,
) -> HttpResponse {
    let viewer = match resolve_viewer(&state, query.viewer_id.as_deref()).await {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };

    let mut fields = req.into_inner();
    if fields.remove("verifications").is_some() {
        tracing::info!("Ignoring verifications in update for profile {}", path.as_str());
    }

    match state.repository.update_profile(&path, fields).await {
        Ok(updated) => HttpResponse::Ok().json(ProfileResponse {
            message: "Profile updated successfully!".to_string(),
            profile: updated.visible_to(viewer.as_ref()),
        }),
        Err(e) => repository_error_response(&e, "Error updating profile"),
    }
}

/// Browse profiles through a filter
///
/// POST /api/v1/profiles/browse
///
/// Request body:
/// ```json
/// {
///   "viewerId": "string",
///   "purpose": "all|flatmate|flat",
///   "userType": "any|student|professional|owner|broker",
///   "gender": "any|male|female|other",
///   "roomType": "any|Private Room|Shared Room",
///   "budgetRange": [0, 100000],
///   "ageRange": [18, 60],
///   "selectedTags": ["Clean"],
///   "selectedAmenities": ["WiFi"],
///   "searchQuery": "string",
///   "limit": 50
/// }
/// ```
async fn browse_profiles(
    state: web::Data<AppState>,
    req: web::Json<BrowseRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for browse request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let viewer = match resolve_viewer(&state, req.viewer_id.as_deref()).await {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };

    let candidates = match state.repository.list_profiles().await {
        Ok(profiles) => profiles,
        Err(e) => {
            tracing::error!("Failed to load profiles for browse: {}", e);
            return repository_error_response(&e, "Failed to load profiles");
        }
    };

    let limit = state.matching.effective_limit(req.limit);

    tracing::debug!("Browsing {} candidates, limit: {}", candidates.len(), limit);

    let result = state
        .matcher
        .browse(viewer.as_ref(), candidates, &req.filters, limit);

    let response = BrowseResponse {
        total_results: result.matches.len(),
        total_candidates: result.total_candidates,
        matches: result.matches,
    };

    tracing::info!(
        "Returning {} profiles (from {} candidates)",
        response.total_results,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Compatibility report between the viewer and one candidate
///
/// GET /api/v1/profiles/{id}/compatibility?viewerId={viewerId}
async fn get_compatibility(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ViewerQuery>,
) -> HttpResponse {
    let viewer = match resolve_viewer(&state, query.viewer_id.as_deref()).await {
        Ok(viewer) => viewer,
        Err(response) => return response,
    };

    match state.repository.get_profile_by_id(&path).await {
        Ok(candidate) => {
            HttpResponse::Ok().json(state.matcher.compatibility(viewer.as_ref(), &candidate))
        }
        Err(e) => repository_error_response(&e, "Profile not found"),
    }
}
