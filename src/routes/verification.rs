use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::{json, Map, Value};
use validator::Validate;
use crate::models::{
    ConfirmOtpRequest, OtpSessionResponse, ResendOtpRequest, SendOtpRequest, VerifyPhoneResponse,
};
use crate::routes::{error_response, repository_error_response, AppState};
use crate::services::VerificationError;

/// Configure phone verification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/verification/phone")
            .route("/send", web::post().to(send_otp))
            .route("/resend", web::post().to(resend_otp))
            .route("/confirm", web::post().to(confirm_otp)),
    );
}

fn verification_error_response(err: &VerificationError) -> HttpResponse {
    match err {
        VerificationError::Transport(_) => {
            tracing::error!("OTP delivery failed: {}", err);
            error_response(StatusCode::BAD_GATEWAY, "OTP delivery failed", err)
        }
        _ => {
            tracing::info!("Verification rejected: {}", err);
            error_response(StatusCode::BAD_REQUEST, "Verification failed", err)
        }
    }
}

/// POST /api/v1/verification/phone/send
async fn send_otp(
    state: web::Data<AppState>,
    req: web::Json<SendOtpRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for send_otp: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.verifier.send_otp(&req.phone).await {
        Ok(issued) => HttpResponse::Ok().json(OtpSessionResponse {
            success: true,
            message: "OTP sent successfully".to_string(),
            session_id: issued.session_id,
            expires_at: issued.expires_at,
        }),
        Err(e) => verification_error_response(&e),
    }
}

/// POST /api/v1/verification/phone/resend
async fn resend_otp(
    state: web::Data<AppState>,
    req: web::Json<ResendOtpRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for resend_otp: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.verifier.resend_otp(&req.session_id).await {
        Ok(issued) => HttpResponse::Ok().json(OtpSessionResponse {
            success: true,
            message: "OTP resent successfully".to_string(),
            session_id: issued.session_id,
            expires_at: issued.expires_at,
        }),
        Err(e) => verification_error_response(&e),
    }
}

/// Check the code and mark the account's phone as verified
///
/// POST /api/v1/verification/phone/confirm
///
/// Request body:
/// ```json
/// {
///   "sessionId": "session_...",
///   "code": "123456",
///   "email": "account@example.com"
/// }
/// ```
async fn confirm_otp(
    state: web::Data<AppState>,
    req: web::Json<ConfirmOtpRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for confirm_otp: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let phone = match state.verifier.verify_otp(&req.session_id, &req.code).await {
        Ok(phone) => phone,
        Err(e) => return verification_error_response(&e),
    };

    let profile = match state.repository.get_profile_by_email(&req.email).await {
        Ok(profile) => profile,
        Err(e) => return repository_error_response(&e, "Profile not found"),
    };

    let mut verifications = profile.verifications;
    verifications.phone = true;

    let mut fields = Map::new();
    fields.insert("phone".to_string(), Value::String(phone));
    fields.insert("verifications".to_string(), json!(verifications));

    match state.repository.update_profile(&profile.id, fields).await {
        Ok(updated) => {
            tracing::info!("Phone verified for profile {}", updated.id);
            HttpResponse::Ok().json(VerifyPhoneResponse {
                verified: true,
                message: "Phone number verified successfully".to_string(),
                // the session proves a phone, not ownership of the account
                profile: updated.visible_to(None),
            })
        }
        Err(e) => repository_error_response(&e, "Error saving verification"),
    }
}
