use serde::{Deserialize, Serialize};
use crate::models::domain::{Profile, ScoredProfile};

/// Response for the browse endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseResponse {
    pub matches: Vec<ScoredProfile>,
    pub total_candidates: usize,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub profiles: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response carrying a single created or updated profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub message: String,
    pub profile: Profile,
}

/// Response for starting or resending a verification session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpSessionResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Response for a confirmed phone verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPhoneResponse {
    pub verified: bool,
    pub message: String,
    pub profile: Profile,
}
