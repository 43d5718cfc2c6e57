use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{FilterSpec, Gender, UserType};

/// Request to browse profiles through a filter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BrowseRequest {
    #[serde(alias = "viewer_id", rename = "viewerId", default)]
    pub viewer_id: Option<String>,
    #[serde(flatten)]
    pub filters: FilterSpec,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Optional viewer identity carried on read endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerQuery {
    #[serde(alias = "viewer_id", rename = "viewerId", default)]
    pub viewer_id: Option<String>,
}

/// Request to post a flat listing on behalf of an existing profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostFlatRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "poster_id", rename = "posterId")]
    pub poster_id: String,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub location: String,
    pub rent: u64,
    #[serde(alias = "poster_type", rename = "posterType")]
    pub poster_type: UserType,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(alias = "flat_type", rename = "flatType", default)]
    pub flat_type: Option<String>,
    #[serde(default)]
    pub furnishing: Option<String>,
    #[serde(alias = "gender_preference", rename = "genderPreference", default)]
    pub gender_preference: Option<Gender>,
    #[serde(default)]
    pub availability: Option<String>,
}

/// Request to start a phone verification session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(length(min = 10, max = 16))]
    pub phone: String,
}

/// Request to replace a session with a fresh code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendOtpRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
}

/// Request to confirm a code and mark the profile's phone as verified
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmOtpRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
    #[validate(length(equal = 6))]
    pub code: String,
    #[validate(email)]
    pub email: String,
}
