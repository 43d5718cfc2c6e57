// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Profile, ProfileKind, UserType, Intent, Gender, Verifications, PostedBy, Constraint,
    ValueRange, FilterSpec, ScoringBaseline, CompatibilityLabel, CompatibilityReport, ScoredProfile,
};
pub use requests::{BrowseRequest, ViewerQuery, PostFlatRequest, SendOtpRequest, ResendOtpRequest, ConfirmOtpRequest};
pub use responses::{BrowseResponse, HealthResponse, ErrorResponse, ProfileResponse, OtpSessionResponse, VerifyPhoneResponse};
