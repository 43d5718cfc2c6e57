// Service exports
pub mod onboarding;
pub mod repository;
pub mod seed;
pub mod verification;

pub use onboarding::{ProfileOrigin, seed_baseline, prepare_signup, build_flat_listing};
pub use repository::{ProfileRepository, InMemoryProfileRepository, RepositoryError};
pub use seed::{seed_if_empty, load_seed_file, SeedError};
pub use verification::{
    PhoneVerifier, SessionStore, MokaSessionStore, OtpTransport, LogTransport, OtpSession,
    IssuedSession, VerificationError,
};
