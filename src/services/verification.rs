use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during phone verification
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Invalid session. Please request a new OTP.")]
    InvalidSession,

    #[error("OTP has expired. Please request a new one.")]
    Expired,

    #[error("Invalid OTP. Please try again.")]
    InvalidCode,

    #[error("Failed to send OTP: {0}")]
    Transport(String),
}

/// A pending one-time-password challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpSession {
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Session id and expiry handed back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedSession {
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Storage for pending verification sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session_id: String, session: OtpSession);

    async fn get(&self, session_id: &str) -> Option<OtpSession>;

    async fn remove(&self, session_id: &str);
}

/// Delivery channel for one-time codes
#[async_trait]
pub trait OtpTransport: Send + Sync {
    async fn deliver(&self, phone: &str, code: &str) -> Result<(), VerificationError>;
}

/// Session store backed by a bounded moka cache
///
/// Entries are evicted after `retention`. Expiry of the code itself is
/// checked against `OtpSession::expires_at`, so retention only needs to be
/// at least as long as the OTP lifetime.
pub struct MokaSessionStore {
    sessions: moka::future::Cache<String, OtpSession>,
}

impl MokaSessionStore {
    pub fn new(max_sessions: u64, retention: Duration) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_live(retention)
            .build();

        Self { sessions }
    }

    /// Store sized for codes that live for `otp_ttl`
    ///
    /// Entries are kept for twice the code lifetime so a late attempt is
    /// reported as `Expired` rather than `InvalidSession`.
    pub fn for_ttl(max_sessions: u64, otp_ttl: Duration) -> Self {
        Self::new(max_sessions, otp_ttl.saturating_mul(2))
    }
}

#[async_trait]
impl SessionStore for MokaSessionStore {
    async fn insert(&self, session_id: String, session: OtpSession) {
        self.sessions.insert(session_id, session).await;
    }

    async fn get(&self, session_id: &str) -> Option<OtpSession> {
        self.sessions.get(session_id).await
    }

    async fn remove(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
    }
}

/// Transport that only writes the code to the log
///
/// Stands in for an SMS provider in development.
#[derive(Debug, Clone, Default)]
pub struct LogTransport;

#[async_trait]
impl OtpTransport for LogTransport {
    async fn deliver(&self, phone: &str, code: &str) -> Result<(), VerificationError> {
        tracing::info!("OTP for {}: {}", phone, code);
        Ok(())
    }
}

/// Phone verification flow: issue, resend and check one-time codes
#[derive(Clone)]
pub struct PhoneVerifier {
    sessions: Arc<dyn SessionStore>,
    transport: Arc<dyn OtpTransport>,
    ttl: chrono::Duration,
}

impl PhoneVerifier {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        transport: Arc<dyn OtpTransport>,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            sessions,
            transport,
            ttl,
        }
    }

    /// Issue a fresh six-digit code for `phone`
    pub async fn send_otp(&self, phone: &str) -> Result<IssuedSession, VerificationError> {
        let code = fastrand::u32(100_000..1_000_000).to_string();
        let session_id = format!("session_{}", uuid::Uuid::new_v4().simple());
        let expires_at = Utc::now() + self.ttl;

        self.transport.deliver(phone, &code).await?;

        self.sessions
            .insert(
                session_id.clone(),
                OtpSession {
                    phone: phone.to_string(),
                    code,
                    expires_at,
                },
            )
            .await;

        tracing::debug!("Issued verification session {} for {}", session_id, phone);

        Ok(IssuedSession {
            session_id,
            expires_at,
        })
    }

    /// Check `code` against the session
    ///
    /// On success the session is consumed and the verified phone number is
    /// returned. A wrong code leaves the session in place for another try.
    pub async fn verify_otp(&self, session_id: &str, code: &str) -> Result<String, VerificationError> {
        let session = self
            .sessions
            .get(session_id)
            .await
            .ok_or(VerificationError::InvalidSession)?;

        if Utc::now() > session.expires_at {
            self.sessions.remove(session_id).await;
            return Err(VerificationError::Expired);
        }

        if session.code != code {
            return Err(VerificationError::InvalidCode);
        }

        self.sessions.remove(session_id).await;

        Ok(session.phone)
    }

    /// Replace an existing session with a new code for the same phone
    pub async fn resend_otp(&self, session_id: &str) -> Result<IssuedSession, VerificationError> {
        let session = self
            .sessions
            .get(session_id)
            .await
            .ok_or(VerificationError::InvalidSession)?;

        self.sessions.remove(session_id).await;
        self.send_otp(&session.phone).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingTransport {
        fn last_code(&self) -> String {
            self.sent
                .lock()
                .unwrap()
                .last()
                .map(|(_, code)| code.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl OtpTransport for RecordingTransport {
        async fn deliver(&self, phone: &str, code: &str) -> Result<(), VerificationError> {
            self.sent.lock().unwrap().push((phone.to_string(), code.to_string()));
            Ok(())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl OtpTransport for FailingTransport {
        async fn deliver(&self, _phone: &str, _code: &str) -> Result<(), VerificationError> {
            Err(VerificationError::Transport("provider unavailable".to_string()))
        }
    }

    fn create_verifier(ttl: chrono::Duration) -> (PhoneVerifier, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let store = Arc::new(MokaSessionStore::new(100, Duration::from_secs(600)));
        (PhoneVerifier::new(store, transport.clone(), ttl), transport)
    }

    #[tokio::test]
    async fn test_send_and_verify() {
        let (verifier, transport) = create_verifier(chrono::Duration::minutes(5));

        let issued = verifier.send_otp("+919812345678").await.unwrap();
        let code = transport.last_code();
        assert_eq!(code.len(), 6);

        let phone = verifier.verify_otp(&issued.session_id, &code).await.unwrap();
        assert_eq!(phone, "+919812345678");

        // consumed
        assert!(matches!(
            verifier.verify_otp(&issued.session_id, &code).await,
            Err(VerificationError::InvalidSession)
        ));
    }

    #[tokio::test]
    async fn test_wrong_code_keeps_session() {
        let (verifier, transport) = create_verifier(chrono::Duration::minutes(5));

        let issued = verifier.send_otp("+919812345678").await.unwrap();
        let code = transport.last_code();
        let wrong = if code == "000000" { "111111" } else { "000000" };

        assert!(matches!(
            verifier.verify_otp(&issued.session_id, wrong).await,
            Err(VerificationError::InvalidCode)
        ));
        assert!(verifier.verify_otp(&issued.session_id, &code).await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_session() {
        let (verifier, transport) = create_verifier(chrono::Duration::seconds(-1));

        let issued = verifier.send_otp("+919812345678").await.unwrap();
        let code = transport.last_code();

        assert!(matches!(
            verifier.verify_otp(&issued.session_id, &code).await,
            Err(VerificationError::Expired)
        ));
        assert!(matches!(
            verifier.verify_otp(&issued.session_id, &code).await,
            Err(VerificationError::InvalidSession)
        ));
    }

    #[tokio::test]
    async fn test_late_code_reports_expired() {
        let transport = Arc::new(RecordingTransport::default());
        let store = Arc::new(MokaSessionStore::for_ttl(100, Duration::from_secs(1)));
        let verifier = PhoneVerifier::new(store, transport.clone(), chrono::Duration::seconds(1));

        let issued = verifier.send_otp("+919812345678").await.unwrap();
        tokio::time::sleep(Duration::from_millis(1300)).await;

        assert!(matches!(
            verifier.verify_otp(&issued.session_id, &transport.last_code()).await,
            Err(VerificationError::Expired)
        ));
    }

    #[tokio::test]
    async fn test_resend_replaces_session() {
        let (verifier, transport) = create_verifier(chrono::Duration::minutes(5));

        let first = verifier.send_otp("+919812345678").await.unwrap();
        let second = verifier.resend_otp(&first.session_id).await.unwrap();
        assert_ne!(first.session_id, second.session_id);

        let code = transport.last_code();
        assert!(matches!(
            verifier.verify_otp(&first.session_id, &code).await,
            Err(VerificationError::InvalidSession)
        ));
        assert_eq!(verifier.verify_otp(&second.session_id, &code).await.unwrap(), "+919812345678");
    }

    #[tokio::test]
    async fn test_resend_unknown_session() {
        let (verifier, _) = create_verifier(chrono::Duration::minutes(5));
        assert!(matches!(
            verifier.resend_otp("session_missing").await,
            Err(VerificationError::InvalidSession)
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_issues_nothing() {
        let store = Arc::new(MokaSessionStore::new(100, Duration::from_secs(600)));
        let verifier = PhoneVerifier::new(store, Arc::new(FailingTransport), chrono::Duration::minutes(5));

        assert!(matches!(
            verifier.send_otp("+919812345678").await,
            Err(VerificationError::Transport(_))
        ));
    }
}
