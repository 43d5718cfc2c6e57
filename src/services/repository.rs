use crate::models::Profile;
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::RwLock;
use validator::Validate;

/// Errors that can occur at the profile store boundary
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("An account with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Invalid profile: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Invalid update: {0}")]
    InvalidUpdate(String),
}

/// Profile persistence used by the service layer
///
/// The filtering and scoring core never talks to this directly; handlers take
/// a snapshot through `list_profiles` and hand it over.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// All profiles in insertion order
    async fn list_profiles(&self) -> Result<Vec<Profile>, RepositoryError>;

    async fn get_profile_by_id(&self, id: &str) -> Result<Profile, RepositoryError>;

    async fn get_profile_by_email(&self, email: &str) -> Result<Profile, RepositoryError>;

    /// Validate and store a new profile, assigning its id
    async fn create_profile(&self, profile: Profile) -> Result<Profile, RepositoryError>;

    /// Shallow-merge `fields` into the stored document
    async fn update_profile(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Profile, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// Fields a caller can never overwrite through an update
const IMMUTABLE_FIELDS: [&str; 3] = ["id", "_id", "createdAt"];

/// In-process profile store
///
/// Profiles live in a single vector so iteration order matches insertion
/// order. Lookups are linear scans.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<Vec<Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn list_profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        Ok(self.profiles.read().await.clone())
    }

    async fn get_profile_by_id(&self, id: &str) -> Result<Profile, RepositoryError> {
        self.profiles
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Profile {} not found", id)))
    }

    async fn get_profile_by_email(&self, email: &str) -> Result<Profile, RepositoryError> {
        self.profiles
            .read()
            .await
            .iter()
            .find(|p| p.email == email)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Profile not found for email {}", email)))
    }

    async fn create_profile(&self, mut profile: Profile) -> Result<Profile, RepositoryError> {
        profile.validate()?;

        let mut profiles = self.profiles.write().await;

        if profiles.iter().any(|p| p.email == profile.email) {
            return Err(RepositoryError::DuplicateEmail(profile.email));
        }

        if profile.id.is_empty() || profiles.iter().any(|p| p.id == profile.id) {
            profile.id = uuid::Uuid::new_v4().simple().to_string();
        }

        let now = chrono::Utc::now();
        profile.created_at.get_or_insert(now);
        profile.updated_at = Some(now);

        profiles.push(profile.clone());

        tracing::debug!("Created profile {} ({:?})", profile.id, profile.kind);

        Ok(profile)
    }

    async fn update_profile(
        &self,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Profile, RepositoryError> {
        let mut profiles = self.profiles.write().await;

        let index = profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Profile {} not found", id)))?;

        let mut document = serde_json::to_value(&profiles[index])
            .map_err(|e| RepositoryError::InvalidUpdate(e.to_string()))?;

        if let Some(object) = document.as_object_mut() {
            for (key, value) in fields {
                if IMMUTABLE_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                object.insert(key, value);
            }
        }

        let mut updated: Profile = serde_json::from_value(document)
            .map_err(|e| RepositoryError::InvalidUpdate(e.to_string()))?;
        updated.validate()?;

        if profiles
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && p.email == updated.email)
        {
            return Err(RepositoryError::DuplicateEmail(updated.email));
        }

        updated.updated_at = Some(chrono::Utc::now());
        profiles[index] = updated.clone();

        tracing::debug!("Updated profile {}", id);

        Ok(updated)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.profiles.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Intent, ProfileKind, UserType};
    use serde_json::json;

    fn create_test_profile(email: &str) -> Profile {
        let mut profile = Profile::new(ProfileKind::Flatmate, "Test User", email, "Baner, Pune");
        profile.age = Some(22);
        profile.user_type = Some(UserType::Student);
        profile
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = InMemoryProfileRepository::new();

        let created = repo.create_profile(create_test_profile("a@example.com")).await.unwrap();
        assert!(!created.id.is_empty());
        assert!(created.created_at.is_some());

        let by_id = repo.get_profile_by_id(&created.id).await.unwrap();
        let by_email = repo.get_profile_by_email("a@example.com").await.unwrap();
        assert_eq!(by_id, by_email);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_found() {
        let repo = InMemoryProfileRepository::new();

        assert!(matches!(
            repo.get_profile_by_id("missing").await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.get_profile_by_email("nobody@example.com").await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.update_profile("missing", Map::new()).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryProfileRepository::new();
        repo.create_profile(create_test_profile("a@example.com")).await.unwrap();

        let result = repo.create_profile(create_test_profile("a@example.com")).await;
        assert!(matches!(result, Err(RepositoryError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_invariants_checked_on_create() {
        let repo = InMemoryProfileRepository::new();

        let mut listing = create_test_profile("flat@example.com");
        listing.kind = ProfileKind::Flat;
        listing.intent = Some(Intent::LookingForFlat);
        assert!(matches!(repo.create_profile(listing).await, Err(RepositoryError::Invalid(_))));

        let mut owner = create_test_profile("owner@example.com");
        owner.user_type = Some(UserType::Owner);
        owner.intent = Some(Intent::HaveFlatNeedFlatmate);
        assert!(matches!(repo.create_profile(owner).await, Err(RepositoryError::Invalid(_))));

        let mut aged = create_test_profile("old@example.com");
        aged.age = Some(121);
        assert!(matches!(repo.create_profile(aged).await, Err(RepositoryError::Invalid(_))));

        let mut seeker = create_test_profile("seeker@example.com");
        seeker.intent = Some(Intent::LookingForFlatmate);
        assert!(repo.create_profile(seeker).await.is_ok());
    }

    #[tokio::test]
    async fn test_shallow_update() {
        let repo = InMemoryProfileRepository::new();
        let created = repo.create_profile(create_test_profile("a@example.com")).await.unwrap();

        let updated = repo
            .update_profile(
                &created.id,
                fields(json!({
                    "id": "hijacked",
                    "budget": "₹9,000",
                    "habits": ["Clean", "Night Owl"],
                    "verifications": { "phone": true }
                })),
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.budget.as_deref(), Some("₹9,000"));
        assert_eq!(updated.habits, vec!["Clean", "Night Owl"]);
        assert!(updated.verifications.phone);
        assert!(!updated.verifications.email);
        assert_eq!(updated.name, "Test User");
    }

    #[tokio::test]
    async fn test_update_rejects_bad_documents() {
        let repo = InMemoryProfileRepository::new();
        let created = repo.create_profile(create_test_profile("a@example.com")).await.unwrap();
        repo.create_profile(create_test_profile("b@example.com")).await.unwrap();

        let bad_type = repo
            .update_profile(&created.id, fields(json!({ "type": "castle" })))
            .await;
        assert!(matches!(bad_type, Err(RepositoryError::InvalidUpdate(_))));

        let taken = repo
            .update_profile(&created.id, fields(json!({ "email": "b@example.com" })))
            .await;
        assert!(matches!(taken, Err(RepositoryError::DuplicateEmail(_))));

        let unchanged = repo.get_profile_by_id(&created.id).await.unwrap();
        assert_eq!(unchanged.email, "a@example.com");
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = InMemoryProfileRepository::new();
        for i in 0..5 {
            repo.create_profile(create_test_profile(&format!("{}@example.com", i))).await.unwrap();
        }

        let emails: Vec<String> = repo
            .list_profiles()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.email)
            .collect();

        assert_eq!(emails, vec!["0@example.com", "1@example.com", "2@example.com", "3@example.com", "4@example.com"]);
    }
}
