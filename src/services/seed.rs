use crate::models::Profile;
use crate::services::repository::{ProfileRepository, RepositoryError};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading seed data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Read a JSON array of profiles
///
/// The file must be an array. Entries that do not deserialize as a profile
/// are skipped with a warning.
pub fn load_seed_file(path: &Path) -> Result<Vec<Profile>, SeedError> {
    let content = std::fs::read_to_string(path)?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&content)?;

    let profiles = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Profile>(entry) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!("Skipping seed entry {}: {}", index, e);
                None
            }
        })
        .collect();

    Ok(profiles)
}

/// Load `path` into the repository when it holds no profiles yet
///
/// Returns the number of profiles inserted. Individual profiles that are
/// mistyped or fail validation are skipped with a warning.
pub async fn seed_if_empty(repository: &dyn ProfileRepository, path: &Path) -> Result<usize, SeedError> {
    if repository.count().await? > 0 {
        tracing::info!("Repository already contains profiles, skipping seed");
        return Ok(0);
    }

    if !path.exists() {
        tracing::info!("Seed file {} not found, starting empty", path.display());
        return Ok(0);
    }

    let profiles = load_seed_file(path)?;
    let mut inserted = 0;

    for profile in profiles {
        let email = profile.email.clone();
        match repository.create_profile(profile).await {
            Ok(_) => inserted += 1,
            Err(e) => tracing::warn!("Skipping seed profile {}: {}", email, e),
        }
    }

    tracing::info!("Seeded {} profiles from {}", inserted, path.display());

    Ok(inserted)
}
