use crate::errors::AppError;
use crate::models::FitnessProfile;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;

/// Key under which the persisted user-data snapshot is stored.
pub const USER_DATA_KEY: &str = "fitnessUserData";

/// String-valued key/value store kept in a JSON file, the way the browser
/// keeps `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("failed to parse store file {}: {err}", path.display());
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read store file {}: {err}", path.display());
                BTreeMap::new()
            }
        };

        Self {
            path: Some(path),
            entries,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Writes the store back to its file. In-memory stores have nothing to write.
    pub async fn persist(&self) -> Result<(), std::io::Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let payload = serde_json::to_vec_pretty(&self.entries)?;
        fs::write(path, payload).await
    }
}

pub async fn load_profile(path: &Path) -> FitnessProfile {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(profile) => profile,
            Err(err) => {
                error!("failed to parse profile file: {err}");
                FitnessProfile::sample()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => FitnessProfile::sample(),
        Err(err) => {
            error!("failed to read profile file: {err}");
            FitnessProfile::sample()
        }
    }
}

pub async fn persist_profile(path: &Path, profile: &FitnessProfile) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(profile).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
