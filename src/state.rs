use crate::models::FitnessProfile;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub profile_path: PathBuf,
    pub profile: Arc<Mutex<FitnessProfile>>,
}

impl AppState {
    pub fn new(profile_path: PathBuf, profile: FitnessProfile) -> Self {
        Self {
            profile_path,
            profile: Arc::new(Mutex::new(profile)),
        }
    }
}
