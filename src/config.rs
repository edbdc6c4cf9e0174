use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CHAT_URL: &str = "http://127.0.0.1:8080";

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn resolve_profile_path() -> PathBuf {
    env::var("FITNESS_PROFILE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/profile.json"))
}

pub fn resolve_store_path() -> PathBuf {
    env::var("FITNESS_STORE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/local_store.json"))
}

pub fn resolve_chat_url() -> String {
    env::var("FITNESS_CHAT_URL").unwrap_or_else(|_| DEFAULT_CHAT_URL.to_string())
}
