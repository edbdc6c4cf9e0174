pub mod app;
pub mod backend;
pub mod client;
pub mod coach;
pub mod config;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod models;
pub mod scrape;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use backend::{ChatBackend, HttpBackend};
pub use client::ChatClient;
pub use context::{PageContextProvider, StaticContext};
pub use errors::{AppError, ChatError};
pub use scrape::HtmlPage;
pub use state::AppState;
pub use storage::{LocalStore, load_profile};
