use fitness_chat::{
    AppState, ChatClient, HtmlPage, HttpBackend, LocalStore, config, load_profile, router,
};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("ask") => ask(&args[1..].join(" ")).await,
        _ => serve().await,
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let profile_path = config::resolve_profile_path();
    if let Some(parent) = profile_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let profile = load_profile(&profile_path).await;
    let app = router(AppState::new(profile_path, profile));

    let addr = SocketAddr::from(([0, 0, 0, 0], config::resolve_port()));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Scrapes the served plan page, sends one question and prints the conversation.
async fn ask(question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let base_url = config::resolve_chat_url();
    let http = reqwest::Client::new();
    let page = HtmlPage::fetch(&http, &base_url)
        .await?
        .with_store(LocalStore::load(config::resolve_store_path()).await);
    let client = ChatClient::new(page, HttpBackend::with_client(http, &base_url));

    if client.send_message(question).await.is_none() {
        return Err("usage: fitness_chat ask <question>".into());
    }
    for message in client.messages().await {
        println!("[{:?}] {}", message.role, message.content);
    }
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
