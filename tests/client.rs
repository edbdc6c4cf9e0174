use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use fitness_chat::client::LOADING_TEXT;
use fitness_chat::errors::{
    API_KEY_ERROR_MESSAGE, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE, RATE_LIMIT_MESSAGE,
    SERVER_ERROR_MESSAGE,
};
use fitness_chat::models::{ChatContext, ChatRequest, ChatRole};
use fitness_chat::storage::USER_DATA_KEY;
use fitness_chat::{
    ChatBackend, ChatClient, ChatError, HtmlPage, HttpBackend, LocalStore, StaticContext,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

type Seen = Arc<Mutex<Vec<Value>>>;

const PAGE: &str = r#"<html><head><title>Workout Plan</title></head><body>
<h1>This Week</h1>
<ul><li class="list-group-item">Goal <span class="badge">Build muscle</span></li></ul>
<div class="accordion-item"><button class="accordion-button">Monday - Upper Body</button>
<ul><li class="list-group-item">Push-ups 3x12</li></ul></div>
</body></html>"#;

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn recording_backend(seen: Seen) -> String {
    async fn record(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
        seen.lock().await.push(body);
        Json(json!({ "response": "Great job!" }))
    }
    spawn_backend(Router::new().route("/chat", post(record)).with_state(seen)).await
}

async fn status_backend(status: StatusCode) -> String {
    let route = post(move || async move { (status, "upstream failure") });
    spawn_backend(Router::new().route("/chat", route)).await
}

async fn json_backend(body: Value) -> String {
    spawn_backend(Router::new().route(
        "/chat",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    ))
    .await
}

fn static_client(base_url: &str) -> ChatClient<StaticContext, HttpBackend> {
    ChatClient::new(StaticContext::default(), HttpBackend::new(base_url))
}

async fn last_reply<P, B>(client: &ChatClient<P, B>) -> (ChatRole, String)
where
    P: fitness_chat::PageContextProvider,
    B: ChatBackend,
{
    let messages = client.messages().await;
    let last = messages.last().expect("at least one message");
    (last.role, last.content.clone())
}

#[tokio::test]
async fn successful_reply_replaces_the_loading_message() {
    let seen = Seen::default();
    let base_url = recording_backend(seen.clone()).await;
    let client = ChatClient::new(HtmlPage::new(PAGE, "/workout_plan"), HttpBackend::new(&base_url));

    let reply_id = client.send_message("  How is my plan?  ").await.unwrap();

    let messages = client.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);
    assert_eq!(messages[0].content, "How is my plan?");
    assert_eq!(messages[1].role, ChatRole::Ai);
    assert_eq!(messages[1].content, "Great job!");
    assert_eq!(messages[1].id, reply_id);
    assert_eq!(client.loading_count().await, 0);

    let requests = seen.lock().await;
    assert_eq!(requests.len(), 1);
    let body = &requests[0];
    assert_eq!(body["message"], "How is my plan?");
    assert_eq!(body["context"]["currentPage"], "/workout_plan");
    assert_eq!(body["context"]["userData"]["Goal"], "Build muscle");
    assert_eq!(body["context"]["workoutPlan"]["Monday"]["focus"], "Upper Body");
    assert_eq!(body["context"]["pageContent"]["title"], "Workout Plan");
    assert!(body["context"]["pageContent"]["visibleText"].is_array());
    assert!(body["context"]["dietPlan"].is_object());
    assert!(body["context"]["healthMetrics"].is_object());
}

#[tokio::test]
async fn blank_input_changes_nothing() {
    let seen = Seen::default();
    let base_url = recording_backend(seen.clone()).await;
    let client = static_client(&base_url);

    assert_eq!(client.send_message("").await, None);
    assert_eq!(client.send_message("   \n\t").await, None);

    assert!(client.messages().await.is_empty());
    assert!(client.context().await.is_none());
    assert!(seen.lock().await.is_empty());
}

#[tokio::test]
async fn rate_limited_reply_is_explained() {
    let client = static_client(&status_backend(StatusCode::TOO_MANY_REQUESTS).await);
    client.send_message("hello").await;

    assert_eq!(last_reply(&client).await, (ChatRole::Ai, RATE_LIMIT_MESSAGE.to_string()));
    assert_eq!(client.loading_count().await, 0);
    assert_eq!(client.messages().await.len(), 2);
}

#[tokio::test]
async fn http_statuses_map_to_fixed_messages() {
    let cases = [
        (StatusCode::UNAUTHORIZED, API_KEY_ERROR_MESSAGE),
        (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE),
        (StatusCode::NOT_FOUND, GENERIC_ERROR_MESSAGE),
    ];
    for (status, expected) in cases {
        let client = static_client(&status_backend(status).await);
        client.send_message("hello").await;
        assert_eq!(
            last_reply(&client).await,
            (ChatRole::Ai, expected.to_string()),
            "status {status}"
        );
        assert_eq!(client.loading_count().await, 0);
    }
}

#[tokio::test]
async fn malformed_bodies_are_failures() {
    let bodies = [
        json!({ "error": "Chat service temporarily unavailable. Please try again." }),
        json!({ "response": "ignored", "error": "boom" }),
        json!({}),
        json!({ "response": "" }),
    ];
    for body in bodies {
        let client = static_client(&json_backend(body.clone()).await);
        client.send_message("hello").await;
        assert_eq!(
            last_reply(&client).await,
            (ChatRole::Ai, GENERIC_ERROR_MESSAGE.to_string()),
            "body {body}"
        );
    }

    let not_json =
        spawn_backend(Router::new().route("/chat", post(|| async { "<html>oops</html>" }))).await;
    let client = static_client(&not_json);
    client.send_message("hello").await;
    assert_eq!(last_reply(&client).await, (ChatRole::Ai, GENERIC_ERROR_MESSAGE.to_string()));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = static_client(&format!("http://127.0.0.1:{port}"));
    client.send_message("hello").await;

    assert_eq!(last_reply(&client).await, (ChatRole::Ai, NETWORK_ERROR_MESSAGE.to_string()));
    assert_eq!(client.loading_count().await, 0);
}

#[tokio::test]
async fn context_is_gathered_fresh_for_every_send() {
    let seen = Seen::default();
    let base_url = recording_backend(seen.clone()).await;
    let client = ChatClient::new(HtmlPage::new(PAGE, "/workout_plan"), HttpBackend::new(&base_url));

    client.send_message("first").await;
    client
        .provider()
        .navigate("<html><head><title>FAQ</title></head><body></body></html>", "/faq");
    client.send_message("second").await;

    let requests = seen.lock().await;
    assert_eq!(requests[0]["context"]["currentPage"], "/workout_plan");
    assert_eq!(requests[1]["context"]["currentPage"], "/faq");
    assert_eq!(requests[1]["context"]["pageContent"]["title"], "FAQ");
    assert_eq!(client.context().await.unwrap().current_page, "/faq");
}

#[tokio::test]
async fn malformed_stored_snapshot_still_sends_dom_context() {
    let seen = Seen::default();
    let base_url = recording_backend(seen.clone()).await;
    let mut store = LocalStore::in_memory();
    store.set(USER_DATA_KEY, "{not json");
    let page = HtmlPage::new(PAGE, "/").with_store(store);
    let client = ChatClient::new(page, HttpBackend::new(&base_url));

    client.send_message("hello").await;

    let requests = seen.lock().await;
    assert_eq!(requests[0]["context"]["userData"], json!({ "Goal": "Build muscle" }));
    assert_eq!(last_reply(&client).await, (ChatRole::Ai, "Great job!".to_string()));
}

#[tokio::test]
async fn concurrent_sends_complete_in_send_order() {
    async fn delayed(Json(body): Json<Value>) -> Json<Value> {
        let message = body["message"].as_str().unwrap_or_default().to_string();
        if message == "slow" {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        Json(json!({ "response": format!("reply to {message}") }))
    }
    let base_url = spawn_backend(Router::new().route("/chat", post(delayed))).await;
    let client = static_client(&base_url);

    tokio::join!(client.send_message("slow"), client.send_message("fast"));

    let contents: Vec<_> = client
        .messages()
        .await
        .into_iter()
        .map(|m| (m.role, m.content))
        .collect();
    assert_eq!(
        contents,
        vec![
            (ChatRole::User, "slow".to_string()),
            (ChatRole::User, "fast".to_string()),
            (ChatRole::Ai, "reply to slow".to_string()),
            (ChatRole::Ai, "reply to fast".to_string()),
        ]
    );
    assert_eq!(client.loading_count().await, 0);
}

struct GatedBackend {
    gate: Arc<Notify>,
}

#[async_trait]
impl ChatBackend for GatedBackend {
    async fn send(&self, _request: &ChatRequest) -> Result<String, ChatError> {
        self.gate.notified().await;
        Ok("done".to_string())
    }
}

#[tokio::test]
async fn one_loading_message_is_visible_while_in_flight() {
    let gate = Arc::new(Notify::new());
    let client = ChatClient::new(
        StaticContext::new(ChatContext::default()),
        GatedBackend { gate: gate.clone() },
    );

    let observe = async {
        while client.loading_count().await == 0 {
            tokio::task::yield_now().await;
        }
        let messages = client.messages().await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, ChatRole::Loading);
        assert_eq!(messages[1].content, LOADING_TEXT);
        assert_eq!(client.loading_count().await, 1);
        gate.notify_one();
    };

    tokio::join!(client.send_message("are you there?"), observe);

    assert_eq!(client.loading_count().await, 0);
    assert_eq!(last_reply(&client).await, (ChatRole::Ai, "done".to_string()));
}
