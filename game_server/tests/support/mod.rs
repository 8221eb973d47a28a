// Shared primitives for one-time server bootstrapping across integration tests.
#![allow(dead_code)]

use std::{
    // `Arc` shares data between threads; `OnceLock` writes a value only once.
    sync::{Arc, OnceLock},
    // Sleep durations are used in readiness polling loops.
    time::Duration,
};

use serde_json::{Value, json};
use wolves_server::domain::GameRules;
use wolves_server::interface_adapters::store::InMemoryGameStore;
use wolves_server::use_cases::RegistrySettings;

// Global base URL used by all tests after the server publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the test server is running with `rules` and return the shared base URL.
// The first caller in a test binary picks the rules for every test in it.
pub fn ensure_server(rules: GameRules) -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let settings = RegistrySettings {
                    rules,
                    rng_seed: Some(42),
                };
                let state =
                    wolves_server::build_state(settings, Arc::new(InMemoryGameStore::new()))
                        .await
                        .expect("build test state");
                let _ = published_url_thread.set(format!("http://{}", addr));
                wolves_server::run(listener, state).await.expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    // Strip the scheme so we can use host:port for raw TCP readiness checks.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

pub async fn create_game(client: &reqwest::Client, base_url: &str) -> u64 {
    let body: Value = client
        .post(format!("{base_url}/games"))
        .send()
        .await
        .expect("create request should succeed")
        .json()
        .await
        .expect("create response should be json");
    body["game_id"].as_u64().expect("game_id")
}

pub async fn join_game(client: &reqwest::Client, base_url: &str, game_id: u64, name: &str) -> Value {
    client
        .post(format!("{base_url}/games/{game_id}/players"))
        .json(&json!({ "player_name": name }))
        .send()
        .await
        .expect("join request should succeed")
        .json()
        .await
        .expect("join response should be json")
}

pub async fn get_json(client: &reqwest::Client, url: String) -> (reqwest::StatusCode, Value) {
    let response = client.get(url).send().await.expect("request should succeed");
    let status = response.status();
    let body = response.json().await.expect("response should be json");
    (status, body)
}

pub async fn submit_move(
    client: &reqwest::Client,
    base_url: &str,
    game_id: u64,
    player_id: u64,
    token: &str,
) -> Value {
    client
        .post(format!("{base_url}/games/{game_id}/players/{player_id}/moves"))
        .json(&json!({ "token": token }))
        .send()
        .await
        .expect("move request should succeed")
        .json()
        .await
        .expect("move response should be json")
}
