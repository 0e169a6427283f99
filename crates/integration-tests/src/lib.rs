use std::net::SocketAddr;
use std::time::Duration;

use config::Config;
use reqwest::{Method, StatusCode, header::HeaderMap};
use serde_json::Value;
use tokio::net::TcpListener;

/// Test client for making HTTP requests to the test server
pub struct TestClient {
    base_url: String,
    client: reqwest::Client,
}

impl TestClient {
    /// Create a new test client for the given base URL
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Send a POST request to the given path with JSON body
    pub async fn post<T: serde::Serialize>(&self, path: &str, body: &T) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// Send a request with an arbitrary method and raw body
    pub async fn request(&self, method: Method, path: &str, body: impl Into<reqwest::Body>) -> reqwest::Response {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .body(body)
            .send()
            .await
            .unwrap()
    }

    /// Send a GET request to the given path
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap()
    }
}

/// A decoded reply of the completion endpoint.
pub struct CompletionReply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Client for the emulated chat completion endpoint
pub struct CompletionsClient<'a> {
    client: &'a TestClient,
    path: String,
}

impl CompletionsClient<'_> {
    /// POST a JSON request and return the decoded body, asserting a 200 response
    pub async fn completions(&self, request: Value) -> Value {
        let response = self.client.post(&self.path, &request).await;
        assert_eq!(response.status(), StatusCode::OK);

        response.json().await.unwrap()
    }

    /// Send a raw body with the given method
    pub async fn raw(&self, method: Method, body: impl Into<reqwest::Body>) -> CompletionReply {
        let response = self.client.request(method, &self.path, body).await;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        CompletionReply { status, headers, body }
    }
}

/// Test server that manages the lifecycle of a server instance
pub struct TestServer {
    pub client: TestClient,
    pub address: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with the given TOML configuration
    pub async fn start(config_toml: &str) -> Self {
        let config: Config = toml::from_str(config_toml).unwrap();

        // Binding before spawning keeps early requests in the accept queue.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            if let Err(e) = server::serve_listener(listener, config).await {
                eprintln!("Server failed to start: {e}");
            }
        });

        TestServer {
            client: TestClient::new(format!("http://{address}")),
            address,
            _handle: handle,
        }
    }

    /// Create a client for the completion endpoint mounted at the given path
    pub fn completions_client(&self, path: &str) -> CompletionsClient<'_> {
        CompletionsClient {
            client: &self.client,
            path: path.to_string(),
        }
    }
}

/// Reserve a free local address by binding and releasing an ephemeral port
pub async fn free_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Poll a URL until it answers, for listeners that are bound in the background
pub async fn wait_until_reachable(url: &str) -> reqwest::Response {
    let client = reqwest::Client::new();

    for _ in 0..50 {
        if let Ok(response) = client.get(url).send().await {
            return response;
        }

        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    client.get(url).send().await.unwrap()
}
