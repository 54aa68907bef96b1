use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tempfile::TempDir;

use rental_intake::config::Config;

/// A running test server instance with a dedicated temporary store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub submissions_dir: PathBuf,
    _store_root: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit an application as JSON, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/submit_application"))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        (body, status)
    }

    /// Names of every file currently in the store, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.submissions_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Parse a stored application file.
    pub fn read_stored(&self, filename: &str) -> Value {
        let bytes = std::fs::read(self.submissions_dir.join(filename))
            .unwrap_or_else(|e| panic!("failed to read stored file {filename}: {e}"));
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|e| panic!("stored file {filename} is not valid JSON: {e}"))
    }
}

/// Spawn a test app backed by a fresh temporary submissions directory.
pub async fn spawn_app() -> TestApp {
    spawn_app_inner(None).await
}

/// Spawn a test app that also serves static assets from the given directory.
#[allow(dead_code)]
pub async fn spawn_app_with_static(static_dir: PathBuf) -> TestApp {
    spawn_app_inner(Some(static_dir)).await
}

async fn spawn_app_inner(static_dir: Option<PathBuf>) -> TestApp {
    let store_root = tempfile::tempdir().expect("failed to create temp store");
    let submissions_dir = store_root.path().join("applications");

    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to a random port
        submissions_dir: submissions_dir.clone(),
        static_dir,
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
    };

    let app = rental_intake::build_app(config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::new();

    TestApp {
        addr,
        client,
        submissions_dir,
        _store_root: store_root,
    }
}
