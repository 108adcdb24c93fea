//! Shared harness: boots the real router on an ephemeral port with the in-memory store,
//! a recording mail relay and a temporary uploads directory.

#![allow(dead_code)]

use async_trait::async_trait;
use globalcare_api::domain::mail::{Branding, MailDispatcher};
use globalcare_api::infra::mail::{MailRelay, OutgoingMail, RelayError};
use globalcare_api::transport::http::{self, CorsPolicy};
use globalcare_api::{MemoryDocumentStore, SiteService, UploadStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;

pub const ALLOWED_ORIGIN: &str = "https://globalcaresurgical.in";
pub const SENDER: &str = "Global Care Surgicals <noreply@example.com>";

/// Captures every message instead of talking SMTP. `fail` makes it refuse all sends.
#[derive(Default)]
pub struct RecordingRelay {
    sent: Mutex<Vec<OutgoingMail>>,
    fail: AtomicBool,
}

impl RecordingRelay {
    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailRelay for RecordingRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RelayError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryDocumentStore>,
    pub relay: Arc<RecordingRelay>,
    pub uploads: TempDir,
    server: JoinHandle<()>,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}

impl TestApp {
    pub async fn spawn() -> TestApp {
        let uploads = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryDocumentStore::new());
        let relay = Arc::new(RecordingRelay::default());

        let upload_store = Arc::new(UploadStore::open(uploads.path()).await.unwrap());
        let mailer = MailDispatcher::new(relay.clone(), SENDER, Branding::default());
        let state = http::AppState {
            site: Arc::new(SiteService::new(store.clone(), upload_store, mailer)),
            cors: Arc::new(CorsPolicy::new([ALLOWED_ORIGIN])),
            max_upload_bytes: 5 * 1024 * 1024,
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = http::create_router(state);
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        TestApp {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
            store,
            relay,
            uploads,
            server,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self.client.get(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    pub async fn post_form(&self, path: &str, form: reqwest::multipart::Form) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self.client.post(self.url(path)).multipart(form).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    pub async fn delete(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = self.client.delete(self.url(path)).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    /// Number of files currently in the uploads directory.
    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(self.uploads.path()).unwrap().count()
    }

    /// Polls until the relay has recorded at least `n` messages.
    pub async fn wait_for_mail(&self, n: usize) -> Vec<OutgoingMail> {
        for _ in 0..50 {
            let sent = self.relay.sent();
            if sent.len() >= n {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.relay.sent()
    }
}

pub fn file_part(name: &str, bytes: &[u8]) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(name.to_string())
}
