use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Runtime;
use url::Url;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to start HTTP runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A blocking HTTP client backed by reqwest for the label list, geocoding and model download.
/// It owns a Tokio runtime so reqwest's reactor is available while the UI thread waits.
pub struct ReqwestClient {
    client: reqwest::Client,
    runtime: Runtime,
}

impl ReqwestClient {
    pub fn new(user_agent: &str) -> Result<Arc<Self>, HttpError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(HttpError::Client)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .thread_name("photo-insight-http")
            .build()?;

        Ok(Arc::new(Self { client, runtime }))
    }

    /// Issues a GET and waits for the whole body. Non-2xx statuses are returned, not rejected.
    pub fn get(&self, url: Url) -> Result<HttpResponse, HttpError> {
        log::debug!("GET {}", redact_query(&url));
        let request = self.client.get(url);

        self.runtime.block_on(async move {
            let response = request.send().await.map_err(HttpError::Request)?;
            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(HttpError::Body)?;
            Ok(HttpResponse {
                status,
                body: body.to_vec(),
            })
        })
    }

    /// Like [`get`](Self::get) but treats non-2xx statuses as errors.
    pub fn get_ok(&self, url: Url) -> Result<HttpResponse, HttpError> {
        let display = redact_query(&url);
        let response = self.get(url)?;
        if !response.is_success() {
            return Err(HttpError::Status {
                url: display,
                status: response.status,
            });
        }
        Ok(response)
    }
}

// Keeps API keys out of the log.
fn redact_query(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}
