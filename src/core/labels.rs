use thiserror::Error;
use url::Url;

use crate::http::{HttpError, ReqwestClient};

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("invalid label catalog URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to download label catalog: {0}")]
    Http(#[from] HttpError),

    #[error("label catalog is not a JSON array of strings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Class names of the classifier, indexed by output position.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelCatalog {
    labels: Vec<String>,
}

impl LabelCatalog {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn from_json(body: &[u8]) -> Result<Self, LabelError> {
        let labels: Vec<String> = serde_json::from_slice(body)?;
        Ok(Self::new(labels))
    }

    pub fn fetch(client: &ReqwestClient, url: &str) -> Result<Self, LabelError> {
        let url = Url::parse(url)?;
        let response = client.get_ok(url)?;
        let catalog = Self::from_json(&response.body)?;
        log::info!("loaded {} class labels", catalog.len());
        Ok(catalog)
    }

    /// Label for a class index; indices past the end render as the number itself.
    pub fn label(&self, index: usize) -> String {
        self.labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| index.to_string())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
