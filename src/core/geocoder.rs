use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::http::{HttpError, ReqwestClient};
use crate::models::GpsCoordinate;

pub const LOCATION_NOT_FOUND: &str = "Location not found";
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("invalid geocoding endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("invalid geocoding response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GeocodeOutcome {
    Address(String),
    NotFound,
}

impl GeocodeOutcome {
    pub fn describe(&self) -> &str {
        match self {
            Self::Address(address) => address,
            Self::NotFound => LOCATION_NOT_FOUND,
        }
    }
}

/// Text shown after "Location: " for a lookup result.
pub fn describe_lookup(result: &Result<GeocodeOutcome, GeocodeError>) -> String {
    match result {
        Ok(outcome) => outcome.describe().to_string(),
        Err(err) => format!("Error occurred: {err}"),
    }
}

pub trait ReverseGeocoder {
    fn lookup(&self, coordinate: GpsCoordinate) -> Result<GeocodeOutcome, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: Option<String>,
}

/// Parses a Google-style geocoding JSON body.
pub fn parse_response(body: &[u8]) -> Result<GeocodeOutcome, GeocodeError> {
    let response: GeocodeResponse = serde_json::from_slice(body)?;

    if response.status != "OK" {
        log::debug!("geocoder returned status {}", response.status);
        return Ok(GeocodeOutcome::NotFound);
    }

    let Some(first) = response.results.into_iter().next() else {
        return Ok(GeocodeOutcome::NotFound);
    };

    Ok(GeocodeOutcome::Address(
        first
            .formatted_address
            .unwrap_or_else(|| String::from(ADDRESS_NOT_FOUND)),
    ))
}

pub struct HttpGeocoder {
    client: Arc<ReqwestClient>,
    endpoint: String,
    api_key: String,
}

impl HttpGeocoder {
    pub fn new(
        client: Arc<ReqwestClient>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn request_url(&self, coordinate: GpsCoordinate) -> Result<Url, GeocodeError> {
        let latlng = format!("{:?},{:?}", coordinate.latitude, coordinate.longitude);
        let url = Url::parse_with_params(
            &self.endpoint,
            &[("latlng", latlng.as_str()), ("key", self.api_key.as_str())],
        )?;
        Ok(url)
    }
}

impl ReverseGeocoder for HttpGeocoder {
    fn lookup(&self, coordinate: GpsCoordinate) -> Result<GeocodeOutcome, GeocodeError> {
        let url = self.request_url(coordinate)?;
        let response = self.client.get(url)?;
        let outcome = parse_response(&response.body)?;
        log::info!(
            "reverse geocoded {:?},{:?}: {}",
            coordinate.latitude,
            coordinate.longitude,
            outcome.describe()
        );
        Ok(outcome)
    }
}
