use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_LABELS_URL: &str =
    "https://raw.githubusercontent.com/anishathalye/imagenet-simple-labels/master/imagenet-simple-labels.json";
pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/classification/resnet/model/resnet18-v1-7.onnx";

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    /// Raw network outputs, reported as-is.
    #[default]
    Logits,
    Softmax,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LabelsConfig {
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
    pub model_url: String,
    pub resize_to: u32,
    pub crop_size: u32,
    pub top_k: usize,
    pub score_mode: ScoreMode,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/resnet18-v1-7.onnx"),
            model_url: String::from(DEFAULT_MODEL_URL),
            resize_to: 256,
            crop_size: 224,
            top_k: 5,
            score_mode: ScoreMode::Logits,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub log_level: String,
    pub http: HttpConfig,
    pub labels: LabelsConfig,
    pub geocoding: GeocodingConfig,
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    /// Defaults, then `config/default`, `config/local`, then `PHOTO_INSIGHT__*` env vars.
    pub fn new() -> Result<Self, ConfigError> {
        let s = Self::builder_with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("PHOTO_INSIGHT").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Built-in values only; no files or environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder_with_defaults()?.build()?.try_deserialize()
    }

    fn builder_with_defaults(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let classifier = ClassifierConfig::default();

        Config::builder()
            .set_default("log_level", "info")?
            .set_default("http.user_agent", "PhotoInsight/0.1")?
            .set_default("labels.url", DEFAULT_LABELS_URL)?
            .set_default("geocoding.endpoint", DEFAULT_GEOCODING_ENDPOINT)?
            .set_default("geocoding.api_key", "api_key")?
            .set_default(
                "classifier.model_path",
                classifier.model_path.to_string_lossy().to_string(),
            )?
            .set_default("classifier.model_url", classifier.model_url)?
            .set_default("classifier.resize_to", classifier.resize_to as i64)?
            .set_default("classifier.crop_size", classifier.crop_size as i64)?
            .set_default("classifier.top_k", classifier.top_k as i64)?
            .set_default("classifier.score_mode", "logits")
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
