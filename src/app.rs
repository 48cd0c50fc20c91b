use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use image::{DynamicImage, ImageReader};
use thiserror::Error;

use crate::config::AppConfig;
use crate::core::classifier::{ImageClassifier, OnnxClassifier};
use crate::core::exif_reader::{ExifReadError, ExifReader};
use crate::core::geocoder::{HttpGeocoder, ReverseGeocoder};
use crate::core::labels::LabelCatalog;
use crate::core::metadata::MetadataInterpreter;
use crate::core::report;
use crate::http::ReqwestClient;
use crate::models::{InterpretedMetadata, Prediction};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Empty,
    Loaded,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error loading image file: {0}")]
    ImageFile(#[from] ExifReadError),

    #[error("Error loading image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("nothing to save: no image has been analysed yet")]
    NothingToSave,

    #[error("Error occurred while saving the file: {0}")]
    Save(#[source] std::io::Error),
}

/// External collaborators of the open-image pipeline.
pub struct AnalysisServices {
    pub geocoder: Box<dyn ReverseGeocoder>,
    pub classifier: Box<dyn ImageClassifier>,
}

impl AnalysisServices {
    pub fn new(geocoder: Box<dyn ReverseGeocoder>, classifier: Box<dyn ImageClassifier>) -> Self {
        Self {
            geocoder,
            classifier,
        }
    }

    /// Startup wiring: label catalog, classifier model and geocoder. Any failure aborts startup.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let client = ReqwestClient::new(&config.http.user_agent)
            .context("failed to create HTTP client")?;

        let labels = LabelCatalog::fetch(&client, &config.labels.url)
            .with_context(|| format!("failed to load label catalog from {}", config.labels.url))?;

        let classifier = OnnxClassifier::load(&config.classifier, Arc::new(labels), &client)
            .context("failed to load classifier model")?;

        let geocoder = HttpGeocoder::new(
            Arc::clone(&client),
            config.geocoding.endpoint.clone(),
            config.geocoding.api_key.clone(),
        );

        Ok(Self::new(Box::new(geocoder), Box::new(classifier)))
    }
}

/// Result of a successful open; `warnings` are shown to the user as dialogs.
#[derive(Clone, Debug, Default)]
pub struct OpenOutcome {
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub phase: Phase,
    pub image_path: Option<PathBuf>,
    pub metadata: Option<InterpretedMetadata>,
    pub analysis: Option<Vec<Prediction>>,
    pub output_text: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: Phase::Empty,
            image_path: None,
            metadata: None,
            analysis: None,
            output_text: String::new(),
        }
    }
}

impl AppState {
    /// Runs EXIF reading, interpretation and classification for `path`.
    ///
    /// A missing, unreadable or undecodable file leaves the state untouched. A
    /// failed classification still displays the EXIF section and is reported
    /// through the outcome.
    pub fn open_image(
        &mut self,
        path: &Path,
        services: &AnalysisServices,
    ) -> Result<OpenOutcome, AppError> {
        log::info!("opening {}", path.display());
        let tags = ExifReader::read(path)?;
        let image = decode_image(path)?;

        let interpreter = MetadataInterpreter::new(services.geocoder.as_ref());
        let metadata = interpreter.interpret(tags.as_ref());

        let mut outcome = OpenOutcome::default();
        let analysis = match services.classifier.classify(&image) {
            Ok(predictions) => Some(predictions),
            Err(err) => {
                log::error!("classification of {} failed: {err}", path.display());
                outcome
                    .warnings
                    .push(format!("Error occurred during image analysis: {err}"));
                None
            }
        };

        self.output_text = report::render(&metadata, analysis.as_deref());
        self.image_path = Some(path.to_path_buf());
        self.metadata = Some(metadata);
        self.analysis = analysis;
        self.phase = Phase::Loaded;

        Ok(outcome)
    }

    pub fn can_save(&self) -> bool {
        self.phase == Phase::Loaded
    }

    /// Writes the current output text verbatim to `path`.
    pub fn save_output(&self, path: &Path) -> Result<(), AppError> {
        if !self.can_save() {
            return Err(AppError::NothingToSave);
        }

        report::save(path, &self.output_text).map_err(AppError::Save)?;
        log::info!("saved output to {}", path.display());
        Ok(())
    }

    pub fn file_name(&self) -> Option<String> {
        self.image_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
    }
}

fn decode_image(path: &Path) -> Result<DynamicImage, image::ImageError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    log::debug!(
        "decoded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}
