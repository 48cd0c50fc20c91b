use std::fs;
use std::path::PathBuf;

use image::{DynamicImage, Rgb, RgbImage};
use photo_insight::app::{AnalysisServices, AppError, AppState, Phase};
use photo_insight::core::classifier::{ClassifyError, ImageClassifier};
use photo_insight::core::geocoder::{GeocodeError, GeocodeOutcome, ReverseGeocoder};
use photo_insight::models::{GpsCoordinate, Prediction};
use tempfile::TempDir;

struct NoGeocoder;

impl ReverseGeocoder for NoGeocoder {
    fn lookup(&self, _coordinate: GpsCoordinate) -> Result<GeocodeOutcome, GeocodeError> {
        Ok(GeocodeOutcome::NotFound)
    }
}

struct FixedClassifier;

impl ImageClassifier for FixedClassifier {
    fn classify(&self, _image: &DynamicImage) -> Result<Vec<Prediction>, ClassifyError> {
        Ok(vec![
            Prediction::new("tabby cat", 15.234),
            Prediction::new("tiger cat", 12.5),
            Prediction::new("Egyptian cat", 9.999),
            Prediction::new("lynx", 4.0),
            Prediction::new("remote control", -0.5),
        ])
    }
}

struct FailingClassifier;

impl ImageClassifier for FailingClassifier {
    fn classify(&self, _image: &DynamicImage) -> Result<Vec<Prediction>, ClassifyError> {
        Err(ClassifyError::Inference(String::from("model exploded")))
    }
}

fn services(classifier: Box<dyn ImageClassifier>) -> AnalysisServices {
    AnalysisServices::new(Box::new(NoGeocoder), classifier)
}

fn write_bmp(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    RgbImage::from_pixel(32, 24, Rgb([10, 200, 30]))
        .save(&path)
        .expect("should write test image");
    path
}

const EXPECTED_WITH_ANALYSIS: &str = "EXIF Metadata:\n\
Error: No EXIF data found in this image.\n\
\n\
AI Analysis:\n\
Label: tabby cat, Confidence Score: 15.23\n\
Label: tiger cat, Confidence Score: 12.50\n\
Label: Egyptian cat, Confidence Score: 10.00\n\
Label: lynx, Confidence Score: 4.00\n\
Label: remote control, Confidence Score: -0.50\n";

#[test]
fn starts_empty_and_rejects_save() {
    let dir = TempDir::new().unwrap();
    let state = AppState::default();

    assert_eq!(state.phase, Phase::Empty);
    assert!(!state.can_save());

    let target = dir.path().join("out.txt");
    assert!(matches!(
        state.save_output(&target),
        Err(AppError::NothingToSave)
    ));
    assert!(!target.exists());
}

#[test]
fn opening_an_image_renders_both_sections() {
    let dir = TempDir::new().unwrap();
    let image = write_bmp(&dir, "photo.bmp");
    let services = services(Box::new(FixedClassifier));

    let mut state = AppState::default();
    let outcome = state.open_image(&image, &services).unwrap();

    assert!(outcome.warnings.is_empty());
    assert_eq!(state.phase, Phase::Loaded);
    assert!(state.can_save());
    assert_eq!(state.image_path.as_deref(), Some(image.as_path()));
    assert_eq!(state.file_name().as_deref(), Some("photo.bmp"));
    assert_eq!(state.output_text, EXPECTED_WITH_ANALYSIS);
}

#[test]
fn saved_file_is_byte_identical_to_output() {
    let dir = TempDir::new().unwrap();
    let image = write_bmp(&dir, "photo.bmp");
    let services = services(Box::new(FixedClassifier));

    let mut state = AppState::default();
    state.open_image(&image, &services).unwrap();

    let target = dir.path().join("metadata.txt");
    state.save_output(&target).unwrap();

    assert_eq!(fs::read(&target).unwrap(), state.output_text.as_bytes());
}

#[test]
fn classification_failure_keeps_exif_section() {
    let dir = TempDir::new().unwrap();
    let image = write_bmp(&dir, "photo.bmp");
    let services = services(Box::new(FailingClassifier));

    let mut state = AppState::default();
    let outcome = state.open_image(&image, &services).unwrap();

    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].starts_with("Error occurred during image analysis: "));
    assert!(state.analysis.is_none());
    assert!(state.can_save());
    assert_eq!(
        state.output_text,
        "EXIF Metadata:\nError: No EXIF data found in this image.\n\nAI Analysis:\nNo analysis results found."
    );
}

#[test]
fn missing_file_leaves_previous_state() {
    let dir = TempDir::new().unwrap();
    let image = write_bmp(&dir, "first.bmp");
    let services = services(Box::new(FixedClassifier));

    let mut state = AppState::default();
    state.open_image(&image, &services).unwrap();
    let before = state.output_text.clone();

    let missing = dir.path().join("missing.jpg");
    let err = state.open_image(&missing, &services).unwrap_err();

    assert!(matches!(err, AppError::ImageFile(_)));
    assert!(err.to_string().starts_with("Error loading image file: "));
    assert_eq!(state.output_text, before);
    assert_eq!(state.image_path.as_deref(), Some(image.as_path()));
}

#[test]
fn missing_file_from_empty_stays_empty() {
    let dir = TempDir::new().unwrap();
    let services = services(Box::new(FixedClassifier));

    let mut state = AppState::default();
    assert!(state
        .open_image(&dir.path().join("nope.png"), &services)
        .is_err());
    assert_eq!(state.phase, Phase::Empty);
    assert!(!state.can_save());
}

#[test]
fn reopening_replaces_content() {
    let dir = TempDir::new().unwrap();
    let first = write_bmp(&dir, "first.bmp");
    let second = write_bmp(&dir, "second.bmp");

    let mut state = AppState::default();
    state
        .open_image(&first, &services(Box::new(FixedClassifier)))
        .unwrap();
    state
        .open_image(&second, &services(Box::new(FailingClassifier)))
        .unwrap();

    assert_eq!(state.file_name().as_deref(), Some("second.bmp"));
    assert!(state.output_text.ends_with("No analysis results found."));
}

#[test]
fn unwritable_save_target_is_reported() {
    let dir = TempDir::new().unwrap();
    let image = write_bmp(&dir, "photo.bmp");
    let mut state = AppState::default();
    state
        .open_image(&image, &services(Box::new(FixedClassifier)))
        .unwrap();

    let target = dir.path().join("no-such-dir").join("out.txt");
    let err = state.save_output(&target).unwrap_err();
    assert!(matches!(err, AppError::Save(_)));
    assert!(err
        .to_string()
        .starts_with("Error occurred while saving the file: "));
}

#[test]
fn corrupt_image_is_rejected_from_empty() {
    let dir = TempDir::new().unwrap();
    let corrupt = dir.path().join("x.jpg");
    fs::write(&corrupt, b"not an image").unwrap();
    let services = services(Box::new(FixedClassifier));

    let mut state = AppState::default();
    let err = state.open_image(&corrupt, &services).unwrap_err();

    assert!(matches!(err, AppError::ImageDecode(_)));
    assert!(err.to_string().starts_with("Error loading image: "));
    assert_eq!(state.phase, Phase::Empty);
    assert!(!state.can_save());
    assert!(state.output_text.is_empty());
}

#[test]
fn corrupt_image_keeps_loaded_content() {
    let dir = TempDir::new().unwrap();
    let image = write_bmp(&dir, "good.bmp");
    let corrupt = dir.path().join("broken.bmp");
    fs::write(&corrupt, b"BM truncated header").unwrap();
    let services = services(Box::new(FixedClassifier));

    let mut state = AppState::default();
    state.open_image(&image, &services).unwrap();
    let before = state.output_text.clone();

    assert!(matches!(
        state.open_image(&corrupt, &services),
        Err(AppError::ImageDecode(_))
    ));
    assert_eq!(state.output_text, before);
    assert_eq!(state.file_name().as_deref(), Some("good.bmp"));
    assert!(state.can_save());
}
