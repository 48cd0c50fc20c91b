//! Image classification with a pretrained ImageNet network (ResNet-18, ONNX).
//!
//! The network runs through `tract-onnx` in pure Rust. Preprocessing matches
//! the torchvision evaluation transform: shortest side resized to 256,
//! centre crop of 224, scaling to `[0, 1]` and per-channel ImageNet
//! mean/std normalization.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;
use tract_onnx::prelude::*;
use url::Url;

use crate::config::{ClassifierConfig, ScoreMode};
use crate::core::labels::LabelCatalog;
use crate::http::{HttpError, ReqwestClient};
use crate::models::Prediction;

pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

type ClassifierPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("image is empty")]
    EmptyImage,

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("network produced {0} scores, fewer than requested")]
    TooFewScores(usize),
}

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("invalid model URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to download model: {0}")]
    Download(#[from] HttpError),

    #[error("failed to store model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load model {path}: {message}")]
    Load { path: String, message: String },
}

/// Labels an already decoded image.
pub trait ImageClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Prediction>, ClassifyError>;
}

pub struct OnnxClassifier {
    plan: ClassifierPlan,
    labels: Arc<LabelCatalog>,
    resize_to: u32,
    crop_size: u32,
    top_k: usize,
    score_mode: ScoreMode,
}

impl OnnxClassifier {
    /// Loads the model from `config.model_path`, downloading it first when the file is absent.
    pub fn load(
        config: &ClassifierConfig,
        labels: Arc<LabelCatalog>,
        client: &ReqwestClient,
    ) -> Result<Self, ModelLoadError> {
        ensure_model_file(&config.model_path, &config.model_url, client)?;

        log::info!("loading classifier model from {}", config.model_path.display());
        let size = config.crop_size as usize;
        let load_error = |err: TractError| ModelLoadError::Load {
            path: config.model_path.display().to_string(),
            message: err.to_string(),
        };

        let plan = tract_onnx::onnx()
            .model_for_path(&config.model_path)
            .map_err(load_error)?
            .with_input_fact(0, f32::fact([1, 3, size, size]).into())
            .map_err(load_error)?
            .into_optimized()
            .map_err(load_error)?
            .into_runnable()
            .map_err(load_error)?;

        log::info!("classifier model ready");
        Ok(Self {
            plan,
            labels,
            resize_to: config.resize_to,
            crop_size: config.crop_size,
            top_k: config.top_k,
            score_mode: config.score_mode,
        })
    }

    fn scores(&self, image: &DynamicImage) -> Result<Vec<f32>, ClassifyError> {
        let input = preprocess(image, self.resize_to, self.crop_size)?;

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|err| ClassifyError::Inference(err.to_string()))?;
        let first = outputs
            .first()
            .ok_or_else(|| ClassifyError::Inference(String::from("model produced no output")))?;
        let view = first
            .to_array_view::<f32>()
            .map_err(|err| ClassifyError::Inference(err.to_string()))?;

        Ok(view.iter().copied().collect())
    }
}

impl ImageClassifier for OnnxClassifier {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Prediction>, ClassifyError> {
        let mut scores = self.scores(image)?;

        if self.score_mode == ScoreMode::Softmax {
            scores = softmax(&scores);
        }

        let predictions = top_predictions(&scores, &self.labels, self.top_k)?;
        for prediction in &predictions {
            log::debug!("{}: {:.4}", prediction.label, prediction.score);
        }
        Ok(predictions)
    }
}

/// Resize shortest side to `resize_to`, centre crop `crop_size`, normalize into an NCHW tensor.
pub fn preprocess(
    image: &DynamicImage,
    resize_to: u32,
    crop_size: u32,
) -> Result<Tensor, ClassifyError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(ClassifyError::EmptyImage);
    }

    let (resized_width, resized_height) = resized_dimensions(width, height, resize_to);
    let resized = image.resize_exact(resized_width, resized_height, FilterType::Triangle);
    let crop_width = crop_size.min(resized_width);
    let crop_height = crop_size.min(resized_height);
    let left = center_crop_offset(resized_width, crop_width);
    let top = center_crop_offset(resized_height, crop_height);
    let cropped = resized.crop_imm(left, top, crop_width, crop_height);
    let rgb = if crop_width == crop_size && crop_height == crop_size {
        cropped.to_rgb8()
    } else {
        cropped
            .resize_exact(crop_size, crop_size, FilterType::Triangle)
            .to_rgb8()
    };

    let size = crop_size as usize;
    let tensor: Tensor = tract_ndarray::Array4::from_shape_fn((1, 3, size, size), |(_, c, y, x)| {
        let value = rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0;
        (value - IMAGENET_MEAN[c]) / IMAGENET_STD[c]
    })
    .into();

    Ok(tensor)
}

/// Scales the shorter side to `resize_to`; the longer side is truncated, as torchvision does.
pub fn resized_dimensions(width: u32, height: u32, resize_to: u32) -> (u32, u32) {
    let scale_long = |long: u32, short: u32| {
        ((u64::from(long) * u64::from(resize_to)) / u64::from(short)).max(1) as u32
    };

    if width <= height {
        (resize_to, scale_long(height, width))
    } else {
        (scale_long(width, height), resize_to)
    }
}

/// Offset of a centred crop, rounding half to even.
pub fn center_crop_offset(length: u32, crop: u32) -> u32 {
    (f64::from(length.saturating_sub(crop)) / 2.0).round_ties_even() as u32
}

/// The `k` highest scores in descending order, labelled through `labels`.
pub fn top_predictions(
    scores: &[f32],
    labels: &LabelCatalog,
    k: usize,
) -> Result<Vec<Prediction>, ClassifyError> {
    if scores.len() < k {
        return Err(ClassifyError::TooFewScores(scores.len()));
    }

    let mut indexed: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    Ok(indexed
        .into_iter()
        .take(k)
        .map(|(index, score)| Prediction::new(labels.label(index), score))
        .collect())
}

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn ensure_model_file(path: &Path, url: &str, client: &ReqwestClient) -> Result<(), ModelLoadError> {
    if path.is_file() {
        return Ok(());
    }

    log::info!("model not found at {}, downloading from {url}", path.display());
    let response = client.get_ok(Url::parse(url)?)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    // An interrupted download leaves only the `.part` file behind.
    let partial = path.with_extension("part");
    fs::write(&partial, &response.body)?;
    fs::rename(&partial, path)?;

    log::info!("downloaded {} bytes to {}", response.body.len(), path.display());
    Ok(())
}
