//! Two-stage image content classifier
//!
//! Stage 1: pixel heuristics (instant, CPU, no network). Catches the
//! obvious cases: product-on-white, swatch, infographic.
//! Stage 2: vision-service fallback for the uncertain remainder. The
//! image is re-encoded compactly and sent with a prompt restricted to
//! the six canonical labels.
//!
//! Any failure at either stage degrades to a low-confidence `detail`
//! result so one unreachable asset never blocks the rest of the batch.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use tokio::time::timeout;

use crate::domain::asset::{AssetRecord, MediaType};
use crate::domain::classification::{ClassificationResult, ClassificationStage, ImageLabel};
use crate::domain::config::VisionConfig;
use crate::domain::error::{AppError, Result};

use super::heuristics::classify_heuristic;

/// Stage-1 results below this confidence are escalated to stage 2
pub const CONFIDENCE_THRESHOLD: u8 = 65;

/// JPEG quality for the compact stage-2 re-encode
const REENCODE_QUALITY: u8 = 75;

/// Prompt restricted to the six-label set; the answer is normalized
/// through the synonym table afterwards.
pub const CLASSIFY_PROMPT: &str = "\
You are classifying a product image for an e-commerce asset library.

Look at this image and pick EXACTLY ONE label:

  main_product_image   -- single product on white or very light background
  lifestyle            -- product shown in a room or real-world scene
  informational        -- infographic with text, icons, charts
  dimension            -- technical drawing showing measurements
  swatch               -- a colour or material sample block
  detail               -- close-up, angle shot, or anything that does not fit above

Respond with ONLY the label, nothing else.";

/// Seam to the external vision-capable service
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Submit a JPEG and return the service's raw text answer
    async fn classify_image(
        &self,
        config: &VisionConfig,
        jpeg_bytes: &[u8],
        prompt: &str,
    ) -> Result<String>;
}

pub struct ImageClassifier {
    vision: Arc<dyn VisionClient>,
    config: VisionConfig,
}

impl ImageClassifier {
    pub fn new(vision: Arc<dyn VisionClient>, config: VisionConfig) -> Self {
        Self { vision, config }
    }

    /// Classify raw image bytes: heuristic first, service if uncertain
    pub async fn classify_bytes(&self, bytes: &[u8]) -> ClassificationResult {
        let image = match image::load_from_memory(bytes) {
            Ok(img) => img,
            Err(err) => {
                return ClassificationResult::failed(format!("image decode failed: {}", err))
            }
        };

        let heuristic = classify_heuristic(&image);
        if heuristic.confidence >= CONFIDENCE_THRESHOLD {
            return heuristic;
        }

        let signals = heuristic.signals.unwrap_or_default();
        match self.classify_external(&image).await {
            Ok(raw) => {
                let label = normalize_answer(&raw);
                tracing::debug!(raw = %raw, label = %label, "vision fallback answered");
                ClassificationResult::external(label, raw, signals)
            }
            Err(err) => {
                tracing::warn!(error = %err, "vision fallback failed");
                ClassificationResult::failed(err.to_string())
            }
        }
    }

    async fn classify_external(&self, image: &DynamicImage) -> Result<String> {
        let mut jpeg = Vec::new();
        let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut jpeg), REENCODE_QUALITY);
        image
            .to_rgb8()
            .write_with_encoder(encoder)
            .map_err(|e| AppError::Vision(format!("jpeg encode failed: {}", e)))?;

        timeout(
            Duration::from_secs(self.config.timeout_secs),
            self.vision.classify_image(&self.config, &jpeg, CLASSIFY_PROMPT),
        )
        .await
        .map_err(|_| {
            AppError::Vision(format!(
                "vision call timed out after {}s",
                self.config.timeout_secs
            ))
        })?
    }
}

/// Map a free-text service answer back to a canonical label.
/// Unrecognized answers default to `detail`.
pub fn normalize_answer(raw: &str) -> ImageLabel {
    let cleaned = raw.trim().to_lowercase().replace(['_', '-'], " ");

    const SYNONYMS: &[(&str, ImageLabel)] = &[
        ("main product image", ImageLabel::MainProductImage),
        ("main product", ImageLabel::MainProductImage),
        ("product image", ImageLabel::MainProductImage),
        ("lifestyle", ImageLabel::Lifestyle),
        ("informational", ImageLabel::Informational),
        ("infographic", ImageLabel::Informational),
        ("dimension", ImageLabel::Dimension),
        ("dimensions", ImageLabel::Dimension),
        ("technical", ImageLabel::Dimension),
        ("diagram", ImageLabel::Dimension),
        ("swatch", ImageLabel::Swatch),
        ("color swatch", ImageLabel::Swatch),
        ("colour swatch", ImageLabel::Swatch),
        ("detail", ImageLabel::Detail),
        ("angle", ImageLabel::Detail),
        ("close up", ImageLabel::Detail),
    ];

    for (key, label) in SYNONYMS {
        if cleaned == *key {
            return *label;
        }
    }
    for (key, label) in SYNONYMS {
        if cleaned.contains(key) {
            return *label;
        }
    }
    ImageLabel::Detail
}

/// Merge a classification into a record's media type, but only when the
/// column role left it at the default and the result is trustworthy.
pub fn apply_classification(record: &mut AssetRecord, result: &ClassificationResult) {
    if record.media_type != Some(MediaType::Detail) {
        return;
    }
    if result.stage == ClassificationStage::Error || result.confidence < CONFIDENCE_THRESHOLD {
        return;
    }
    if let Some(media_type) = result.label.as_media_type() {
        record.media_type = Some(media_type);
    }
}
