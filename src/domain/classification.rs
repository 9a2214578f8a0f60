// ============================================================
// IMAGE CLASSIFICATION TYPES
// ============================================================
// Results of the two-stage image content classifier.

use serde::{Deserialize, Serialize};

use super::asset::MediaType;

/// Semantic content label for a product image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageLabel {
    MainProductImage,
    Lifestyle,
    Informational,
    Dimension,
    Swatch,
    Detail,
}

impl ImageLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageLabel::MainProductImage => "main_product_image",
            ImageLabel::Lifestyle => "lifestyle",
            ImageLabel::Informational => "informational",
            ImageLabel::Dimension => "dimension",
            ImageLabel::Swatch => "swatch",
            ImageLabel::Detail => "detail",
        }
    }

    /// Media type this label maps onto; main images carry none
    pub fn as_media_type(&self) -> Option<MediaType> {
        match self {
            ImageLabel::MainProductImage => None,
            ImageLabel::Lifestyle => Some(MediaType::Lifestyle),
            ImageLabel::Informational => Some(MediaType::Informational),
            ImageLabel::Dimension => Some(MediaType::Dimension),
            ImageLabel::Swatch => Some(MediaType::Swatch),
            ImageLabel::Detail => Some(MediaType::Detail),
        }
    }
}

impl std::fmt::Display for ImageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stage produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationStage {
    Heuristic,
    External,
    Error,
}

/// The measurements stage 1 extracts from the downsampled frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSignals {
    /// Share of near-white pixels (r, g, b all > 230), percent
    pub white_pct: f32,

    /// Share of light pixels (r, g, b all > 210), percent
    pub light_pct: f32,

    /// Distinct coarse color buckets (8 bins per channel)
    pub color_buckets: usize,

    /// Share of edge pixels after 3x3 edge filtering, percent
    pub edge_pct: f32,

    /// Active cells in the 10x10 text-block grid
    pub text_blocks: usize,

    /// Light-pixel share of the inner 50% region, percent
    pub center_light_pct: f32,

    /// Grayscale standard deviation (contrast proxy)
    pub gray_std: f32,
}

/// One classified image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: ImageLabel,

    /// 0-100
    pub confidence: u8,

    pub stage: ClassificationStage,

    /// Stage-1 measurements, when stage 1 ran to completion
    pub signals: Option<ImageSignals>,

    /// Raw vision-service answer, retained for audit
    pub raw_answer: Option<String>,

    /// Failure description for `Error` results
    pub error: Option<String>,
}

impl ClassificationResult {
    pub fn heuristic(label: ImageLabel, confidence: u8, signals: ImageSignals) -> Self {
        Self {
            label,
            confidence,
            stage: ClassificationStage::Heuristic,
            signals: Some(signals),
            raw_answer: None,
            error: None,
        }
    }

    pub fn external(label: ImageLabel, raw_answer: String, signals: ImageSignals) -> Self {
        Self {
            label,
            // Trusted arbitration: the service only ever sees uncertain cases
            confidence: 92,
            stage: ClassificationStage::External,
            signals: Some(signals),
            raw_answer: Some(raw_answer),
            error: None,
        }
    }

    /// Conservative default: one unreachable asset never blocks the batch
    pub fn failed(error: String) -> Self {
        Self {
            label: ImageLabel::Detail,
            confidence: 0,
            stage: ClassificationStage::Error,
            signals: None,
            raw_answer: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_is_conservative() {
        let result = ClassificationResult::failed("timeout".to_string());
        assert_eq!(result.label, ImageLabel::Detail);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.stage, ClassificationStage::Error);
    }

    #[test]
    fn test_label_media_type_mapping() {
        assert_eq!(ImageLabel::MainProductImage.as_media_type(), None);
        assert_eq!(
            ImageLabel::Swatch.as_media_type(),
            Some(MediaType::Swatch)
        );
        assert_eq!(
            ImageLabel::Detail.as_media_type(),
            Some(MediaType::Detail)
        );
    }
}
