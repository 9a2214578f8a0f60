// ============================================================
// ASSET FETCHER
// ============================================================
// Downloads a referenced asset with a fixed timeout and detects
// PDF and video references before any image decode is attempted.

use url::Url;

use crate::application::use_cases::image_classifier::ImageClassifier;
use crate::application::use_cases::lexicon::is_video_reference;
use crate::domain::classification::ClassificationResult;
use crate::domain::error::{AppError, Result};

const FETCH_TIMEOUT_SECS: u64 = 15;

/// What a fetched reference turned out to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchedKind {
    Image,
    Pdf,
    Video,
}

#[derive(Debug)]
pub struct FetchedAsset {
    pub kind: FetchedKind,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

pub struct AssetFetcher {
    client: reqwest::Client,
}

impl AssetFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Download one referenced asset
    pub async fn fetch(&self, raw_url: &str) -> Result<FetchedAsset> {
        let parsed = Url::parse(raw_url)
            .map_err(|e| AppError::Fetch(format!("invalid url '{}': {}", raw_url, e)))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("request failed for '{}': {}", raw_url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::Fetch(format!(
                "'{}' answered {}",
                raw_url,
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let kind = detect_kind(raw_url, content_type.as_deref());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Fetch(format!("body read failed for '{}': {}", raw_url, e)))?
            .to_vec();

        Ok(FetchedAsset {
            kind,
            bytes,
            content_type,
        })
    }

    /// Retrieve a reference and classify it when it is an image.
    /// PDF and video references are not image-classifiable; like any
    /// fetch failure they degrade to the conservative error result.
    pub async fn fetch_and_classify(
        &self,
        classifier: &ImageClassifier,
        url: &str,
    ) -> ClassificationResult {
        match self.fetch(url).await {
            Ok(asset) => match asset.kind {
                FetchedKind::Image => classifier.classify_bytes(&asset.bytes).await,
                FetchedKind::Pdf => {
                    ClassificationResult::failed(format!("'{}' is a pdf reference", url))
                }
                FetchedKind::Video => {
                    ClassificationResult::failed(format!("'{}' is a video reference", url))
                }
            },
            Err(err) => ClassificationResult::failed(err.to_string()),
        }
    }
}

impl Default for AssetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// PDF wins over everything (content type is authoritative), then
/// video markers; anything else is treated as an image candidate.
fn detect_kind(url: &str, content_type: Option<&str>) -> FetchedKind {
    let lowered = url.to_lowercase();
    if content_type.is_some_and(|c| c.to_lowercase().contains("pdf"))
        || lowered.ends_with(".pdf")
    {
        return FetchedKind::Pdf;
    }
    if is_video_reference(url) {
        return FetchedKind::Video;
    }
    FetchedKind::Image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf_by_content_type() {
        assert_eq!(
            detect_kind("https://cdn.example.com/spec", Some("application/pdf")),
            FetchedKind::Pdf
        );
    }

    #[test]
    fn test_detect_pdf_by_extension() {
        assert_eq!(
            detect_kind("https://cdn.example.com/Spec.PDF", None),
            FetchedKind::Pdf
        );
    }

    #[test]
    fn test_detect_video_by_extension_and_marker() {
        assert_eq!(
            detect_kind("https://cdn.example.com/promo.mp4", Some("video/mp4")),
            FetchedKind::Video
        );
        assert_eq!(
            detect_kind("https://youtube.com/watch?v=x", Some("text/html")),
            FetchedKind::Video
        );
    }

    #[test]
    fn test_everything_else_is_image_candidate() {
        assert_eq!(
            detect_kind("https://cdn.example.com/a.jpg", Some("image/jpeg")),
            FetchedKind::Image
        );
        assert_eq!(detect_kind("https://cdn.example.com/a", None), FetchedKind::Image);
    }

    #[tokio::test]
    async fn test_invalid_url_is_fetch_error() {
        let fetcher = AssetFetcher::new();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
    }
}
