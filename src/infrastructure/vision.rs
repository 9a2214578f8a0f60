// ============================================================
// VISION SERVICE CLIENT
// ============================================================
// Submits a JPEG plus the six-label prompt to the Anthropic
// messages endpoint and returns the raw text answer.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::application::use_cases::image_classifier::VisionClient;
use crate::domain::config::VisionConfig;
use crate::domain::error::{AppError, Result};

const API_VERSION: &str = "2023-06-01";
const MAX_ANSWER_TOKENS: u32 = 10;

#[derive(Serialize)]
struct VisionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock<'a> {
    Image { source: ImageSource },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'static str,
    data: String,
}

#[derive(Deserialize)]
struct VisionResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(default)]
    text: Option<String>,
}

pub struct ClaudeVisionClient {
    client: reqwest::Client,
}

impl ClaudeVisionClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn api_key(config: &VisionConfig) -> Result<String> {
        config
            .api_key
            .clone()
            .ok_or_else(|| AppError::Vision("Missing API key for vision service".to_string()))
    }
}

impl Default for ClaudeVisionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisionClient for ClaudeVisionClient {
    async fn classify_image(
        &self,
        config: &VisionConfig,
        jpeg_bytes: &[u8],
        prompt: &str,
    ) -> Result<String> {
        let api_key = Self::api_key(config)?;

        let body = VisionRequest {
            model: &config.model,
            max_tokens: MAX_ANSWER_TOKENS,
            messages: vec![RequestMessage {
                role: "user",
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64",
                            media_type: "image/jpeg",
                            data: BASE64.encode(jpeg_bytes),
                        },
                    },
                    ContentBlock::Text { text: prompt },
                ],
            }],
        };

        let response = self
            .client
            .post(&config.base_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Vision(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Vision(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: VisionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Vision(format!("Failed to parse JSON: {}", e)))?;

        json.content
            .iter()
            .find_map(|block| block.text.as_deref())
            .map(|text| text.trim().to_string())
            .ok_or_else(|| AppError::Vision("Invalid response format".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = VisionRequest {
            model: "claude-haiku-4-5-20251001",
            max_tokens: MAX_ANSWER_TOKENS,
            messages: vec![RequestMessage {
                role: "user",
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64",
                            media_type: "image/jpeg",
                            data: BASE64.encode(b"fake"),
                        },
                    },
                    ContentBlock::Text { text: "prompt" },
                ],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["content"][0]["type"], "image");
        assert_eq!(
            json["messages"][0]["content"][0]["source"]["media_type"],
            "image/jpeg"
        );
        assert_eq!(json["messages"][0]["content"][1]["type"], "text");
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{"content":[{"type":"text","text":" swatch \n"}]}"#;
        let parsed: VisionResponse = serde_json::from_str(raw).unwrap();
        let answer = parsed
            .content
            .iter()
            .find_map(|b| b.text.as_deref())
            .map(|t| t.trim().to_string());
        assert_eq!(answer.as_deref(), Some("swatch"));
    }

    #[test]
    fn test_missing_api_key_is_vision_error() {
        let config = VisionConfig::default();
        assert!(matches!(
            ClaudeVisionClient::api_key(&config),
            Err(AppError::Vision(_))
        ));
    }
}
