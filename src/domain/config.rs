// ============================================================
// GENERATION CONFIGURATION
// ============================================================
// Naming inputs supplied by the embedding application before a run.

use serde::{Deserialize, Serialize};

use super::error::{AppError, Result};

/// Naming configuration for one generation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Vendor display name, e.g. "AFX Lighting"
    pub vendor_name: String,

    /// Manufacturer prefix for codes and product references, e.g. "2605"
    pub prefix: String,

    /// Destination folder root, e.g. "afx"
    pub brand_folder: String,
}

impl GenerationConfig {
    pub fn new(vendor_name: &str, prefix: &str, brand_folder: &str) -> Self {
        Self {
            vendor_name: vendor_name.to_string(),
            prefix: prefix.to_string(),
            brand_folder: brand_folder.to_string(),
        }
    }

    /// Default brand folder: vendor name lowercased with spaces stripped
    pub fn default_brand_folder(vendor_name: &str) -> String {
        vendor_name.to_lowercase().replace(' ', "")
    }

    pub fn validate(&self) -> Result<()> {
        if self.prefix.trim().is_empty() {
            return Err(AppError::Config(
                "manufacturer prefix is required".to_string(),
            ));
        }
        if !self.prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::Config(format!(
                "manufacturer prefix '{}' must be alphanumeric",
                self.prefix
            )));
        }
        if self.brand_folder.trim().is_empty() {
            return Err(AppError::Config("brand folder is required".to_string()));
        }
        if self
            .brand_folder
            .chars()
            .any(|c| c.is_ascii_uppercase() || c.is_whitespace() || c == '/')
        {
            return Err(AppError::Config(format!(
                "brand folder '{}' must be a lowercase token",
                self.brand_folder
            )));
        }
        Ok(())
    }
}

/// Connection settings for the stage-2 vision service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,

    /// Per-call ceiling; a slow call degrades, it never blocks the batch
    pub timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-haiku-4-5-20251001".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config_passes() {
        let config = GenerationConfig::new("AFX Lighting", "2605", "afx");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let config = GenerationConfig::new("AFX", "", "afx");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_alphanumeric_prefix_rejected() {
        let config = GenerationConfig::new("AFX", "26-05", "afx");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_uppercase_brand_folder_rejected() {
        let config = GenerationConfig::new("AFX", "2605", "AFX");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_brand_folder_strips_spaces() {
        assert_eq!(
            GenerationConfig::default_brand_folder("AFX Lighting"),
            "afxlighting"
        );
    }
}
