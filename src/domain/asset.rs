// ============================================================
// ASSET RECORD TYPES
// ============================================================
// Output-side value objects. Wire names are the external contract
// and must not change.

use serde::{Deserialize, Serialize};

/// Fixed output column names, in contract order
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "code",
    "label-en_US",
    "product_reference",
    "imagelink",
    "assetFamilyIdentifier",
    "mediatype",
];

/// Destination family of one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetFamily {
    MainProductImage,
    Media,
    SpecSheet,
    InstallSheet,
}

impl AssetFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetFamily::MainProductImage => "main_product_image",
            AssetFamily::Media => "media",
            AssetFamily::SpecSheet => "spec_sheet",
            AssetFamily::InstallSheet => "install_sheet",
        }
    }

    /// Destination folder segment for image links
    pub fn folder(&self) -> &'static str {
        match self {
            AssetFamily::MainProductImage => "products",
            AssetFamily::Media => "media",
            AssetFamily::SpecSheet | AssetFamily::InstallSheet => "specsheets",
        }
    }
}

impl std::fmt::Display for AssetFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary classification tag for non-main image assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Lifestyle,
    Angle,
    Informational,
    Dimension,
    Swatch,
    Detail,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Lifestyle => "lifestyle",
            MediaType::Angle => "angle",
            MediaType::Informational => "informational",
            MediaType::Dimension => "dimension",
            MediaType::Swatch => "swatch",
            MediaType::Detail => "detail",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "lifestyle" => Some(MediaType::Lifestyle),
            "angle" => Some(MediaType::Angle),
            "informational" => Some(MediaType::Informational),
            "dimension" => Some(MediaType::Dimension),
            "swatch" => Some(MediaType::Swatch),
            "detail" => Some(MediaType::Detail),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row describing a single file's destination and classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub code: String,

    /// Always equal to `code`; the target schema has no independent label
    #[serde(rename = "label-en_US")]
    pub label: String,

    pub product_reference: String,

    #[serde(rename = "imagelink")]
    pub asset_link: String,

    #[serde(rename = "assetFamilyIdentifier")]
    pub asset_family: AssetFamily,

    /// None renders as the empty string (main images and PDFs)
    #[serde(rename = "mediatype")]
    pub media_type: Option<MediaType>,
}

impl AssetRecord {
    pub fn new(
        code: String,
        product_reference: String,
        asset_link: String,
        asset_family: AssetFamily,
        media_type: Option<MediaType>,
    ) -> Self {
        let label = code.clone();
        Self {
            code,
            label,
            product_reference,
            asset_link,
            asset_family,
            media_type,
        }
    }

    /// Cell values in `OUTPUT_COLUMNS` order
    pub fn to_row(&self) -> [String; 6] {
        [
            self.code.clone(),
            self.label.clone(),
            self.product_reference.clone(),
            self.asset_link.clone(),
            self.asset_family.as_str().to_string(),
            self.media_type.map(|m| m.as_str()).unwrap_or("").to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mirrors_code() {
        let record = AssetRecord::new(
            "2605_foo_new_1k".to_string(),
            "2605_ABC-1".to_string(),
            "afx/products/foo_new_1k.jpg".to_string(),
            AssetFamily::MainProductImage,
            None,
        );
        assert_eq!(record.label, record.code);
    }

    #[test]
    fn test_row_renders_empty_media_type() {
        let record = AssetRecord::new(
            "c".to_string(),
            "p".to_string(),
            "l".to_string(),
            AssetFamily::SpecSheet,
            None,
        );
        let row = record.to_row();
        assert_eq!(row[4], "spec_sheet");
        assert_eq!(row[5], "");
    }

    #[test]
    fn test_family_folders() {
        assert_eq!(AssetFamily::MainProductImage.folder(), "products");
        assert_eq!(AssetFamily::Media.folder(), "media");
        assert_eq!(AssetFamily::InstallSheet.folder(), "specsheets");
    }

    #[test]
    fn test_media_type_parse_round_trip() {
        for mt in [
            MediaType::Lifestyle,
            MediaType::Angle,
            MediaType::Informational,
            MediaType::Dimension,
            MediaType::Swatch,
            MediaType::Detail,
        ] {
            assert_eq!(MediaType::parse(mt.as_str()), Some(mt));
        }
        assert_eq!(MediaType::parse("unknown"), None);
    }
}
