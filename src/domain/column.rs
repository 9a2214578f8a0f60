// ============================================================
// COLUMN PROFILES
// ============================================================
// What the role classifier knows about each source column, and
// what the operator confirms before a generation pass.

use serde::{Deserialize, Serialize};

use super::asset::MediaType;

/// Inferred semantic type of a spreadsheet column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Sku,
    Image,
    Pdf,
    Video,
    Url,
    None,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnRole::Sku => "sku",
            ColumnRole::Image => "image",
            ColumnRole::Pdf => "pdf",
            ColumnRole::Video => "video",
            ColumnRole::Url => "url",
            ColumnRole::None => "none",
        };
        f.write_str(name)
    }
}

/// Raw evidence gathered while classifying one column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnEvidence {
    /// Header tokens that hit a lexicon, with their class
    pub keyword_hits: Vec<String>,

    /// Non-null values sampled from the column (capped)
    pub sampled: usize,

    /// Samples whose extension matched the image set
    pub image_ext_hits: usize,

    /// Samples whose extension matched the pdf set
    pub pdf_ext_hits: usize,

    /// Samples whose extension matched the video set
    pub video_ext_hits: usize,
}

/// Classifier output for one column; operator-editable before freezing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,

    /// Original position in the sheet
    pub index: usize,

    pub role: ColumnRole,

    /// Media type implied by the header keywords (image columns only)
    pub category: Option<MediaType>,

    /// 0-100, share of samples carrying the winning extension
    pub confidence: u8,

    pub evidence: ColumnEvidence,
}

/// A keyword-bearing column that could not be assigned a role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedColumn {
    pub name: String,
    pub reason: String,
}

/// A duplicate URL/link variant paired with its primary filename column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlPair {
    pub url_column: String,
    pub paired_with: String,
}

/// Full result of one classification pass over a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnScan {
    /// Assigned columns, descending confidence, sheet order on ties
    pub profiles: Vec<ColumnProfile>,

    /// Keyword-bearing columns rejected for lack of matching samples
    pub rejected: Vec<RejectedColumn>,

    /// URL/link duplicates excluded from role assignment
    pub url_pairs: Vec<UrlPair>,
}

/// One column as frozen by the operator for a generation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedColumn {
    pub name: String,
    pub role: ColumnRole,

    /// Media type override; image columns fall back to `detail`
    pub media_type: Option<MediaType>,
}

impl ConfirmedColumn {
    pub fn new(name: &str, role: ColumnRole) -> Self {
        Self {
            name: name.to_string(),
            role,
            media_type: None,
        }
    }

    pub fn with_media_type(name: &str, role: ColumnRole, media_type: MediaType) -> Self {
        Self {
            name: name.to_string(),
            role,
            media_type: Some(media_type),
        }
    }
}

impl From<&ColumnProfile> for ConfirmedColumn {
    /// Accept a classifier suggestion as-is
    fn from(profile: &ColumnProfile) -> Self {
        Self {
            name: profile.name.clone(),
            role: profile.role,
            media_type: profile.category,
        }
    }
}
