// ============================================================
// LEXICAL PATTERN TABLES
// ============================================================
// Static weighted keyword dictionaries per role class, extension
// sets, and the identifier-name candidate list. Shared by the
// column classifier and the record builder.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::asset::MediaType;
use crate::domain::column::ColumnRole;

use super::naming::{file_extension, slug};

/// Headers like "Image File 1 URL" that shadow a primary filename column
static URL_VARIANT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.+?)[\s_./-]+(?:url|link)s?\s*$").unwrap());

/// One weighted header keyword
pub struct Keyword {
    pub token: &'static str,
    pub weight: u32,
    /// Media type the keyword implies for image columns
    pub category: Option<MediaType>,
}

const fn kw(token: &'static str, weight: u32) -> Keyword {
    Keyword {
        token,
        weight,
        category: None,
    }
}

const fn kw_cat(token: &'static str, weight: u32, category: MediaType) -> Keyword {
    Keyword {
        token,
        weight,
        category: Some(category),
    }
}

pub static IMAGE_KEYWORDS: &[Keyword] = &[
    kw("image", 2),
    kw("img", 2),
    kw("photo", 2),
    kw("picture", 2),
    kw("shot", 1),
    kw_cat("lifestyle", 3, MediaType::Lifestyle),
    kw_cat("application", 2, MediaType::Lifestyle),
    kw_cat("room", 1, MediaType::Lifestyle),
    kw_cat("swatch", 3, MediaType::Swatch),
    kw_cat("finish", 2, MediaType::Swatch),
    kw_cat("infographic", 3, MediaType::Informational),
    kw_cat("diagram", 3, MediaType::Dimension),
    kw_cat("dimensional", 2, MediaType::Dimension),
    kw_cat("dimension", 2, MediaType::Dimension),
    kw_cat("angle", 2, MediaType::Angle),
    kw_cat("beauty", 1, MediaType::Angle),
    kw_cat("sketch", 2, MediaType::Detail),
    kw_cat("render", 2, MediaType::Detail),
    kw_cat("collection", 1, MediaType::Detail),
    kw_cat("warranty", 1, MediaType::Detail),
];

pub static PDF_KEYWORDS: &[Keyword] = &[
    kw("spec", 3),
    kw("specs", 3),
    kw("specsheet", 3),
    kw("datasheet", 3),
    kw("sheet", 1),
    kw("install", 3),
    kw("installation", 3),
    kw("assembly", 3),
    kw("manual", 2),
    kw("guide", 2),
    kw("dimmer", 2),
    kw("pdf", 3),
];

pub static VIDEO_KEYWORDS: &[Keyword] = &[
    kw("video", 3),
    kw("videos", 3),
    kw("mp4", 2),
    kw("youtube", 2),
    kw("vimeo", 2),
    kw("clip", 1),
    kw("movie", 1),
];

pub static IMAGE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

pub static PDF_EXTENSIONS: &[&str] = &["pdf"];

pub static VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "wmv", "webm"];

/// Every plausible vendor name for the SKU / product-id column.
/// Matched case-insensitively against real headers.
pub static SKU_CANDIDATES: &[&str] = &[
    "sku", "item number", "item_number", "item num", "item_num",
    "model number", "model_number", "model no", "model_no",
    "product code", "product_code", "product number", "product_number",
    "part number", "part_number", "part no", "part_no",
    "item code", "item_code", "article number", "article_number",
    "catalog number", "catalog_number", "material number", "material_number",
    "style number", "style_number", "style no", "style_no",
    "upc", "gtin", "barcode", "bar code",
    "product id", "product_id", "item id", "item_id",
    "sku number", "sku_number", "sku no", "sku_no",
    "reference", "ref", "code", "identifier",
    "asin", "mfg part", "mfg_part", "manufacturer part",
    "vendor sku", "vendor_sku", "supplier sku", "supplier_sku",
];

/// Accumulated name-stage evidence for one header
#[derive(Debug, Default)]
pub struct HeaderScore {
    pub image: u32,
    pub pdf: u32,
    pub video: u32,
    /// "token (class)" strings for the evidence trail
    pub hits: Vec<String>,
    /// Strongest implied media type among image keyword hits
    pub category: Option<MediaType>,
}

impl HeaderScore {
    pub fn total(&self) -> u32 {
        self.image + self.pdf + self.video
    }

    /// Name-stage score for one content class
    pub fn class_score(&self, role: ColumnRole) -> u32 {
        match role {
            ColumnRole::Image => self.image,
            ColumnRole::Pdf => self.pdf,
            ColumnRole::Video => self.video,
            _ => 0,
        }
    }
}

fn tokenize(header: &str) -> Vec<String> {
    header
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Score a header against all three lexicons
pub fn score_header(header: &str) -> HeaderScore {
    let tokens = tokenize(header);
    let mut score = HeaderScore::default();
    let mut best_category_weight = 0u32;

    for token in &tokens {
        for keyword in IMAGE_KEYWORDS {
            if token == keyword.token {
                score.image += keyword.weight;
                score.hits.push(format!("{} (image)", keyword.token));
                if let Some(category) = keyword.category {
                    if keyword.weight > best_category_weight {
                        best_category_weight = keyword.weight;
                        score.category = Some(category);
                    }
                }
            }
        }
        for keyword in PDF_KEYWORDS {
            if token == keyword.token {
                score.pdf += keyword.weight;
                score.hits.push(format!("{} (pdf)", keyword.token));
            }
        }
        for keyword in VIDEO_KEYWORDS {
            if token == keyword.token {
                score.video += keyword.weight;
                score.hits.push(format!("{} (video)", keyword.token));
            }
        }
    }

    score
}

/// Content class of a cell value by trailing extension
pub fn extension_role(value: &str) -> Option<ColumnRole> {
    let ext = file_extension(value)?;
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(ColumnRole::Image)
    } else if PDF_EXTENSIONS.contains(&ext.as_str()) {
        Some(ColumnRole::Pdf)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(ColumnRole::Video)
    } else {
        None
    }
}

/// Video file extension or a hosted-video marker anywhere in the value
pub fn is_video_reference(value: &str) -> bool {
    let lowered = value.to_lowercase();
    if lowered.contains("youtube") || lowered.contains("vimeo") {
        return true;
    }
    matches!(extension_role(value), Some(ColumnRole::Video))
}

pub fn is_url(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

/// For a duplicate "... URL"/"... Link" header, the primary column name
/// it shadows (slug-normalized). None when the header is not a variant.
pub fn url_variant_base(header: &str) -> Option<String> {
    let captures = URL_VARIANT_PATTERN.captures(header.trim())?;
    let base = slug(captures.get(1)?.as_str());
    if base.is_empty() {
        return None;
    }
    Some(base)
}

/// Slug-normalized form used to pair URL variants with primaries
pub fn normalized_header(header: &str) -> String {
    slug(header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_header_image_keywords() {
        let score = score_header("Lifestyle Image 1");
        assert!(score.image > 0);
        assert_eq!(score.category, Some(MediaType::Lifestyle));
    }

    #[test]
    fn test_score_header_mixed_classes() {
        // Both an image and a pdf keyword; the content stage decides.
        let score = score_header("Spec Sheet Image");
        assert!(score.image > 0);
        assert!(score.pdf > 0);
    }

    #[test]
    fn test_score_header_no_hits() {
        let score = score_header("Unit Price");
        assert_eq!(score.total(), 0);
        assert!(score.hits.is_empty());
    }

    #[test]
    fn test_extension_role() {
        assert_eq!(extension_role("a.JPG"), Some(ColumnRole::Image));
        assert_eq!(extension_role("a.pdf"), Some(ColumnRole::Pdf));
        assert_eq!(extension_role("a.webm"), Some(ColumnRole::Video));
        assert_eq!(extension_role("a.txt"), None);
        assert_eq!(extension_role("no extension"), None);
    }

    #[test]
    fn test_video_reference_markers() {
        assert!(is_video_reference("clip.MOV"));
        assert!(is_video_reference("https://youtube.com/watch?v=x"));
        assert!(is_video_reference("https://vimeo.com/12345"));
        assert!(!is_video_reference("photo.jpg"));
    }

    #[test]
    fn test_url_variant_base() {
        assert_eq!(
            url_variant_base("Image File 1 URL").as_deref(),
            Some("image_file_1")
        );
        assert_eq!(
            url_variant_base("Lifestyle Image Link").as_deref(),
            Some("lifestyle_image")
        );
        assert_eq!(url_variant_base("Image File 1"), None);
        assert_eq!(url_variant_base("URL"), None);
    }
}
