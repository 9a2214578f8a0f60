// ============================================================
// FILENAME / CODE NORMALIZER
// ============================================================
// Deterministic slug and the code/link composition rules. These
// are the external naming contract; change nothing lightly.

use std::path::Path;

/// Lowercase, map every char outside [a-z0-9_] to '_', collapse runs,
/// strip edge underscores. Total: never fails, empty in -> empty out.
pub fn slug(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Filename stem with original casing preserved ("Foo Bar.JPG" -> "Foo Bar")
pub fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Trailing extension, lowercased, without the dot
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Composes codes and destination links for one generation pass
pub struct AssetNamer<'a> {
    prefix: &'a str,
    brand_folder: &'a str,
}

impl<'a> AssetNamer<'a> {
    pub fn new(prefix: &'a str, brand_folder: &'a str) -> Self {
        Self {
            prefix,
            brand_folder,
        }
    }

    /// `{prefix}_{sku}`
    pub fn product_reference(&self, sku: &str) -> String {
        format!("{}_{}", self.prefix, sku)
    }

    /// `{prefix}_{slug(stem)}_new_1k`
    pub fn image_code(&self, stem: &str) -> String {
        format!("{}_{}_new_1k", self.prefix, slug(stem))
    }

    /// `{brand}/{folder}/{stem}_new_1k.jpg` — stem keeps original casing
    pub fn image_link(&self, folder: &str, stem: &str) -> String {
        format!("{}/{}/{}_new_1k.jpg", self.brand_folder, folder, stem)
    }

    /// `{prefix}_{slug(stem)}_specs`
    pub fn pdf_code(&self, stem: &str) -> String {
        format!("{}_{}_specs", self.prefix, slug(stem))
    }

    /// `{brand}/specsheets/{stem}_new.pdf`
    pub fn pdf_link(&self, stem: &str) -> String {
        format!("{}/specsheets/{}_new.pdf", self.brand_folder, stem)
    }

    /// `{prefix}_{slug(stem)}` — no suffix for videos
    pub fn video_code(&self, stem: &str) -> String {
        format!("{}_{}", self.prefix, slug(stem))
    }

    /// `{brand}/media/{original_filename}` kept verbatim
    pub fn video_link(&self, filename: &str) -> String {
        format!("{}/media/{}", self.brand_folder, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_basic() {
        assert_eq!(slug("Foo Bar"), "foo_bar");
        assert_eq!(slug("ALDF12LAJUDBK_App"), "aldf12lajudbk_app");
    }

    #[test]
    fn test_slug_collapses_and_trims() {
        assert_eq!(slug("--Foo  / Bar--"), "foo_bar");
        assert_eq!(slug("__a__b__"), "a_b");
        assert_eq!(slug(""), "");
        assert_eq!(slug("///"), "");
    }

    #[test]
    fn test_slug_idempotent() {
        for input in ["Foo Bar.JPG", "a--b__c", "Ünïcode Näme", "  spaced  "] {
            let once = slug(input);
            assert_eq!(slug(&once), once);
        }
    }

    #[test]
    fn test_slug_charset() {
        for input in ["Mixed CASE-123", "trailing_", "_leading", "a%$#b"] {
            let out = slug(input);
            assert!(out.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            assert!(!out.contains("__"));
            assert!(!out.starts_with('_') && !out.ends_with('_'));
        }
    }

    #[test]
    fn test_stem_and_extension() {
        assert_eq!(file_stem("Foo Bar.JPG"), "Foo Bar");
        assert_eq!(file_extension("Foo Bar.JPG").as_deref(), Some("jpg"));
        assert_eq!(file_extension("no_extension"), None);
        assert_eq!(file_stem("dir/Steps.pdf"), "Steps");
    }

    #[test]
    fn test_image_composition() {
        let namer = AssetNamer::new("2605", "afx");
        assert_eq!(namer.image_code("Foo Bar"), "2605_foo_bar_new_1k");
        assert_eq!(
            namer.image_link("products", "Foo Bar"),
            "afx/products/Foo Bar_new_1k.jpg"
        );
    }

    #[test]
    fn test_pdf_composition() {
        let namer = AssetNamer::new("2605", "afx");
        assert_eq!(namer.pdf_code("Steps"), "2605_steps_specs");
        assert_eq!(namer.pdf_link("Steps"), "afx/specsheets/Steps_new.pdf");
    }

    #[test]
    fn test_video_composition_keeps_filename() {
        let namer = AssetNamer::new("2605", "afx");
        assert_eq!(namer.video_code("Brand Promo"), "2605_brand_promo");
        assert_eq!(
            namer.video_link("Brand Promo.MP4"),
            "afx/media/Brand Promo.MP4"
        );
    }

    #[test]
    fn test_product_reference_uses_prefix() {
        let namer = AssetNamer::new("2605", "afx");
        assert_eq!(namer.product_reference("ABC-1"), "2605_ABC-1");
    }
}
