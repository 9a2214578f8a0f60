// ============================================================
// SKU COLUMN RESOLVER
// ============================================================
// Finds the product-identifier column among vendor headers.

use crate::domain::error::{AppError, Result};

use super::lexicon::SKU_CANDIDATES;

/// First header (in sheet order) whose lowered name is a known SKU
/// synonym, or None.
pub fn auto_detect(headers: &[String]) -> Option<String> {
    headers
        .iter()
        .find(|h| {
            let lowered = h.trim().to_lowercase();
            SKU_CANDIDATES.contains(&lowered.as_str())
        })
        .cloned()
}

/// Resolve the SKU column for a generation pass. Manual operator input
/// always wins, matched case-insensitively against real headers; with no
/// manual input, fall back to auto-detection. No resolution is a
/// configuration error: generation must not start without one.
pub fn confirm(manual: Option<&str>, headers: &[String]) -> Result<String> {
    if let Some(name) = manual.map(str::trim).filter(|s| !s.is_empty()) {
        let lowered = name.to_lowercase();
        return headers
            .iter()
            .find(|h| h.to_lowercase() == lowered)
            .cloned()
            .ok_or_else(|| {
                AppError::Config(format!(
                    "SKU column '{}' not found. Available columns: {:?}",
                    name, headers
                ))
            });
    }

    auto_detect(headers).ok_or_else(|| {
        AppError::Config(format!(
            "no SKU column could be detected. Available columns: {:?}",
            headers
        ))
    })
}
