// ============================================================
// COLUMN ROLE CLASSIFIER
// ============================================================
// Two-stage role inference over vendor headers: keyword scoring
// on the name, then extension tallies over sampled values.
// Content evidence overrides name evidence.

use std::collections::HashSet;

use crate::domain::column::{
    ColumnEvidence, ColumnProfile, ColumnRole, ColumnScan, RejectedColumn, UrlPair,
};
use crate::domain::table::SourceTable;

use super::lexicon::{extension_role, normalized_header, score_header, url_variant_base};

/// Cap on non-null values sampled per column
pub const SAMPLE_CAP: usize = 30;

/// Classify every column of a table. Pure: no side effects, stable for
/// identical input. Columns without any keyword hit are excluded
/// entirely, which bounds the scan on very wide sheets.
pub fn scan_columns(table: &SourceTable) -> ColumnScan {
    let mut profiles = Vec::new();
    let mut rejected = Vec::new();

    let (url_pairs, url_indices) = detect_url_pairs(table);

    for (index, header) in table.headers.iter().enumerate() {
        if url_indices.contains(&index) {
            continue;
        }

        let score = score_header(header);
        if score.total() == 0 {
            continue;
        }

        if table.row_count() == 0 {
            profiles.push(ColumnProfile {
                name: header.clone(),
                index,
                role: ColumnRole::None,
                category: None,
                confidence: 0,
                evidence: ColumnEvidence {
                    keyword_hits: score.hits,
                    ..Default::default()
                },
            });
            continue;
        }

        let samples: Vec<&str> = table
            .column_values(index)
            .into_iter()
            .take(SAMPLE_CAP)
            .collect();

        let mut evidence = ColumnEvidence {
            keyword_hits: score.hits.clone(),
            sampled: samples.len(),
            ..Default::default()
        };
        for sample in &samples {
            match extension_role(sample) {
                Some(ColumnRole::Image) => evidence.image_ext_hits += 1,
                Some(ColumnRole::Pdf) => evidence.pdf_ext_hits += 1,
                Some(ColumnRole::Video) => evidence.video_ext_hits += 1,
                _ => {}
            }
        }

        // Content overrides name: the winner needs at least one sample
        // carrying its extension, whatever the header said.
        let candidates = [
            (ColumnRole::Image, evidence.image_ext_hits),
            (ColumnRole::Pdf, evidence.pdf_ext_hits),
            (ColumnRole::Video, evidence.video_ext_hits),
        ];
        let winner = candidates
            .iter()
            .filter(|(_, hits)| *hits > 0)
            .max_by_key(|(role, hits)| (*hits, score.class_score(*role)));

        let Some(&(role, hits)) = winner else {
            let reason = if samples.is_empty() {
                "no non-empty values sampled".to_string()
            } else {
                format!(
                    "keyword match but no matching extension in {} sampled value(s)",
                    samples.len()
                )
            };
            rejected.push(RejectedColumn {
                name: header.clone(),
                reason,
            });
            continue;
        };

        let confidence = (hits * 100 / samples.len().min(SAMPLE_CAP)) as u8;
        let category = if role == ColumnRole::Image {
            score.category
        } else {
            None
        };

        profiles.push(ColumnProfile {
            name: header.clone(),
            index,
            role,
            category,
            confidence,
            evidence,
        });
    }

    // Descending confidence; sheet order breaks ties.
    profiles.sort_by(|a, b| b.confidence.cmp(&a.confidence).then(a.index.cmp(&b.index)));

    ColumnScan {
        profiles,
        rejected,
        url_pairs,
    }
}

/// Duplicate "URL"/"link" variants of a primary filename column are
/// excluded from role assignment and paired for the retrieval path.
fn detect_url_pairs(table: &SourceTable) -> (Vec<UrlPair>, HashSet<usize>) {
    let normalized: Vec<String> = table.headers.iter().map(|h| normalized_header(h)).collect();

    let mut pairs = Vec::new();
    let mut indices = HashSet::new();

    for (i, header) in table.headers.iter().enumerate() {
        let Some(base) = url_variant_base(header) else {
            continue;
        };
        let primary = normalized
            .iter()
            .enumerate()
            .find(|(j, norm)| *j != i && norm.as_str() == base);
        if let Some((j, _)) = primary {
            pairs.push(UrlPair {
                url_column: header.clone(),
                paired_with: table.headers[j].clone(),
            });
            indices.insert(i);
        }
    }

    (pairs, indices)
}
