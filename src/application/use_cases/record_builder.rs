// ============================================================
// ASSET RECORD BUILDER
// ============================================================
// Walks confirmed columns row by row, synthesizes codes and
// links, and runs the main/media state machine.

use std::collections::HashSet;

use crate::domain::asset::{AssetFamily, AssetRecord, MediaType};
use crate::domain::column::{ColumnRole, ConfirmedColumn};
use crate::domain::config::GenerationConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::table::SourceTable;

use super::lexicon::{extension_role, is_url, is_video_reference};
use super::naming::{file_stem, AssetNamer};
use super::run_log::RunLog;

/// Whether the current row still owes its main product image.
/// The first valid image hit in confirmed-column order fills the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainSlot {
    Open,
    Filled,
}

/// A complete generation pass: records in row-major confirmed-column
/// order plus the run report.
#[derive(Debug)]
pub struct GenerationOutput {
    pub records: Vec<AssetRecord>,
    pub log: RunLog,
}

pub struct RecordBuilder {
    config: GenerationConfig,
}

impl RecordBuilder {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Generate the record batch. Configuration problems fail the whole
    /// run with no partial output; row- and cell-level problems are
    /// recovered locally and reported through the log.
    pub fn build(
        &self,
        table: &SourceTable,
        columns: &[ConfirmedColumn],
        sku_column: &str,
    ) -> Result<GenerationOutput> {
        self.config.validate()?;

        let sku_idx = table.column_index_ci(sku_column).ok_or_else(|| {
            AppError::Config(format!(
                "SKU column '{}' not found. Available columns: {:?}",
                sku_column, table.headers
            ))
        })?;

        let namer = AssetNamer::new(&self.config.prefix, &self.config.brand_folder);
        let mut log = RunLog::new(
            &self.config.prefix,
            &self.config.brand_folder,
            &table.headers[sku_idx],
        );

        // Confirmed order is binding: it decides which image becomes main.
        let mut resolved: Vec<(usize, &ConfirmedColumn)> = Vec::with_capacity(columns.len());
        for column in columns {
            match table.column_index_ci(&column.name) {
                Some(idx) => resolved.push((idx, column)),
                None => {
                    tracing::warn!(column = %column.name, "confirmed column missing from sheet");
                    log.reject_column(&column.name, "not found in sheet");
                }
            }
        }

        let mut records = Vec::new();
        let mut seen_skus: HashSet<String> = HashSet::new();
        let mut seen_codes: HashSet<String> = HashSet::new();

        for row_idx in 0..table.row_count() {
            let row_num = row_idx + 1;

            let Some(sku) = table.cell_value(row_idx, sku_idx) else {
                log.skip_row(row_num, "empty SKU");
                continue;
            };
            if !seen_skus.insert(sku.to_string()) {
                log.skip_row(row_num, &format!("duplicate SKU '{}'", sku));
                continue;
            }

            let product_ref = namer.product_reference(sku);
            let mut main_slot = MainSlot::Open;

            for &(col_idx, column) in &resolved {
                let Some(value) = table.cell_value(row_idx, col_idx) else {
                    continue;
                };

                match column.role {
                    ColumnRole::Image => self.emit_image(
                        value,
                        column,
                        &namer,
                        &product_ref,
                        &mut main_slot,
                        row_num,
                        &mut records,
                        &mut seen_codes,
                        &mut log,
                    ),
                    ColumnRole::Pdf => self.emit_pdf(
                        value,
                        column,
                        &namer,
                        &product_ref,
                        row_num,
                        &mut records,
                        &mut seen_codes,
                        &mut log,
                    ),
                    ColumnRole::Video => self.emit_video(
                        value,
                        &namer,
                        &product_ref,
                        row_num,
                        &mut records,
                        &mut seen_codes,
                        &mut log,
                    ),
                    _ => {}
                }
            }
        }

        tracing::info!(
            records = records.len(),
            skipped_rows = log.skipped_row_count(),
            "asset record batch generated"
        );

        Ok(GenerationOutput { records, log })
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_image(
        &self,
        value: &str,
        column: &ConfirmedColumn,
        namer: &AssetNamer,
        product_ref: &str,
        main_slot: &mut MainSlot,
        row_num: usize,
        records: &mut Vec<AssetRecord>,
        seen_codes: &mut HashSet<String>,
        log: &mut RunLog,
    ) {
        if is_video_reference(value) {
            log.flag_cell(row_num, &column.name, "video reference in image column");
            return;
        }
        if extension_role(value) != Some(ColumnRole::Image) {
            if is_url(value) {
                log.flag_cell(row_num, &column.name, "url without image extension");
            } else {
                log.count_mismatch();
            }
            return;
        }

        let stem = file_stem(value);
        let (family, media_type) = match *main_slot {
            MainSlot::Open => {
                *main_slot = MainSlot::Filled;
                (AssetFamily::MainProductImage, None)
            }
            MainSlot::Filled => (
                AssetFamily::Media,
                Some(column.media_type.unwrap_or(MediaType::Detail)),
            ),
        };

        let record = AssetRecord::new(
            namer.image_code(&stem),
            product_ref.to_string(),
            namer.image_link(family.folder(), &stem),
            family,
            media_type,
        );
        push_unique(record, row_num, records, seen_codes, log);
    }

    #[allow(clippy::too_many_arguments)]
    fn emit_pdf(
        &self,
        value: &str,
        column: &ConfirmedColumn,
        namer: &AssetNamer,
        product_ref: &str,
        row_num: usize,
        records: &mut Vec<AssetRecord>,
        seen_codes: &mut HashSet<String>,
        log: &mut RunLog,
    ) {
        if is_video_reference(value) {
            log.flag_cell(row_num, &column.name, "video reference in pdf column");
            return;
        }
        if extension_role(value) != Some(ColumnRole::Pdf) {
            if is_url(value) {
                log.flag_cell(row_num, &column.name, "url without pdf extension");
            } else {
                log.count_mismatch();
            }
            return;
        }

        let name = column.name.to_lowercase();
        let family = if name.contains("install") || name.contains("assembly") {
            AssetFamily::InstallSheet
        } else {
            AssetFamily::SpecSheet
        };

        let stem = file_stem(value);
        let record = AssetRecord::new(
            namer.pdf_code(&stem),
            product_ref.to_string(),
            namer.pdf_link(&stem),
            family,
            None,
        );
        push_unique(record, row_num, records, seen_codes, log);
    }

    fn emit_video(
        &self,
        value: &str,
        namer: &AssetNamer,
        product_ref: &str,
        row_num: usize,
        records: &mut Vec<AssetRecord>,
        seen_codes: &mut HashSet<String>,
        log: &mut RunLog,
    ) {
        if !is_video_reference(value) {
            log.count_mismatch();
            return;
        }

        let stem = file_stem(value);
        let record = AssetRecord::new(
            namer.video_code(&stem),
            product_ref.to_string(),
            namer.video_link(value),
            AssetFamily::Media,
            Some(MediaType::Detail),
        );
        push_unique(record, row_num, records, seen_codes, log);
    }
}

/// First occurrence of a code wins; later collisions are dropped.
fn push_unique(
    record: AssetRecord,
    row_num: usize,
    records: &mut Vec<AssetRecord>,
    seen_codes: &mut HashSet<String>,
    log: &mut RunLog,
) {
    if !seen_codes.insert(record.code.clone()) {
        log.duplicate_code(row_num, &record.code);
        return;
    }
    log.count_record(record.asset_family);
    records.push(record);
}
