// ============================================================
// RUN LOG
// ============================================================
// Per-run report accumulated by the record builder. Free text,
// advisory only; the output table is the contract, not this.

use crate::domain::asset::AssetFamily;

/// Long skip/duplicate lists are truncated at this many lines
const LIST_CAP: usize = 20;

#[derive(Debug, Default)]
pub struct RunLog {
    prefix: String,
    brand_folder: String,
    sku_column: String,

    main_count: usize,
    media_count: usize,
    spec_count: usize,
    install_count: usize,

    skipped_rows: Vec<String>,
    duplicate_codes: Vec<String>,
    flagged_cells: Vec<String>,
    rejected_columns: Vec<String>,
    mismatched_cells: usize,
}

impl RunLog {
    pub fn new(prefix: &str, brand_folder: &str, sku_column: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            brand_folder: brand_folder.to_string(),
            sku_column: sku_column.to_string(),
            ..Default::default()
        }
    }

    pub fn count_record(&mut self, family: AssetFamily) {
        match family {
            AssetFamily::MainProductImage => self.main_count += 1,
            AssetFamily::Media => self.media_count += 1,
            AssetFamily::SpecSheet => self.spec_count += 1,
            AssetFamily::InstallSheet => self.install_count += 1,
        }
    }

    /// 1-based row number plus the reason the row was skipped
    pub fn skip_row(&mut self, row: usize, reason: &str) {
        self.skipped_rows.push(format!("Row {}: {}", row, reason));
    }

    pub fn duplicate_code(&mut self, row: usize, code: &str) {
        self.duplicate_codes
            .push(format!("Row {}: duplicate code '{}'", row, code));
    }

    /// Video/URL markers inside image- or pdf-typed columns
    pub fn flag_cell(&mut self, row: usize, column: &str, reason: &str) {
        self.flagged_cells
            .push(format!("Row {}, column '{}': {}", row, column, reason));
    }

    /// Wrong-extension cells are only counted, never listed
    pub fn count_mismatch(&mut self) {
        self.mismatched_cells += 1;
    }

    pub fn reject_column(&mut self, name: &str, reason: &str) {
        self.rejected_columns.push(format!("{}: {}", name, reason));
    }

    pub fn total_records(&self) -> usize {
        self.main_count + self.media_count + self.spec_count + self.install_count
    }

    pub fn skipped_row_count(&self) -> usize {
        self.skipped_rows.len()
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push("=== ASSET TEMPLATE GENERATION LOG ===".to_string());
        lines.push(format!("Manufacturer Prefix : {}", self.prefix));
        lines.push(format!("Brand Folder        : {}", self.brand_folder));
        lines.push(format!("SKU Column          : {}", self.sku_column));
        lines.push(String::new());

        lines.push("=== SUMMARY ===".to_string());
        lines.push(format!("Total output rows     : {}", self.total_records()));
        lines.push(format!("main_product_image    : {}", self.main_count));
        lines.push(format!("media                 : {}", self.media_count));
        lines.push(format!("spec_sheet            : {}", self.spec_count));
        lines.push(format!("install_sheet         : {}", self.install_count));
        if self.mismatched_cells > 0 {
            lines.push(format!(
                "cells skipped (wrong extension for column role): {}",
                self.mismatched_cells
            ));
        }

        push_capped(&mut lines, "Skipped rows", &self.skipped_rows);
        push_capped(&mut lines, "Duplicate codes", &self.duplicate_codes);
        push_capped(&mut lines, "Flagged cells", &self.flagged_cells);
        push_capped(&mut lines, "Rejected columns", &self.rejected_columns);

        lines.join("\n")
    }
}

fn push_capped(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{} ({}):", title, items.len()));
    for item in items.iter().take(LIST_CAP) {
        lines.push(format!("  {}", item));
    }
    if items.len() > LIST_CAP {
        lines.push(format!("  ... and {} more", items.len() - LIST_CAP));
    }
}
