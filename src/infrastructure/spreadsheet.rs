// ============================================================
// SPREADSHEET I/O
// ============================================================
// XLSX reading into a SourceTable and six-column CSV output.

use std::io::Write;
use std::path::Path;

use calamine::{open_workbook, Data, DataType, Reader, Xlsx};

use crate::domain::asset::{AssetRecord, OUTPUT_COLUMNS};
use crate::domain::error::{AppError, Result};
use crate::domain::table::SourceTable;

/// Vendor files put headers in one of the first few rows
pub const MAX_HEADER_ROW: usize = 5;

/// Sheet names of a workbook, in file order
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    let workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| AppError::Parse(format!("failed to open workbook {:?}: {}", path, e)))?;
    Ok(workbook.sheet_names().to_vec())
}

/// Load one sheet as a SourceTable. `header_row` is 1-based and must be
/// within the first `MAX_HEADER_ROW` rows; everything above it is
/// discarded, everything below becomes data.
pub fn load_table(path: &Path, sheet: &str, header_row: usize) -> Result<SourceTable> {
    if header_row == 0 || header_row > MAX_HEADER_ROW {
        return Err(AppError::Config(format!(
            "header row must be between 1 and {}, got {}",
            MAX_HEADER_ROW, header_row
        )));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| AppError::Parse(format!("failed to open workbook {:?}: {}", path, e)))?;

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| AppError::Parse(format!("failed to read sheet '{}': {}", sheet, e)))?;

    let mut rows = range.rows().map(stringify_row);

    let headers = rows
        .by_ref()
        .nth(header_row - 1)
        .ok_or_else(|| {
            AppError::Parse(format!(
                "sheet '{}' has no row {} to use as header",
                sheet, header_row
            ))
        })?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let data: Vec<Vec<String>> = rows.collect();

    tracing::info!(
        sheet = sheet,
        header_row = header_row,
        columns = headers.len(),
        rows = data.len(),
        "loaded vendor sheet"
    );

    Ok(SourceTable::new(headers, data))
}

fn stringify_row(row: &[Data]) -> Vec<String> {
    row.iter()
        .map(|cell| {
            cell.as_string()
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("{}", cell))
        })
        .collect()
}

/// Write a record batch as CSV with the fixed six-column header
pub fn write_records_csv<W: Write>(records: &[AssetRecord], writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(OUTPUT_COLUMNS)
        .map_err(|e| AppError::IoError(e.to_string()))?;
    for record in records {
        out.write_record(record.to_row())
            .map_err(|e| AppError::IoError(e.to_string()))?;
    }
    out.flush()?;
    Ok(())
}

/// Record batch rendered to a CSV string
pub fn records_to_csv_string(records: &[AssetRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records_csv(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| AppError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::{AssetFamily, MediaType};

    #[test]
    fn test_csv_output_has_contract_header() {
        let records = vec![AssetRecord::new(
            "2605_foo_new_1k".to_string(),
            "2605_ABC-1".to_string(),
            "afx/products/Foo_new_1k.jpg".to_string(),
            AssetFamily::MainProductImage,
            None,
        )];
        let text = records_to_csv_string(&records).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "code,label-en_US,product_reference,imagelink,assetFamilyIdentifier,mediatype"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2605_foo_new_1k,2605_foo_new_1k,2605_ABC-1,afx/products/Foo_new_1k.jpg,main_product_image,"
        );
    }

    #[test]
    fn test_csv_output_preserves_batch_order() {
        let records = vec![
            AssetRecord::new(
                "a".to_string(),
                "p".to_string(),
                "l1".to_string(),
                AssetFamily::Media,
                Some(MediaType::Lifestyle),
            ),
            AssetRecord::new(
                "b".to_string(),
                "p".to_string(),
                "l2".to_string(),
                AssetFamily::SpecSheet,
                None,
            ),
        ];
        let text = records_to_csv_string(&records).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("a,"));
        assert!(lines[1].ends_with("media,lifestyle"));
        assert!(lines[2].starts_with("b,"));
    }

    #[test]
    fn test_header_row_out_of_range_is_config_error() {
        let err = load_table(Path::new("missing.xlsx"), "Sheet1", 6).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_missing_workbook_is_parse_error() {
        let err = load_table(Path::new("missing.xlsx"), "Sheet1", 2).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
