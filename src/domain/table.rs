// ============================================================
// SOURCE TABLE
// ============================================================
// In-memory view of one vendor sheet after header selection.
// Cells are already stringified; empty string means no value.

use serde::{Deserialize, Serialize};

/// One vendor sheet: named columns over stringified rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTable {
    /// Column headers in original sheet order
    pub headers: Vec<String>,

    /// Data rows; each row has one cell per header (padded with "")
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Create a table, padding or truncating every row to the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a header by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of a header, falling back to a case-insensitive match
    pub fn column_index_ci(&self, name: &str) -> Option<usize> {
        self.column_index(name).or_else(|| {
            let lowered = name.to_lowercase();
            self.headers
                .iter()
                .position(|h| h.to_lowercase() == lowered)
        })
    }

    /// Cell at (row, column); None when out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(|s| s.as_str())
    }

    /// Non-empty trimmed cell at (row, column)
    pub fn cell_value(&self, row: usize, col: usize) -> Option<&str> {
        self.cell(row, col)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Non-empty trimmed values of one column, top to bottom
    pub fn column_values(&self, col: usize) -> Vec<&str> {
        (0..self.rows.len())
            .filter_map(|row| self.cell_value(row, col))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SourceTable {
        SourceTable::new(
            vec!["SKU".to_string(), "Image File 1".to_string()],
            vec![
                vec!["ABC-1".to_string(), "front.jpg".to_string()],
                vec!["ABC-2".to_string(), "  ".to_string()],
                vec!["ABC-3".to_string()],
            ],
        )
    }

    #[test]
    fn test_rows_padded_to_header_width() {
        let table = sample_table();
        assert_eq!(table.rows[2].len(), 2);
        assert_eq!(table.cell(2, 1), Some(""));
    }

    #[test]
    fn test_cell_value_skips_blank() {
        let table = sample_table();
        assert_eq!(table.cell_value(0, 1), Some("front.jpg"));
        assert_eq!(table.cell_value(1, 1), None);
    }

    #[test]
    fn test_column_index_case_insensitive() {
        let table = sample_table();
        assert_eq!(table.column_index("sku"), None);
        assert_eq!(table.column_index_ci("sku"), Some(0));
    }

    #[test]
    fn test_column_values_filters_empties() {
        let table = sample_table();
        assert_eq!(table.column_values(1), vec!["front.jpg"]);
    }
}
