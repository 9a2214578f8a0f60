// ============================================================
// MANUFACTURER INDEX
// ============================================================
// Process-wide, read-only brand -> manufacturer-ID lookup.
// Loaded once; absence of the file degrades to an empty index.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use once_cell::sync::OnceCell;

static GLOBAL_INDEX: OnceCell<ManufacturerIndex> = OnceCell::new();

const BRAND_COLUMN: &str = "Brand";
const ID_COLUMN: &str = "Manu ID";

#[derive(Debug, Default)]
pub struct ManufacturerIndex {
    by_brand: HashMap<String, String>,
    vendors: Vec<String>,
}

impl ManufacturerIndex {
    /// Build from (brand, manufacturer id) pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut by_brand = HashMap::new();
        let mut vendors = Vec::new();
        for (brand, id) in pairs {
            let brand = brand.trim().to_string();
            if brand.is_empty() {
                continue;
            }
            // First occurrence wins, matching the batch dedupe policy
            if !by_brand.contains_key(&brand) {
                by_brand.insert(brand.clone(), id.trim().to_string());
                vendors.push(brand);
            }
        }
        vendors.sort();
        Self { by_brand, vendors }
    }

    /// Load the lookup workbook. Any failure degrades to an empty
    /// index: a missing file means no suggestions, not an error.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(index) => {
                tracing::info!(vendors = index.vendors.len(), "manufacturer index loaded");
                index
            }
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "manufacturer index unavailable, using empty index");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, String> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e| format!("open failed: {}", e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| "no worksheet".to_string())?
            .map_err(|e| format!("read failed: {}", e))?;

        let mut rows = range.rows();
        let header = rows.next().ok_or_else(|| "empty sheet".to_string())?;
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| cell_text(cell).trim() == name)
                .ok_or_else(|| format!("missing '{}' column", name))
        };
        let brand_idx = find(BRAND_COLUMN)?;
        let id_idx = find(ID_COLUMN)?;

        let pairs = rows.filter_map(|row| {
            let brand = row.get(brand_idx).map(cell_text)?;
            let id = row.get(id_idx).map(cell_text)?;
            if brand.trim().is_empty() {
                None
            } else {
                Some((brand, id))
            }
        });
        Ok(Self::from_pairs(pairs))
    }

    /// Initialize the process-wide singleton. The first call loads the
    /// file; later calls (any path) return the already-loaded index.
    pub fn init_global(path: &Path) -> &'static ManufacturerIndex {
        GLOBAL_INDEX.get_or_init(|| Self::load(path))
    }

    /// The singleton, if a previous call initialized it
    pub fn global() -> Option<&'static ManufacturerIndex> {
        GLOBAL_INDEX.get()
    }

    /// Manufacturer prefix suggestion for a vendor name
    pub fn suggest_prefix(&self, vendor: &str) -> Option<&str> {
        self.by_brand.get(vendor.trim()).map(|s| s.as_str())
    }

    /// Known vendor names, sorted
    pub fn vendors(&self) -> &[String] {
        &self.vendors
    }

    pub fn is_empty(&self) -> bool {
        self.by_brand.is_empty()
    }
}

/// IDs are frequently numeric cells; render them without a decimal tail
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        _ => cell
            .as_string()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{}", cell)),
    }
}
