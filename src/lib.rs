//! Vendor spreadsheet to digital-asset template generator.
//!
//! Turns heterogeneous vendor product sheets into the fixed six-column
//! asset record set: column roles are inferred from headers and sampled
//! values, codes and destination links are synthesized with
//! deterministic naming rules, and referenced images can be classified
//! into semantic categories by a heuristic/vision cascade.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::column_classifier::scan_columns;
pub use application::use_cases::image_classifier::{ImageClassifier, VisionClient};
pub use application::use_cases::naming::slug;
pub use application::use_cases::record_builder::{GenerationOutput, RecordBuilder};
pub use application::use_cases::sku_resolver;
pub use domain::asset::{AssetFamily, AssetRecord, MediaType, OUTPUT_COLUMNS};
pub use domain::classification::{ClassificationResult, ClassificationStage, ImageLabel};
pub use domain::column::{ColumnProfile, ColumnRole, ColumnScan, ConfirmedColumn};
pub use domain::config::{GenerationConfig, VisionConfig};
pub use domain::error::{AppError, Result};
pub use domain::table::SourceTable;
pub use infrastructure::fetch::AssetFetcher;
pub use infrastructure::manufacturer::ManufacturerIndex;
pub use infrastructure::vision::ClaudeVisionClient;

/// Install a default tracing subscriber. Opt-in: call it from a binary
/// or test harness, never implicitly from library code.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}
