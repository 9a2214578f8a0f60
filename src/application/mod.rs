pub mod use_cases;

pub use use_cases::column_classifier::scan_columns;
pub use use_cases::image_classifier::ImageClassifier;
pub use use_cases::record_builder::{GenerationOutput, RecordBuilder};
