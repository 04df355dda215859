mod extractor;

pub use extractor::{BaseDir, ExtractionResult, Extractor};
