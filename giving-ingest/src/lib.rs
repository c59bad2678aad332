//! giving-ingest: camt statement ingestion, format detection and per-variant extractors.

pub mod camt;
pub mod entry;
pub mod error;
pub mod parsers;
pub mod registry;

pub use error::{IngestError, Result};
pub use parsers::{Camt053Extractor, Camt054Extractor, Extractor};
pub use registry::{ProcessorRegistry, declared_namespace};
