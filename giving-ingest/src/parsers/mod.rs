//! Statement extractors, one per camt message variant.

use chrono::{Local, NaiveDate};
use giving_core::Transaction;
use tracing::{info, warn};

use crate::camt::{GrammarError, ReportEntry};
use crate::entry::to_transaction;
use crate::error::{IngestError, Result};

pub mod camt053;
pub mod camt054;

pub use camt053::Camt053Extractor;
pub use camt054::Camt054Extractor;

/// A message variant the registry can dispatch to.
///
/// New variants implement this and get registered; neither the registry nor
/// the analysis needs to change.
pub trait Extractor: Send + Sync {
    /// Cheap signature test, no parsing
    fn can_process(&self, document: &str) -> bool;

    /// Parse the document and map every entry, in document order
    fn extract_transactions(&self, document: &str) -> Result<Vec<Transaction>>;

    /// Stable format identifier, e.g. `053.001.08`
    fn format_version(&self) -> &str;

    /// Display label, e.g. `CAMT.053`
    fn message_kind(&self) -> &str;
}

/// Shared extraction path: grammar parse, then per-entry mapping.
pub(crate) fn extract_with(
    kind: &str,
    document: &str,
    parse: fn(&str) -> std::result::Result<Vec<ReportEntry>, GrammarError>,
    today: NaiveDate,
) -> Result<Vec<Transaction>> {
    let entries = parse(document).map_err(|source| {
        warn!("{} document could not be parsed: {}", kind, source);
        IngestError::MalformedDocument {
            kind: kind.to_string(),
            source,
        }
    })?;

    let txns: Vec<Transaction> = entries.iter().map(|e| to_transaction(e, today)).collect();
    info!("Extracted {} transactions from {} document", txns.len(), kind);
    Ok(txns)
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
