//! camt.053.001.08 bank-to-customer statement extractor
//!
//! Expected shape:
//!   Document / BkToCstmrStmt / Stmt* / Ntry*

use giving_core::Transaction;

use super::{Extractor, extract_with, today};
use crate::camt::parse_statement_entries;
use crate::error::Result;

const NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:camt.053.001.08";

#[derive(Debug, Default, Clone, Copy)]
pub struct Camt053Extractor;

impl Camt053Extractor {
    pub fn new() -> Self {
        Camt053Extractor
    }
}

impl Extractor for Camt053Extractor {
    fn can_process(&self, document: &str) -> bool {
        document.contains(NAMESPACE)
    }

    fn extract_transactions(&self, document: &str) -> Result<Vec<Transaction>> {
        extract_with(self.message_kind(), document, parse_statement_entries, today())
    }

    fn format_version(&self) -> &str {
        "053.001.08"
    }

    fn message_kind(&self) -> &str {
        "CAMT.053"
    }
}
