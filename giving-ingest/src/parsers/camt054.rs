//! camt.054.001.08 debit/credit notification extractor
//!
//! Expected shape:
//!   Document / BkToCstmrDbtCdtNtfctn / Ntfctn* / Ntry*

use giving_core::Transaction;

use super::{Extractor, extract_with, today};
use crate::camt::parse_notification_entries;
use crate::error::Result;

const NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:camt.054.001.08";

#[derive(Debug, Default, Clone, Copy)]
pub struct Camt054Extractor;

impl Camt054Extractor {
    pub fn new() -> Self {
        Camt054Extractor
    }
}

impl Extractor for Camt054Extractor {
    fn can_process(&self, document: &str) -> bool {
        document.contains(NAMESPACE)
    }

    fn extract_transactions(&self, document: &str) -> Result<Vec<Transaction>> {
        extract_with(self.message_kind(), document, parse_notification_entries, today())
    }

    fn format_version(&self) -> &str {
        "054.001.08"
    }

    fn message_kind(&self) -> &str {
        "CAMT.054"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use chrono::NaiveDate;
    use giving_core::Direction;
    use rust_decimal_macros::dec;

    #[test]
    fn test_can_process_with_valid_format() {
        let xml = r#"<?xml version="1.0"?><Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.054.001.08">"#;
        assert!(Camt054Extractor::new().can_process(xml));
        assert!(!Camt054Extractor::new().can_process(r#"<Document xmlns="wrong-format">"#));
    }

    #[test]
    fn test_extracts_notification_entries() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.054.001.08">
  <BkToCstmrDbtCdtNtfctn>
    <Ntfctn>
      <Ntry>
        <Amt Ccy="CHF">30.00</Amt>
        <CdtDbtInd>CRDT</CdtDbtInd>
        <BookgDt><DtTm>2024-01-15T08:30:00</DtTm></BookgDt>
        <NtryDtls><TxDtls>
          <RltdPties><Dbtr><Pty><Nm>Verein Sonnenschein</Nm></Pty></Dbtr></RltdPties>
        </TxDtls></NtryDtls>
      </Ntry>
    </Ntfctn>
    <Ntfctn>
      <Ntry>
        <Amt Ccy="CHF">10.00</Amt>
        <CdtDbtInd>Crdt</CdtDbtInd>
        <BookgDt><Dt>2024-01-16</Dt></BookgDt>
      </Ntry>
    </Ntfctn>
  </BkToCstmrDbtCdtNtfctn>
</Document>"#;

        let txns = Camt054Extractor::new().extract_transactions(xml).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].payer_name, "Verein Sonnenschein");
        assert_eq!(txns[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(txns[0].amount, dec!(30.00));
        assert_eq!(txns[1].payer_name, "Unknown");
        assert_eq!(txns[1].direction, Direction::Credit);
    }

    #[test]
    fn test_statement_body_is_malformed_for_notification() {
        let xml = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.054.001.08">
  <BkToCstmrStmt><Stmt/></BkToCstmrStmt>
</Document>"#;
        let err = Camt054Extractor::new().extract_transactions(xml).unwrap_err();
        assert!(matches!(err, IngestError::MalformedDocument { .. }));
    }
}
