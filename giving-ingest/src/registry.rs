//! Format detection: picks the extractor for a raw document.

use giving_core::Transaction;
use regex::Regex;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::parsers::{Camt053Extractor, Camt054Extractor, Extractor};

/// Ordered set of extractors, fixed once built and read-only afterwards.
#[derive(Default)]
pub struct ProcessorRegistry {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ProcessorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in variants: camt.053 first, then camt.054
    pub fn with_defaults() -> Self {
        Self::new()
            .register(Camt053Extractor::new())
            .register(Camt054Extractor::new())
    }

    /// Builder pattern: append an extractor; earlier registrations win on detection
    pub fn register(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// First registered extractor whose signature matches
    pub fn detect(&self, document: &str) -> Result<&dyn Extractor> {
        let found = self
            .extractors
            .iter()
            .find(|ex| ex.can_process(document))
            .map(|ex| &**ex);

        match found {
            Some(ex) => {
                debug!("Detected {} ({})", ex.message_kind(), ex.format_version());
                Ok(ex)
            }
            None => {
                debug!(
                    "No extractor matched; declared namespace: {:?}",
                    declared_namespace(document)
                );
                Err(IngestError::UnsupportedFormat)
            }
        }
    }

    /// Detect, then extract
    pub fn process(&self, document: &str) -> Result<Vec<Transaction>> {
        self.detect(document)?.extract_transactions(document)
    }

    pub fn can_process_any(&self, document: &str) -> bool {
        self.extractors.iter().any(|ex| ex.can_process(document))
    }

    /// Format identifiers in registration order
    pub fn list_supported_formats(&self) -> Vec<String> {
        self.extractors
            .iter()
            .map(|ex| ex.format_version().to_string())
            .collect()
    }

    /// Display label of the matching extractor, `"Unknown"` otherwise
    pub fn file_type(&self, document: &str) -> String {
        self.detect(document)
            .map(|ex| ex.message_kind().to_string())
            .unwrap_or_else(|_| "Unknown".to_string())
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

/// The camt namespace a document declares, e.g. `camt.052.001.02`.
///
/// Diagnostic only; detection itself goes through the extractors.
pub fn declared_namespace(document: &str) -> Option<String> {
    let re = Regex::new(r"urn:iso:std:iso:20022:tech:xsd:(camt\.\d{3}\.\d{3}\.\d{2})").ok()?;
    re.captures(document).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use giving_core::Direction;
    use rust_decimal::Decimal;

    const CAMT053: &str = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.053.001.08">"#;
    const CAMT054: &str = r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.054.001.08">"#;

    /// Test extractor matching a fixed marker and returning one canned transaction
    struct Fixed {
        marker: &'static str,
        version: &'static str,
    }

    impl Extractor for Fixed {
        fn can_process(&self, document: &str) -> bool {
            document.contains(self.marker)
        }

        fn extract_transactions(&self, _document: &str) -> Result<Vec<Transaction>> {
            Ok(vec![Transaction::new(
                self.version,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                Decimal::ONE,
                "",
                Direction::Credit,
            )])
        }

        fn format_version(&self) -> &str {
            self.version
        }

        fn message_kind(&self) -> &str {
            "FIXED"
        }
    }

    #[test]
    fn test_detects_each_default_variant() {
        let registry = ProcessorRegistry::with_defaults();
        assert_eq!(registry.detect(CAMT053).unwrap().format_version(), "053.001.08");
        assert_eq!(registry.detect(CAMT054).unwrap().format_version(), "054.001.08");
    }

    #[test]
    fn test_unsupported_format() {
        let registry = ProcessorRegistry::with_defaults();
        let err = registry.detect(r#"<Document xmlns="unsupported">"#).err().unwrap();
        assert!(matches!(err, IngestError::UnsupportedFormat));
        assert!(!registry.can_process_any(r#"<Document xmlns="unsupported">"#));
        assert!(matches!(
            registry.process("<xml>test</xml>"),
            Err(IngestError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_empty_registry_matches_nothing() {
        let registry = ProcessorRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.detect(CAMT053).is_err());
        assert!(registry.list_supported_formats().is_empty());
    }

    #[test]
    fn test_supported_formats_in_registration_order() {
        let registry = ProcessorRegistry::with_defaults();
        assert_eq!(
            registry.list_supported_formats(),
            vec!["053.001.08".to_string(), "054.001.08".to_string()]
        );
    }

    #[test]
    fn test_first_registered_wins() {
        let registry = ProcessorRegistry::new()
            .register(Fixed { marker: "shared", version: "first" })
            .register(Fixed { marker: "shared", version: "second" });

        let txns = registry.process("<shared/>").unwrap();
        assert_eq!(txns[0].payer_name, "first");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_custom_extractor_extends_defaults() {
        let registry = ProcessorRegistry::with_defaults().register(Fixed {
            marker: "camt.052.001.08",
            version: "052.001.08",
        });

        assert!(registry.can_process_any("urn:iso:std:iso:20022:tech:xsd:camt.052.001.08"));
        assert_eq!(registry.list_supported_formats().len(), 3);
    }

    #[test]
    fn test_file_type_labels() {
        let registry = ProcessorRegistry::with_defaults();
        assert_eq!(registry.file_type(CAMT053), "CAMT.053");
        assert_eq!(registry.file_type(CAMT054), "CAMT.054");
        assert_eq!(registry.file_type("<Document/>"), "Unknown");
    }

    #[test]
    fn test_declared_namespace() {
        assert_eq!(declared_namespace(CAMT054).as_deref(), Some("camt.054.001.08"));
        assert_eq!(
            declared_namespace(r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.052.001.02">"#)
                .as_deref(),
            Some("camt.052.001.02")
        );
        assert_eq!(declared_namespace("<xml>test</xml>"), None);
    }
}
