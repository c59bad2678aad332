use thiserror::Error;

/// Failures that stop a whole document from being ingested.
///
/// Problems inside a single entry never surface here; they are defaulted
/// field by field during extraction.
#[derive(Error, Debug)]
pub enum IngestError {
    /// No registered extractor recognises the document.
    #[error("No processor found for this CAMT format")]
    UnsupportedFormat,

    /// The document claims a supported format but its structure cannot be parsed.
    #[error("Failed to process {kind} file: {source}")]
    MalformedDocument {
        kind: String,
        #[source]
        source: crate::camt::GrammarError,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display_unsupported() {
        assert_eq!(
            IngestError::UnsupportedFormat.to_string(),
            "No processor found for this CAMT format"
        );
    }

    #[test]
    fn test_malformed_keeps_cause() {
        let source = crate::camt::parse_statement_entries("<Document/>").unwrap_err();
        let err = IngestError::MalformedDocument {
            kind: "CAMT.053".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Failed to process CAMT.053 file"));
        assert!(err.source().is_some());
    }
}
