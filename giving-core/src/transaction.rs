//! Normalized transaction records produced by statement extraction

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payer name used when a statement entry carries no recoverable debtor.
pub const UNKNOWN_PAYER: &str = "Unknown";

/// Money flow direction as booked on the account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "CREDIT")]
    Credit,
    #[serde(rename = "DEBIT")]
    Debit,
}

impl Direction {
    /// Interpret a camt credit/debit indicator (`CRDT` / `DBIT`).
    ///
    /// Only a case-insensitive `CRDT` counts as a credit; anything else,
    /// including a missing indicator, is a debit.
    pub fn from_indicator(indicator: Option<&str>) -> Self {
        match indicator {
            Some(ind) if ind.trim().eq_ignore_ascii_case("CRDT") => Direction::Credit,
            _ => Direction::Debit,
        }
    }
}

/// A single booked statement entry, every field populated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Debtor name, `"Unknown"` when the entry has none
    pub payer_name: String,
    /// Booking date
    pub date: NaiveDate,
    /// Entry amount, never negative
    pub amount: Decimal,
    /// Structured creditor reference, may be empty
    pub reference: String,
    pub direction: Direction,
}

impl Transaction {
    /// Create a new Transaction
    pub fn new(
        payer_name: impl Into<String>,
        date: NaiveDate,
        amount: Decimal,
        reference: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            payer_name: payer_name.into(),
            date,
            amount,
            reference: reference.into(),
            direction,
        }
    }

    /// Returns true if money came into the account
    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_creation() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let txn = Transaction::new("John Doe", date, dec!(100.00), "REF1", Direction::Credit);

        assert_eq!(txn.payer_name, "John Doe");
        assert_eq!(txn.date, date);
        assert_eq!(txn.amount, dec!(100.00));
        assert_eq!(txn.reference, "REF1");
        assert!(txn.is_credit());
    }

    #[test]
    fn test_indicator_mapping() {
        assert_eq!(Direction::from_indicator(Some("CRDT")), Direction::Credit);
        assert_eq!(Direction::from_indicator(Some("crdt")), Direction::Credit);
        assert_eq!(Direction::from_indicator(Some("DBIT")), Direction::Debit);
        assert_eq!(Direction::from_indicator(Some("CREDIT")), Direction::Debit);
        assert_eq!(Direction::from_indicator(Some("")), Direction::Debit);
        assert_eq!(Direction::from_indicator(None), Direction::Debit);
    }

    #[test]
    fn test_serializes_camel_case() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let txn = Transaction::new("Jane", date, dec!(12.50), "", Direction::Debit);
        let json = serde_json::to_value(&txn).unwrap();

        assert_eq!(json["payerName"], "Jane");
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["amount"], "12.50");
        assert_eq!(json["direction"], "DEBIT");
    }
}
