//! Maps camt report entries into normalized transactions.
//!
//! Every field is resolved on its own: a miss anywhere along one field's path
//! falls back to that field's default and leaves the other fields alone.

use chrono::{NaiveDate, NaiveDateTime};
use giving_core::{Direction, Transaction, UNKNOWN_PAYER};
use rust_decimal::Decimal;

use crate::camt::{ReportEntry, TransactionDetails};

/// Build a transaction from one entry. `today` stands in for a missing booking date.
pub fn to_transaction(entry: &ReportEntry, today: NaiveDate) -> Transaction {
    Transaction::new(
        payer_name(entry).unwrap_or_else(|| UNKNOWN_PAYER.to_string()),
        booking_date(entry).unwrap_or(today),
        amount(entry).unwrap_or(Decimal::ZERO),
        reference(entry).unwrap_or_default(),
        direction(entry),
    )
}

/// First transaction detail of the first entry detail block
fn first_tx_details(entry: &ReportEntry) -> Option<&TransactionDetails> {
    entry.details.first()?.transactions.first()
}

fn payer_name(entry: &ReportEntry) -> Option<String> {
    let name = first_tx_details(entry)?
        .related_parties
        .as_ref()?
        .debtor
        .as_ref()?
        .party
        .as_ref()?
        .name
        .as_deref()?
        .trim();

    (!name.is_empty()).then(|| name.to_string())
}

fn booking_date(entry: &ReportEntry) -> Option<NaiveDate> {
    let booked = entry.booking_date.as_ref()?;

    let from_date = booked
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok());

    from_date.or_else(|| {
        // DtTm carries an optional offset; the calendar day is all we keep.
        let dt = booked.date_time.as_deref()?.trim();
        let day = dt.get(..19).unwrap_or(dt);
        NaiveDateTime::parse_from_str(day, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|ndt| ndt.date())
    })
}

fn amount(entry: &ReportEntry) -> Option<Decimal> {
    let value: Decimal = entry.amount.as_ref()?.value.as_deref()?.trim().parse().ok()?;
    (!value.is_sign_negative()).then_some(value)
}

fn reference(entry: &ReportEntry) -> Option<String> {
    first_tx_details(entry)?
        .remittance
        .as_ref()?
        .structured
        .first()?
        .creditor_reference
        .as_ref()?
        .reference
        .as_ref()
        .map(|r| r.trim().to_string())
}

fn direction(entry: &ReportEntry) -> Direction {
    Direction::from_indicator(entry.credit_debit_indicator.as_deref())
}
