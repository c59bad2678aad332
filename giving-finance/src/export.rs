//! CSV export of donor summaries, one row per donor.

use anyhow::{Context, Result};
use giving_core::DonationAnalysis;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct DonorRow<'a> {
    name: &'a str,
    total_amount: Decimal,
    monthly_average: Decimal,
    below_minimum: bool,
    donations: usize,
}

/// Write the donor table as CSV with a header row.
pub fn write_donor_csv<W: Write>(analysis: &DonationAnalysis, out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    for donor in &analysis.donors {
        wtr.serialize(DonorRow {
            name: &donor.name,
            total_amount: donor.total_amount,
            monthly_average: donor.monthly_average,
            below_minimum: donor.below_minimum,
            donations: donor.donation_count(),
        })
        .with_context(|| format!("writing row for {}", donor.name))?;
    }

    wtr.flush().context("flushing csv output")?;
    Ok(())
}
