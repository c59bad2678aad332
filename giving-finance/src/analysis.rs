//! Donation analysis: groups CREDIT transactions by payer and computes
//! per-donor totals and calendar-month averages.

use chrono::{DateTime, Utc};
use giving_core::{DonationAnalysis, DonorSummary, Transaction, month_span};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use tracing::debug;

/// Monthly average below which a donor is flagged
pub const MINIMUM_MONTHLY_DONATION: Decimal = Decimal::from_parts(3000, 0, 0, false, 2);

/// Analyze transactions, stamping the report with the current time
pub fn analyze(txns: &[Transaction]) -> DonationAnalysis {
    analyze_at(txns, Utc::now())
}

/// Analyze transactions with an explicit report timestamp
pub fn analyze_at(txns: &[Transaction], analyzed_at: DateTime<Utc>) -> DonationAnalysis {
    let donors: Vec<DonorSummary> = group_by_payer(txns)
        .into_iter()
        .map(|(name, donations)| summarize(name, donations))
        .collect();

    let total_donations: Decimal = donors.iter().map(|d| d.total_amount).sum();
    let donors_below_minimum = donors.iter().filter(|d| d.below_minimum).count();

    debug!(
        "Analyzed {} transactions: {} donors, {} below minimum",
        txns.len(),
        donors.len(),
        donors_below_minimum
    );

    DonationAnalysis::new(donors, total_donations, donors_below_minimum, analyzed_at)
}

/// CREDIT transactions grouped by exact payer name, in first-seen order
fn group_by_payer(txns: &[Transaction]) -> Vec<(String, Vec<Transaction>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Transaction>)> = Vec::new();

    for txn in txns.iter().filter(|t| t.is_credit()) {
        let slot = *index.entry(txn.payer_name.as_str()).or_insert_with(|| {
            groups.push((txn.payer_name.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(txn.clone());
    }

    groups
}

fn summarize(name: String, donations: Vec<Transaction>) -> DonorSummary {
    let total: Decimal = donations.iter().map(|t| t.amount).sum();
    let monthly_average = monthly_average(&donations, total);
    let below_minimum = monthly_average < MINIMUM_MONTHLY_DONATION;

    debug!(
        "Donor {:?}: total={} average={} below_minimum={}",
        name, total, monthly_average, below_minimum
    );

    DonorSummary::new(name, total, monthly_average, below_minimum, donations)
}

/// `total` spread over the inclusive months between the earliest and latest
/// donation, rounded half-up to cents. Gaps between donations still count.
fn monthly_average(donations: &[Transaction], total: Decimal) -> Decimal {
    let first = donations.iter().map(|t| t.date).min();
    let last = donations.iter().map(|t| t.date).max();

    match (first, last) {
        (Some(first), Some(last)) => {
            let months = Decimal::from(month_span(first, last));
            let mut average = (total / months)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            average.rescale(2);
            average
        }
        _ => Decimal::ZERO,
    }
}
