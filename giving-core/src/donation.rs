//! Donor aggregates and the analysis report built from them

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// Per-payer totals over the CREDIT transactions of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonorSummary {
    pub name: String,
    /// Exact sum of the donor's amounts, never rounded
    pub total_amount: Decimal,
    /// Total over the inclusive month span, 2 dp, half-up
    pub monthly_average: Decimal,
    pub below_minimum: bool,
    /// The donor's own transactions in discovery order
    pub donations: Vec<Transaction>,
}

impl DonorSummary {
    pub fn new(
        name: impl Into<String>,
        total_amount: Decimal,
        monthly_average: Decimal,
        below_minimum: bool,
        donations: Vec<Transaction>,
    ) -> Self {
        Self {
            name: name.into(),
            total_amount,
            monthly_average,
            below_minimum,
            donations,
        }
    }

    pub fn donation_count(&self) -> usize {
        self.donations.len()
    }
}

/// Result of one donation analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationAnalysis {
    pub donors: Vec<DonorSummary>,
    pub total_donations: Decimal,
    pub donors_below_minimum: usize,
    pub analyzed_at: DateTime<Utc>,
}

impl DonationAnalysis {
    pub fn new(
        donors: Vec<DonorSummary>,
        total_donations: Decimal,
        donors_below_minimum: usize,
        analyzed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            donors,
            total_donations,
            donors_below_minimum,
            analyzed_at,
        }
    }

    /// Donors whose monthly average is under the minimum
    pub fn below_minimum(&self) -> impl Iterator<Item = &DonorSummary> {
        self.donors.iter().filter(|d| d.below_minimum)
    }

    /// Look up a donor by exact name
    pub fn donor(&self, name: &str) -> Option<&DonorSummary> {
        self.donors.iter().find(|d| d.name == name)
    }
}
