//! giving-core: Core types for donation statement analysis

pub mod donation;
pub mod time;
pub mod transaction;

pub use donation::{DonationAnalysis, DonorSummary};
pub use time::month_span;
pub use transaction::{Direction, Transaction, UNKNOWN_PAYER};
