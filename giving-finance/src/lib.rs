//! giving-finance: donation analysis over extracted statement transactions, plus CSV export

pub mod analysis;
pub mod export;

pub use analysis::{MINIMUM_MONTHLY_DONATION, analyze, analyze_at};
pub use export::write_donor_csv;
