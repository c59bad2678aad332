//! Rendering of analysis and validation results for the terminal.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use giving_core::DonationAnalysis;
use giving_finance::MINIMUM_MONTHLY_DONATION;
use serde::Serialize;
use std::fmt::Write as _;

/// What was learned about one input file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions_found: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeReport {
    pub analysis: DonationAnalysis,
    pub processed_files: Vec<FileInfo>,
    pub total_transactions_processed: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub file_info: FileInfo,
    /// camt namespace found in the document, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_namespace: Option<String>,
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let s = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    s.context("serialize report")
}

pub fn render_analysis_text(report: &AnalyzeReport, tz: Tz) -> String {
    let analysis = &report.analysis;
    let mut s = String::new();

    let at = analysis.analyzed_at.with_timezone(&tz);
    let _ = writeln!(s, "# Donation analysis ({})\n", at.format("%Y-%m-%d %H:%M %Z"));

    let _ = writeln!(s, "## Files\n");
    for f in &report.processed_files {
        let _ = writeln!(
            s,
            "- {} | {} | {} bytes | {} transactions",
            f.file_name,
            f.file_type,
            f.file_size,
            f.transactions_found.unwrap_or(0)
        );
    }

    let _ = writeln!(s, "\n## Donors\n");
    if analysis.donors.is_empty() {
        let _ = writeln!(s, "(no credit transactions found)");
    }
    for d in &analysis.donors {
        let flag = if d.below_minimum { " | BELOW MINIMUM" } else { "" };
        let _ = writeln!(
            s,
            "- {} | total={} | monthly_avg={} | count={}{}",
            d.name,
            d.total_amount,
            d.monthly_average,
            d.donation_count(),
            flag
        );
    }

    let _ = writeln!(s, "\nTotal donations: {}", analysis.total_donations);
    let _ = writeln!(
        s,
        "Donors below minimum ({}/month): {}",
        MINIMUM_MONTHLY_DONATION, analysis.donors_below_minimum
    );
    let _ = writeln!(s, "Transactions processed: {}", report.total_transactions_processed);
    s
}

pub fn render_validation_text(report: &ValidationReport) -> String {
    let f = &report.file_info;
    let verdict = if report.is_valid { "supported" } else { "not supported" };
    let mut s = format!(
        "{}: {} ({}, {} bytes)\n",
        f.file_name, verdict, f.file_type, f.file_size
    );
    if !report.is_valid {
        if let Some(ns) = &report.declared_namespace {
            let _ = writeln!(s, "Declared namespace: {}", ns);
        }
    }
    s
}
