use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use giving_finance::{analyze, write_donor_csv};
use giving_ingest::{ProcessorRegistry, declared_namespace};
use std::path::{Path, PathBuf};

mod config;
mod logging;
mod report;
mod state;

use config::{Config, OutputFormat};
use report::{AnalyzeReport, FileInfo, ValidationReport};
use state::StatementFile;

#[derive(Parser, Debug)]
#[command(
    name = "giving",
    version,
    about = "Donor analysis for ISO 20022 camt bank statements"
)]
struct Cli {
    /// Config file (default: ~/.giving/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one or more camt.053 / camt.054 files as a single donor report
    Analyze {
        /// Statement files; transactions from all files are pooled
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (default from config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Check whether a file is in a supported format
    Validate {
        file: PathBuf,

        /// Output format (default from config; csv falls back to text)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List supported camt format versions
    Formats,

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    logging::setup_logging(&cfg.logging.level);
    tracing::debug!("giving v{} starting", env!("CARGO_PKG_VERSION"));

    let registry = ProcessorRegistry::with_defaults();

    match cli.command {
        Command::Analyze { files, format } => {
            let format = format.unwrap_or(cfg.output.format);
            analyze_files(&registry, &files, format, &cfg)?;
        }

        Command::Validate { file, format } => {
            let format = format.unwrap_or(cfg.output.format);
            validate_file(&registry, &file, format, &cfg)?;
        }

        Command::Formats => {
            for f in registry.list_supported_formats() {
                println!("{}", f);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn analyze_files(
    registry: &ProcessorRegistry,
    files: &[PathBuf],
    format: OutputFormat,
    cfg: &Config,
) -> Result<()> {
    let statements = files
        .iter()
        .map(|path| state::read_statement(path))
        .collect::<Result<Vec<_>>>()?;
    let report = pool_statements(registry, &statements)?;

    match format {
        OutputFormat::Text => print!("{}", report::render_analysis_text(&report, cfg.tz()?)),
        OutputFormat::Json => println!("{}", report::to_json(&report, cfg.output.pretty)?),
        OutputFormat::Csv => write_donor_csv(&report.analysis, std::io::stdout().lock())?,
    }

    Ok(())
}

/// Extract every statement and analyze the pooled transactions as one batch.
fn pool_statements(
    registry: &ProcessorRegistry,
    files: &[StatementFile],
) -> Result<AnalyzeReport> {
    let mut all_txns = Vec::new();
    let mut processed_files = Vec::new();

    for file in files {
        let file_type = registry.file_type(&file.content);
        let txns = registry
            .process(&file.content)
            .with_context(|| format!("processing {}", file.file_name))?;

        tracing::info!("{}: {} transactions ({})", file.file_name, txns.len(), file_type);

        processed_files.push(FileInfo {
            file_name: file.file_name.clone(),
            file_size: file.file_size,
            file_type,
            transactions_found: Some(txns.len()),
        });
        all_txns.extend(txns);
    }

    Ok(AnalyzeReport {
        analysis: analyze(&all_txns),
        processed_files,
        total_transactions_processed: all_txns.len(),
    })
}

fn validate_file(
    registry: &ProcessorRegistry,
    path: &Path,
    format: OutputFormat,
    cfg: &Config,
) -> Result<()> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    let file = state::read_statement(path)?;

    let report = ValidationReport {
        is_valid: registry.can_process_any(&file.content),
        declared_namespace: declared_namespace(&file.content),
        file_info: FileInfo {
            file_type: registry.file_type(&file.content),
            file_name: file.file_name,
            file_size: file.file_size,
            transactions_found: None,
        },
    };

    match format {
        OutputFormat::Json => println!("{}", report::to_json(&report, cfg.output.pretty)?),
        OutputFormat::Text | OutputFormat::Csv => print!("{}", report::render_validation_text(&report)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::TempDir;

    fn write_statement(
        dir: &TempDir,
        name: &str,
        namespace: &str,
        container: &str,
        group: &str,
        entries: &str,
    ) -> PathBuf {
        let path = dir.path().join(name);
        let xml = format!(
            r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:{namespace}"><{container}><{group}>{entries}</{group}></{container}></Document>"#
        );
        fs::write(&path, xml).unwrap();
        path
    }

    fn entry(name: &str, amount: &str, date: &str, indicator: &str) -> String {
        format!(
            r#"<Ntry><Amt Ccy="CHF">{amount}</Amt><CdtDbtInd>{indicator}</CdtDbtInd><BookgDt><Dt>{date}</Dt></BookgDt><NtryDtls><TxDtls><RltdPties><Dbtr><Pty><Nm>{name}</Nm></Pty></Dbtr></RltdPties></TxDtls></NtryDtls></Ntry>"#
        )
    }

    #[test]
    fn test_pool_statements_across_files() {
        let tmp = TempDir::new().unwrap();
        let stmt = write_statement(
            &tmp,
            "january.xml",
            "camt.053.001.08",
            "BkToCstmrStmt",
            "Stmt",
            &[
                entry("Anna", "20.00", "2024-01-10", "CRDT"),
                entry("Shop", "99.00", "2024-01-11", "DBIT"),
            ]
            .concat(),
        );
        let ntfctn = write_statement(
            &tmp,
            "february.xml",
            "camt.054.001.08",
            "BkToCstmrDbtCdtNtfctn",
            "Ntfctn",
            &entry("Anna", "40.00", "2024-02-10", "CRDT"),
        );

        let files = vec![
            state::read_statement(&stmt).unwrap(),
            state::read_statement(&ntfctn).unwrap(),
        ];
        let report = pool_statements(&ProcessorRegistry::with_defaults(), &files).unwrap();

        assert_eq!(report.total_transactions_processed, 3);
        assert_eq!(report.processed_files.len(), 2);
        assert_eq!(report.processed_files[0].file_name, "january.xml");
        assert_eq!(report.processed_files[0].file_type, "CAMT.053");
        assert_eq!(report.processed_files[0].transactions_found, Some(2));
        assert_eq!(report.processed_files[1].file_type, "CAMT.054");
        assert_eq!(report.processed_files[1].transactions_found, Some(1));

        let anna = report.analysis.donor("Anna").unwrap();
        assert_eq!(anna.total_amount, dec!(60.00));
        assert_eq!(anna.monthly_average, dec!(30.00));
        assert_eq!(report.analysis.donors.len(), 1);
    }

    #[test]
    fn test_pool_statements_rejects_unsupported_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("old.xml");
        fs::write(&path, r#"<Document xmlns="urn:iso:std:iso:20022:tech:xsd:camt.053.001.02"/>"#).unwrap();

        let files = vec![state::read_statement(&path).unwrap()];
        let err = pool_statements(&ProcessorRegistry::with_defaults(), &files).unwrap_err();
        assert!(err.to_string().contains("processing old.xml"));
    }
}
