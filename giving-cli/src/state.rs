use anyhow::{Context, Result, bail};
use tracing::warn;
use std::fs;
use std::path::{Path, PathBuf};

pub fn giving_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".giving"))
}

pub fn ensure_giving_home() -> Result<PathBuf> {
    let dir = giving_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// A statement file decoded to text, ready for detection.
#[derive(Debug, Clone)]
pub struct StatementFile {
    pub file_name: String,
    pub file_size: u64,
    pub content: String,
}

/// Read a statement as UTF-8, replacing invalid byte sequences.
/// Empty files are rejected up front.
pub fn read_statement(path: &Path) -> Result<StatementFile> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("File is empty: {}", path.display());
    }

    let file_size = bytes.len() as u64;
    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!("{} is not valid UTF-8; invalid bytes replaced", path.display());
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.xml")
        .to_string();

    Ok(StatementFile {
        file_name,
        file_size,
        content,
    })
}
