// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::processor::ScoreRow;

/// Accepted resume input extensions
pub const RESUME_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Normalize a file stem for output naming
pub fn normalize_file_stem(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build a timestamped output file path next to `base`
pub fn output_file_path(base: &Path, resume: &Path) -> PathBuf {
    let stem = resume
        .file_stem()
        .and_then(|s| s.to_str())
        .map(normalize_file_stem)
        .unwrap_or_else(|| "resume".to_string());

    base.join(format!(
        "{}_{}.json",
        stem,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write file content with proper error context
pub async fn write_file_content(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

/// Render the ranking report as CSV with a `job,score,achievement` header
pub fn scores_to_csv(rows: &[ScoreRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .context("Failed to serialize score row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;

    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
