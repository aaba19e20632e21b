// src/cli.rs
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::core::{ConfigManager, FitterConfig};
use crate::processor::CvProcessor;
use crate::utils::{
    output_file_path, read_file_content, scores_to_csv, validate_file_extension,
    write_file_content, RESUME_EXTENSIONS,
};

#[derive(Parser, Debug)]
#[command(name = "cvfit")]
#[command(about = "Extract, rank and fit a markdown resume onto a single page")]
pub struct CvfitCli {
    /// Markdown resume to process
    pub resume: PathBuf,

    /// Job posting text used to re-prioritize content
    #[arg(long)]
    pub job: Option<PathBuf>,

    /// Character budget, overrides the configured page budget
    #[arg(long)]
    pub budget: Option<usize>,

    /// Yaml configuration file (defaults to $CVFIT_CONFIG, then ./cvfit.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the record here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Directory for a timestamped output file, used when --output is absent
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Write the per-achievement ranking report as CSV
    #[arg(long)]
    pub scores: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CvfitCli {
    fn load_config(&self) -> Result<FitterConfig> {
        let config = match &self.config {
            Some(path) => ConfigManager::load_from_file(path)?,
            None => ConfigManager::load()?,
        };

        Ok(match self.budget {
            Some(budget) => config.with_budget(budget),
            None => config,
        })
    }
}

pub async fn handle_command(cli: CvfitCli) -> Result<()> {
    let resume_name = cli.resume.to_string_lossy().to_string();
    validate_file_extension(&resume_name, RESUME_EXTENSIONS)?;

    let config = cli.load_config()?;
    let processor = CvProcessor::new(config).context("Invalid fitter configuration")?;

    let document = read_file_content(&cli.resume).await?;
    let query = match &cli.job {
        Some(path) => Some(read_file_content(path).await?),
        None => None,
    };

    info!("Processing resume: {}", cli.resume.display());
    let record = processor.process(&document, query.as_deref());
    let json = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;

    match (&cli.output, &cli.output_dir) {
        (Some(path), _) => {
            write_file_content(path, &json).await?;
            info!("Record written to {}", path.display());
        }
        (None, Some(dir)) => {
            let path = output_file_path(dir, &cli.resume);
            write_file_content(&path, &json).await?;
            info!("Record written to {}", path.display());
        }
        (None, None) => println!("{}", json),
    }

    if let Some(path) = &cli.scores {
        let rows = processor.ranking_report(&document, query.as_deref());
        write_file_content(path, &scores_to_csv(&rows)?).await?;
        info!("Ranking report with {} rows written to {}", rows.len(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let cli = CvfitCli::try_parse_from([
            "cvfit",
            "resume.md",
            "--job",
            "posting.txt",
            "--budget",
            "3000",
            "--json-logs",
        ])
        .unwrap();

        assert_eq!(cli.resume, PathBuf::from("resume.md"));
        assert_eq!(cli.job, Some(PathBuf::from("posting.txt")));
        assert_eq!(cli.budget, Some(3000));
        assert!(cli.json_logs);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_budget_must_be_a_number() {
        assert!(CvfitCli::try_parse_from(["cvfit", "resume.md", "--budget", "lots"]).is_err());
    }
}
