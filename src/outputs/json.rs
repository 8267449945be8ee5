//! JSON export of an [`AnalysisResult`].
//!
//! Reports are grouped by the local date of the run, one file per company:
//! `{json_output_dir}/{date}/{company-slug}.json`. A second run for the same
//! company on the same day replaces the earlier file.

use crate::models::AnalysisResult;
use crate::utils::slugify;
use chrono::{Local, NaiveDate};
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the report for `company` on `date` under `json_output_dir`.
pub fn report_path(json_output_dir: &str, date: NaiveDate, company: &str) -> PathBuf {
    let slug = match slugify(company) {
        s if s.is_empty() => "company".to_string(),
        s => s,
    };
    PathBuf::from(json_output_dir)
        .join(date.to_string())
        .join(format!("{slug}.json"))
}

/// Write `result` as pretty-printed JSON and return the file path.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, company = %result.company))]
pub async fn write_analysis(
    result: &AnalysisResult,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(result)?;
    let path = report_path(json_output_dir, Local::now().date_naive(), &result.company);

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote analysis JSON");
    Ok(path)
}
