use crate::app::ScreenUseCase;
use crate::error::{Result, ScreenerError};
use crate::screener::ScreenerQuery;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub date_modified: String,
}

/// UTC timestamp in the `YYYY-MM-DDTHH:MM:SS.ffffff` form written next to exports.
pub fn date_modified() -> String {
    chrono::Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Runs `query` and writes the cleaned JSON to `path`.
///
/// When normalization fails the raw stripped text is written instead and the
/// error is still returned.
#[instrument(skip(use_case, query, path), fields(path = %path.display()))]
pub async fn export_json(
    use_case: &ScreenUseCase,
    query: &ScreenerQuery,
    path: &Path,
) -> Result<ExportSummary> {
    let date_modified = date_modified();
    match use_case.run(query).await {
        Ok(value) => {
            let rows = value.as_array().map(Vec::len).unwrap_or(0);
            let text = serde_json::to_string_pretty(&value)?;
            tokio::fs::write(path, text).await?;
            info!(rows, "Wrote export");
            Ok(ExportSummary {
                path: path.to_path_buf(),
                rows,
                date_modified,
            })
        }
        Err(ScreenerError::Normalize(e)) => {
            error!("Export output is malformed, writing raw content: {}", e);
            tokio::fs::write(path, e.raw_text()).await?;
            Err(e.into())
        }
        Err(e) => Err(e),
    }
}
