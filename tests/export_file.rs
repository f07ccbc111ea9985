use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::tempdir;
use tv_screener::app::ports::RecordSource;
use tv_screener::app::ScreenUseCase;
use tv_screener::constants::SCREEN_COLUMNS;
use tv_screener::error::ScreenerError;
use tv_screener::export::export_json;
use tv_screener::screener::{ScreenParams, ScreenerQuery};
use tv_screener::types::{NormalizeMode, RecordSet};

struct FixedSource(RecordSet);

#[async_trait]
impl RecordSource for FixedSource {
    async fn fetch(&self, _query: &ScreenerQuery) -> tv_screener::error::Result<RecordSet> {
        Ok(self.0.clone())
    }
}

fn set(rows: usize) -> RecordSet {
    let records = (0..rows)
        .map(|i| {
            SCREEN_COLUMNS
                .iter()
                .map(|c| (c.to_string(), json!(format!("{c}-{i}"))))
                .collect()
        })
        .collect();
    RecordSet::new(SCREEN_COLUMNS.iter().map(|c| c.to_string()).collect(), records)
}

#[tokio::test]
async fn writes_cleaned_rows() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("tradingview_data.json");
    let use_case = ScreenUseCase::new(Arc::new(FixedSource(set(4))), NormalizeMode::Positional);

    let summary = export_json(&use_case, &ScreenParams::default().export_query(), &path).await?;
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.path, path);
    assert!(summary.date_modified.contains('T'));

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(written.as_array().unwrap().len(), 4);
    assert_eq!(written[3]["Perf.All"], "Perf.All-3");
    Ok(())
}

#[tokio::test]
async fn empty_export_keeps_raw_text_and_fails() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("out.json");
    let use_case = ScreenUseCase::new(Arc::new(FixedSource(set(0))), NormalizeMode::Positional);

    let err = export_json(&use_case, &ScreenParams::default().export_query(), &path)
        .await
        .unwrap_err();
    assert!(matches!(err, ScreenerError::Normalize(_)));
    assert_eq!(std::fs::read_to_string(&path)?, "");
    Ok(())
}

#[tokio::test]
async fn structural_export_writes_empty_array() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("out.json");
    let use_case = ScreenUseCase::new(Arc::new(FixedSource(set(0))), NormalizeMode::Structural);

    let summary = export_json(&use_case, &ScreenerQuery::new(), &path).await?;
    assert_eq!(summary.rows, 0);
    assert_eq!(std::fs::read_to_string(&path)?, "[]");
    Ok(())
}
