use crate::app::ports::RecordSource;
use crate::error::Result;
use crate::metrics::PipelineMetrics;
use crate::normalize::normalize_with;
use crate::screener::ScreenerQuery;
use crate::types::NormalizeMode;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Fetch from the record source, then normalize once.
pub struct ScreenUseCase {
    source: Arc<dyn RecordSource>,
    mode: NormalizeMode,
}

impl ScreenUseCase {
    pub fn new(source: Arc<dyn RecordSource>, mode: NormalizeMode) -> Self {
        Self { source, mode }
    }

    pub fn mode(&self) -> NormalizeMode {
        self.mode
    }

    #[instrument(skip(self, query), fields(mode = self.mode.as_str()))]
    pub async fn run(&self, query: &ScreenerQuery) -> Result<Value> {
        let set = self.source.fetch(query).await?;
        match normalize_with(&set, self.mode) {
            Ok(value) => {
                PipelineMetrics::record_normalize(self.mode, true);
                info!(rows = set.len(), "Normalized record set");
                Ok(value)
            }
            Err(e) => {
                PipelineMetrics::record_normalize(self.mode, false);
                let fields = set.rows.first().map(|r| r.len()).unwrap_or(0);
                warn!(rows = set.len(), fields, "Normalization failed: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScreenerError;
    use crate::normalize::NormalizeError;
    use crate::types::RecordSet;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedSource(RecordSet);

    #[async_trait]
    impl RecordSource for FixedSource {
        async fn fetch(&self, _query: &ScreenerQuery) -> Result<RecordSet> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RecordSource for FailingSource {
        async fn fetch(&self, _query: &ScreenerQuery) -> Result<RecordSet> {
            Err(ScreenerError::Api {
                message: "scanner unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn empty_set_fails_positionally() {
        let use_case = ScreenUseCase::new(
            Arc::new(FixedSource(RecordSet::default())),
            NormalizeMode::Positional,
        );
        let err = use_case.run(&ScreenerQuery::new()).await.unwrap_err();
        assert!(matches!(
            err,
            ScreenerError::Normalize(NormalizeError::MalformedOutput { .. })
        ));
    }

    #[tokio::test]
    async fn empty_set_is_empty_structurally() {
        let use_case = ScreenUseCase::new(
            Arc::new(FixedSource(RecordSet::default())),
            NormalizeMode::Structural,
        );
        assert_eq!(use_case.run(&ScreenerQuery::new()).await.unwrap(), json!([]));
    }

    #[tokio::test]
    async fn source_errors_pass_through() {
        let use_case = ScreenUseCase::new(Arc::new(FailingSource), NormalizeMode::Positional);
        let err = use_case.run(&ScreenerQuery::new()).await.unwrap_err();
        assert!(matches!(err, ScreenerError::Api { .. }));
    }
}
