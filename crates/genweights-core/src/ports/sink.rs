//! TableSink port - 出力表の書き出し先
//!
//! # 実装
//! - NoopSink: 捨てる
//! - InMemorySink (impls): テスト用
//! - JsonLinesSink (impls): 1 行 1 レコードの JSON

use crate::domain::{EventTables, RunId, RunSummary, SinkError};

/// Receives the per-event tables and the per-run summary.
///
/// Workers call `put_event` concurrently from blocking threads, so
/// implementations synchronize internally.
pub trait TableSink: Send + Sync {
    fn put_event(&self, run: RunId, worker: usize, tables: &EventTables) -> Result<(), SinkError>;

    /// Called once per run, after every worker has finished.
    fn put_run_summary(&self, run: RunId, summary: &RunSummary) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl TableSink for NoopSink {
    fn put_event(&self, _run: RunId, _worker: usize, _tables: &EventTables) -> Result<(), SinkError> {
        Ok(())
    }

    fn put_run_summary(&self, _run: RunId, _summary: &RunSummary) -> Result<(), SinkError> {
        Ok(())
    }
}
