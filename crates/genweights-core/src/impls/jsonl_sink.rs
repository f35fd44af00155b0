//! JsonLinesSink - JSON Lines 形式の出力先
//!
//! 1 行 1 レコード:
//! - `{"run": .., "worker": .., "tables": {..}}`
//! - `{"run": .., "summary": {..}}`
//!
//! 複数ワーカーから呼ばれるので、行単位で Mutex を取って書きます。

use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;

use crate::domain::{EventTables, RunId, RunSummary, SinkError};
use crate::ports::TableSink;

#[derive(Serialize)]
struct EventLine<'a> {
    run: RunId,
    worker: usize,
    tables: &'a EventTables,
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    run: RunId,
    summary: &'a RunSummary,
}

pub struct JsonLinesSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Flush and hand back the writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        let mut out = self
            .out
            .into_inner()
            .map_err(|e| SinkError::Poisoned(e.to_string()))?;
        out.flush()?;
        Ok(out)
    }

    fn write_line<T: Serialize>(&self, record: &T) -> Result<(), SinkError> {
        // serialize outside the lock
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        let mut out = self
            .out
            .lock()
            .map_err(|e| SinkError::Poisoned(e.to_string()))?;
        out.write_all(&line)?;
        Ok(())
    }
}

impl<W: Write + Send> TableSink for JsonLinesSink<W> {
    fn put_event(&self, run: RunId, worker: usize, tables: &EventTables) -> Result<(), SinkError> {
        self.write_line(&EventLine { run, worker, tables })
    }

    fn put_run_summary(&self, run: RunId, summary: &RunSummary) -> Result<(), SinkError> {
        self.write_line(&SummaryLine { run, summary })?;
        let mut out = self
            .out
            .lock()
            .map_err(|e| SinkError::Poisoned(e.to_string()))?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn writes_one_json_object_per_line() {
        let sink = JsonLinesSink::new(Vec::new());
        let run = RunId::generate();
        sink.put_event(run, 2, &EventTables::gen_only(0.5)).unwrap();
        sink.put_run_summary(
            run,
            &RunSummary {
                event_count: 1,
                sum_w: 0.5,
                sum_w2: 0.25,
                ..RunSummary::default()
            },
        )
        .unwrap();

        let bytes = sink.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let ev: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(ev["worker"], 2);
        assert_eq!(ev["tables"]["genWeight"], 0.5);

        let s: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(s["summary"]["genEventCount"], 1);
        assert_eq!(s["summary"]["genEventSumw2"], 0.25);
        assert_eq!(s["run"], ev["run"]);
    }
}
