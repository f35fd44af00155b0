//! InMemorySink - 開発・テスト用の出力先
//!
//! # 実装詳細
//! - Mutex<Vec<..>> で排他制御（ワーカーは blocking スレッドから書く）
//! - poison は `SinkError::Poisoned` に変換（panic を伝播させない）

use std::sync::{Mutex, MutexGuard};

use crate::domain::{EventTables, RunId, RunSummary, SinkError};
use crate::ports::TableSink;

type EventRecord = (RunId, usize, EventTables);

#[derive(Debug, Default)]
pub struct InMemorySink {
    events: Mutex<Vec<EventRecord>>,
    summaries: Mutex<Vec<(RunId, RunSummary)>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event record, in arrival order.
    pub fn events(&self) -> Result<Vec<EventRecord>, SinkError> {
        Ok(lock(&self.events)?.clone())
    }

    pub fn summaries(&self) -> Result<Vec<(RunId, RunSummary)>, SinkError> {
        Ok(lock(&self.summaries)?.clone())
    }

    pub fn summary(&self, run: RunId) -> Result<Option<RunSummary>, SinkError> {
        Ok(lock(&self.summaries)?
            .iter()
            .find(|(id, _)| *id == run)
            .map(|(_, s)| s.clone()))
    }
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, SinkError> {
    m.lock().map_err(|e| SinkError::Poisoned(e.to_string()))
}

impl TableSink for InMemorySink {
    fn put_event(&self, run: RunId, worker: usize, tables: &EventTables) -> Result<(), SinkError> {
        lock(&self.events)?.push((run, worker, tables.clone()));
        Ok(())
    }

    fn put_run_summary(&self, run: RunId, summary: &RunSummary) -> Result<(), SinkError> {
        lock(&self.summaries)?.push((run, summary.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_records_per_run() {
        let sink = InMemorySink::new();
        let a = RunId::generate();
        let b = RunId::generate();
        sink.put_event(a, 0, &EventTables::gen_only(1.5)).unwrap();
        sink.put_event(b, 1, &EventTables::gen_only(2.5)).unwrap();
        sink.put_run_summary(
            b,
            &RunSummary {
                event_count: 1,
                ..RunSummary::default()
            },
        )
        .unwrap();

        let events = sink.events().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].0, b);
        assert_eq!(events[1].1, 1);
        assert_eq!(events[1].2.gen_weight, 2.5);

        assert_eq!(sink.summary(a).unwrap(), None);
        assert_eq!(sink.summary(b).unwrap().map(|s| s.event_count), Some(1));
    }

    #[test]
    fn poisoned_lock_is_an_error() {
        let sink = std::sync::Arc::new(InMemorySink::new());
        let s = sink.clone();
        let _ = std::thread::spawn(move || {
            let _guard = s.events.lock().unwrap();
            panic!("poison");
        })
        .join();

        let err = sink.put_event(RunId::generate(), 0, &EventTables::gen_only(1.0));
        assert!(matches!(err, Err(SinkError::Poisoned(_))));
        // summaries live behind their own lock
        assert!(sink.summaries().unwrap().is_empty());
    }
}
