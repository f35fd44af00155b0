//! WorkerGroup - run 単位でイベントをワーカーへ分配する
//!
//! ワーカーは自分の Accumulator を専有し、run の終わりにだけ
//! coordinator が全 Accumulator を merge します。

use std::sync::Arc;

use tracing::{debug, error};

use super::coordinator::{RunContext, RunCoordinator};
use crate::accum::Accumulator;
use crate::domain::{EventInput, EventTables, GenWeightsError, RunHeaders, RunSummary, SinkError};
use crate::ports::TableSink;

/// One worker and the accumulator it owns exclusively.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    acc: Accumulator,
}

impl Worker {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            acc: Accumulator::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    /// Reset the sums before the first event of a run.
    pub fn begin_run(&mut self) {
        self.acc.clear();
    }

    pub fn handle(
        &mut self,
        coordinator: &RunCoordinator,
        run: &RunContext,
        event: &EventInput,
    ) -> EventTables {
        coordinator.process_event(run, event, &mut self.acc)
    }
}

/// A fixed set of workers processing runs.
///
/// - 各ワーカーは `spawn_blocking` に Worker ごと move され、終わると
///   JoinHandle 経由で戻ってくる（共有状態なし）
/// - move している間はグループに空の Worker が入っているので、
///   `process_run` の future が途中で drop されてもワーカー数は変わらない
pub struct WorkerGroup {
    coordinator: Arc<RunCoordinator>,
    workers: Vec<Worker>,
}

impl WorkerGroup {
    /// Create `n` workers (at least one).
    pub fn new(coordinator: Arc<RunCoordinator>, n: usize) -> Self {
        let workers = (0..n.max(1)).map(Worker::new).collect();
        Self {
            coordinator,
            workers,
        }
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn coordinator(&self) -> &RunCoordinator {
        &self.coordinator
    }

    /// Process one run: events are dealt round-robin over the workers, every
    /// event's tables go to `sink`, and the merged summary is written to
    /// `sink` and returned.
    pub async fn process_run(
        &mut self,
        headers: Option<&RunHeaders>,
        events: Vec<EventInput>,
        sink: Arc<dyn TableSink>,
    ) -> Result<RunSummary, GenWeightsError> {
        let run = self.coordinator.begin_run(headers);

        let mut partitions: Vec<Vec<EventInput>> = vec![Vec::new(); self.workers.len()];
        for (i, ev) in events.into_iter().enumerate() {
            partitions[i % self.workers.len()].push(ev);
        }

        let mut joins = Vec::with_capacity(self.workers.len());
        for (slot, events) in self.workers.iter_mut().zip(partitions) {
            let id = slot.id();
            let mut worker = std::mem::replace(slot, Worker::new(id));
            let coordinator = Arc::clone(&self.coordinator);
            let run = run.clone();
            let sink = Arc::clone(&sink);
            let join = tokio::task::spawn_blocking(move || {
                worker.begin_run();
                let res = worker_loop(&mut worker, &coordinator, &run, &events, sink.as_ref());
                (worker, res)
            });
            joins.push(join);
        }

        let mut first_err: Option<GenWeightsError> = None;
        for (slot, join) in self.workers.iter_mut().zip(joins) {
            let id = slot.id();
            match join.await {
                Ok((worker, res)) => {
                    if let Err(e) = res {
                        error!(worker = id, error = %e, "worker stopped on sink error");
                        first_err.get_or_insert(e.into());
                    }
                    *slot = worker;
                }
                Err(e) => {
                    // the slot keeps its fresh Worker
                    error!(worker = id, error = %e, "worker task failed");
                    first_err.get_or_insert(GenWeightsError::Worker {
                        worker: id,
                        source: e,
                    });
                }
            }
        }
        if let Some(e) = first_err {
            return Err(e);
        }

        let summary = self
            .coordinator
            .end_run(&run, self.workers.iter().map(Worker::accumulator));
        sink.put_run_summary(run.id(), &summary)?;
        Ok(summary)
    }
}

fn worker_loop(
    worker: &mut Worker,
    coordinator: &RunCoordinator,
    run: &RunContext,
    events: &[EventInput],
    sink: &dyn TableSink,
) -> Result<(), SinkError> {
    for event in events {
        let tables = worker.handle(coordinator, run, event);
        sink.put_event(run.id(), worker.id(), &tables)?;
    }
    debug!(run = %run.id(), worker = worker.id(), events = events.len(), "worker done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::CoordinatorBuilder;
    use crate::domain::{HeaderSection, RawWeightEntry, RunId};
    use crate::impls::InMemorySink;

    fn group(n: usize) -> WorkerGroup {
        let c = CoordinatorBuilder::new()
            .preferred_pdfs([91400])
            .named_weight("rwgt_1", "sm")
            .build()
            .unwrap();
        WorkerGroup::new(Arc::new(c), n)
    }

    fn headers() -> RunHeaders {
        let mut lines = vec![
            "<weightgroup combine=\"envelope\" name=\"scale_variation\">".to_string(),
            "<weight id=\"1\"> muR=1.0 muF=1.0 </weight>".to_string(),
            "<weight id=\"2\"> muR=2.0 muF=2.0 </weight>".to_string(),
            "</weightgroup>".to_string(),
            "<weightgroup combine=\"hessian\" name=\"PDF_variation\">".to_string(),
        ];
        for i in 0..3 {
            lines.push(format!("<weight id=\"{}\"> PDF set = {} </weight>", 100 + i, 91400 + i));
        }
        RunHeaders::new(vec![HeaderSection::new("initrwgt", lines)])
    }

    fn events(n: usize) -> Vec<EventInput> {
        (0..n)
            .map(|i| {
                if i % 5 == 4 {
                    EventInput::gen_only(1.0)
                } else {
                    EventInput::with_lhe(
                        1.0,
                        2.0,
                        vec![
                            RawWeightEntry::new("2", 1.0),
                            RawWeightEntry::new("101", 3.0),
                            RawWeightEntry::new("rwgt_1", 4.0),
                        ],
                    )
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn summary_does_not_depend_on_worker_count() {
        let mut one = group(1);
        let mut four = group(4);
        let s1 = one
            .process_run(Some(&headers()), events(23), Arc::new(InMemorySink::new()))
            .await
            .unwrap();
        let s4 = four
            .process_run(Some(&headers()), events(23), Arc::new(InMemorySink::new()))
            .await
            .unwrap();
        assert_eq!(s1, s4);

        // 23 events, 4 without LHE -> 19 full events
        assert_eq!(s1.event_count, 23);
        assert_eq!(s1.sum_w, 23.0);
        assert_eq!(s1.scale_sumw, vec![19.0, 9.5]);
        assert_eq!(s1.pdf_sumw, vec![19.0, 28.5, 19.0]);
        assert_eq!(s1.named("sm"), Some(38.0));
    }

    #[tokio::test]
    async fn every_event_reaches_the_sink() {
        let sink = Arc::new(InMemorySink::new());
        let mut g = group(3);
        let summary = g
            .process_run(Some(&headers()), events(10), sink.clone())
            .await
            .unwrap();

        let tables = sink.events().unwrap();
        assert_eq!(tables.len(), 10);
        assert_eq!(tables.iter().filter(|(_, _, t)| t.has_lhe()).count(), 8);
        let summaries = sink.summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].1, summary);
    }

    #[tokio::test]
    async fn accumulators_reset_between_runs() {
        let mut g = group(2);
        let first = g
            .process_run(Some(&headers()), events(6), Arc::new(InMemorySink::new()))
            .await
            .unwrap();
        let second = g
            .process_run(None, events(6), Arc::new(InMemorySink::new()))
            .await
            .unwrap();
        assert_eq!(first.event_count, 6);
        assert_eq!(second.event_count, 6);
        // no header: no scale / pdf columns, named weights still tracked
        assert!(second.scale_sumw.is_empty());
        assert!(second.pdf_sumw.is_empty());
        assert_eq!(second.named("sm"), Some(10.0));
        assert_eq!(g.len(), 2);
    }

    #[tokio::test]
    async fn empty_run_gives_zero_summary() {
        let sink = Arc::new(InMemorySink::new());
        let mut g = group(3);
        let s = g.process_run(None, Vec::new(), sink.clone()).await.unwrap();
        assert_eq!(s, RunSummary::default());
        assert_eq!(sink.summaries().unwrap().len(), 1);
    }

    struct FailingSink;

    impl TableSink for FailingSink {
        fn put_event(&self, _run: RunId, _worker: usize, _t: &EventTables) -> Result<(), SinkError> {
            Err(SinkError::Io(std::io::Error::other("disk full")))
        }

        fn put_run_summary(&self, _run: RunId, _s: &RunSummary) -> Result<(), SinkError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn sink_errors_are_reported() {
        let mut g = group(2);
        let err = g
            .process_run(None, events(4), Arc::new(FailingSink))
            .await
            .unwrap_err();
        assert!(matches!(err, GenWeightsError::Sink(SinkError::Io(_))));
        assert_eq!(g.len(), 2);
    }

    struct SlowSink;

    impl TableSink for SlowSink {
        fn put_event(&self, _run: RunId, _worker: usize, _t: &EventTables) -> Result<(), SinkError> {
            std::thread::sleep(std::time::Duration::from_millis(50));
            Ok(())
        }

        fn put_run_summary(&self, _run: RunId, _s: &RunSummary) -> Result<(), SinkError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn dropped_run_keeps_the_group_usable() {
        let mut g = group(2);
        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            g.process_run(Some(&headers()), events(4), Arc::new(SlowSink)),
        )
        .await;
        assert!(timed_out.is_err());
        assert_eq!(g.len(), 2);

        let s = g
            .process_run(Some(&headers()), events(6), Arc::new(InMemorySink::new()))
            .await
            .unwrap();
        assert_eq!(s.event_count, 6);
        assert_eq!(g.len(), 2);
    }
}
