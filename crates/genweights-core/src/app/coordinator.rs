//! RunCoordinator - run のライフサイクル
//!
//! # フロー
//! 1. `begin_run()`: header から `DynamicWeightChoice` を一度だけ作り `Arc` で公開
//! 2. `process_event()`: 各ワーカーが自分の Accumulator を `&mut` で渡して呼ぶ
//! 3. `end_run()`: 全ワーカーの Accumulator を run 単位の Accumulator へ merge し、
//!    `RunSummary` を出力
//!
//! プロセス単位の one-shot ラッチ（debug dump, 警告）もここが持ちます。

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::latch::OneShot;
use super::processor::fill_lhe_tables;
use super::resolver::WeightChoiceResolver;
use crate::accum::Accumulator;
use crate::domain::{
    DynamicWeightChoice, EventInput, EventTables, RunHeaders, RunId, RunSummary, ValidatedConfig,
};

/// Process-wide one-shot latches.
#[derive(Debug)]
pub struct Diagnostics {
    /// Header scan trace of the first run.
    pub run_dump: OneShot,

    /// Raw weight trace of the first event with LHE weights.
    pub event_dump: OneShot,

    /// Warning for the first event without LHE weights.
    pub missing_lhe: OneShot,
}

impl Diagnostics {
    pub fn new(debug: bool) -> Self {
        Self {
            run_dump: OneShot::armed(debug),
            event_dump: OneShot::armed(debug),
            missing_lhe: OneShot::new(),
        }
    }
}

/// Handle of a run in progress. Cheap to clone; the choice is shared read-only.
#[derive(Debug, Clone)]
pub struct RunContext {
    id: RunId,
    choice: Arc<DynamicWeightChoice>,
}

impl RunContext {
    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn choice(&self) -> &DynamicWeightChoice {
        &self.choice
    }
}

pub struct RunCoordinator {
    config: ValidatedConfig,
    diagnostics: Diagnostics,
}

impl RunCoordinator {
    pub fn new(config: ValidatedConfig) -> Self {
        let diagnostics = Diagnostics::new(config.debug());
        Self {
            config,
            diagnostics,
        }
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Freeze the weight choice for a new run. `headers` is `None` when the
    /// run has no run-level LHE product.
    pub fn begin_run(&self, headers: Option<&RunHeaders>) -> RunContext {
        let id = RunId::generate();
        let trace = self.diagnostics.run_dump.claim();
        let choice = WeightChoiceResolver::new(self.config.preferred_pdfs(), self.config.header_tag())
            .with_trace(trace)
            .resolve(headers);
        info!(
            run = %id,
            scale_weights = choice.scale_weight_ids.len(),
            pdf_weights = choice.pdf_weight_ids.len(),
            "run weight choice"
        );
        if !choice.pdf_weights_doc.is_empty() {
            debug!(run = %id, doc = %choice.pdf_weights_doc, "PDF family chosen");
        }
        RunContext {
            id,
            choice: Arc::new(choice),
        }
    }

    /// Per-event entry point. Only touches `acc`, which the calling worker owns.
    pub fn process_event(
        &self,
        run: &RunContext,
        event: &EventInput,
        acc: &mut Accumulator,
    ) -> EventTables {
        match &event.lhe {
            Some(lhe) => {
                let dump = self.diagnostics.event_dump.claim();
                fill_lhe_tables(&self.config, &run.choice, event.gen_weight, lhe, acc, dump)
            }
            None => {
                acc.record_nominal_only(event.gen_weight);
                if self.diagnostics.missing_lhe.claim() {
                    warn!(run = %run.id, "no LHE event weights, so there will be no LHE tables");
                }
                EventTables::gen_only(event.gen_weight)
            }
        }
    }

    /// Fold the worker accumulators into a fresh run-level accumulator and
    /// export the summary.
    pub fn end_run<'a, I>(&self, run: &RunContext, workers: I) -> RunSummary
    where
        I: IntoIterator<Item = &'a Accumulator>,
    {
        let mut total = Accumulator::new();
        for acc in workers {
            total.merge(acc);
        }
        let summary = total.to_summary(self.config.named_weight_labels());
        info!(
            run = %run.id,
            events = summary.event_count,
            sumw = summary.sum_w,
            "run summary"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HeaderSection, RawWeightEntry, WeightConfig};

    fn coordinator() -> RunCoordinator {
        RunCoordinator::new(WeightConfig::default().validate().unwrap())
    }

    fn headers() -> RunHeaders {
        RunHeaders::new(vec![HeaderSection::new(
            "initrwgt",
            [
                "<weightgroup combine=\"envelope\" name=\"scale_variation\">",
                "<weight id=\"1001\"> muR=1.0 muF=1.0 </weight>",
                "<weight id=\"1002\"> muR=2.0 muF=1.0 </weight>",
                "<weight id=\"1003\"> muR=0.5 muF=1.0 </weight>",
                "</weightgroup>",
            ],
        )])
    }

    #[test]
    fn begin_run_freezes_sorted_choice() {
        let c = coordinator();
        let run = c.begin_run(Some(&headers()));
        assert_eq!(run.choice().scale_weight_ids, vec!["1003", "1001", "1002"]);
        let cloned = run.clone();
        assert!(Arc::ptr_eq(&run.choice, &cloned.choice));
    }

    #[test]
    fn missing_scale_id_contributes_nominal() {
        let c = coordinator();
        let run = c.begin_run(Some(&headers()));
        let mut acc = Accumulator::new();
        let ev = EventInput::with_lhe(
            2.0,
            1.0,
            vec![RawWeightEntry::new("1003", 0.5), RawWeightEntry::new("1002", 3.0)],
        );
        let t = c.process_event(&run, &ev, &mut acc);
        // 1001 is absent from the event
        assert_eq!(t.scale.values, vec![0.5, 1.0, 3.0]);
        assert_eq!(acc.scale_sums(), vec![1.0, 2.0, 6.0]);
    }

    #[test]
    fn event_without_lhe_is_nominal_only() {
        let c = coordinator();
        let run = c.begin_run(Some(&headers()));
        let mut acc = Accumulator::new();
        let t = c.process_event(&run, &EventInput::gen_only(3.0), &mut acc);
        assert!(!t.has_lhe());
        assert!(t.scale.is_empty());
        assert_eq!(acc.event_count(), 1);
        assert!(acc.scale_sums().is_empty());
        assert!(!c.diagnostics().missing_lhe.is_armed());
    }

    #[test]
    fn zero_event_run_still_has_summary() {
        let c = coordinator();
        let run = c.begin_run(None);
        let workers = vec![Accumulator::new(), Accumulator::new()];
        let s = c.end_run(&run, &workers);
        assert_eq!(s, RunSummary::default());
    }

    #[test]
    fn debug_latches_follow_config() {
        let quiet = coordinator();
        assert!(!quiet.diagnostics().run_dump.is_armed());
        assert!(quiet.diagnostics().missing_lhe.is_armed());

        let loud = RunCoordinator::new(
            WeightConfig {
                debug: true,
                ..WeightConfig::default()
            }
            .validate()
            .unwrap(),
        );
        loud.begin_run(Some(&headers()));
        loud.begin_run(Some(&headers()));
        assert!(!loud.diagnostics().run_dump.is_armed());
        assert!(loud.diagnostics().event_dump.is_armed());
    }
}
