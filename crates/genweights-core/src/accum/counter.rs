//! Accumulator - ワーカーごとの重み和
//!
//! 各ワーカーが 1 つを専有し（ロック不要）、run の終わりに run 単位の
//! Accumulator へ `merge` でまとめます。
//!
//! # 不変条件
//! - ベクトルは最初に使われたときに長さが決まり、その後は伸びることはあっても
//!   縮むことはない（短い側は 0 で埋める）
//! - `merge` は可換・結合的

use super::precise::PreciseSum;
use crate::domain::{NamedSum, RunSummary};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    event_count: i64,
    sum_w: PreciseSum,
    sum_w2: PreciseSum,
    sum_scale: Vec<PreciseSum>,
    sum_pdf: Vec<PreciseSum>,
    sum_named: Vec<PreciseSum>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the freshly constructed state. Called per worker at run start.
    pub fn clear(&mut self) {
        self.event_count = 0;
        self.sum_w = PreciseSum::ZERO;
        self.sum_w2 = PreciseSum::ZERO;
        self.sum_scale.clear();
        self.sum_pdf.clear();
        self.sum_named.clear();
    }

    /// Event without any variation weights.
    pub fn record_nominal_only(&mut self, w: f64) {
        self.event_count += 1;
        self.sum_w.add(w);
        self.sum_w2.add(w * w);
    }

    /// Event with relative variation weights; each vector contributes
    /// `w0 * rel[i]` to its sum at index `i`.
    pub fn record_full(&mut self, w0: f64, scale: &[f64], pdf: &[f64], named: &[f64]) {
        self.record_nominal_only(w0);
        add_weighted(&mut self.sum_scale, w0, scale);
        add_weighted(&mut self.sum_pdf, w0, pdf);
        add_weighted(&mut self.sum_named, w0, named);
    }

    pub fn merge(&mut self, other: &Accumulator) {
        self.event_count += other.event_count;
        self.sum_w.merge(&other.sum_w);
        self.sum_w2.merge(&other.sum_w2);
        merge_sums(&mut self.sum_scale, &other.sum_scale);
        merge_sums(&mut self.sum_pdf, &other.sum_pdf);
        merge_sums(&mut self.sum_named, &other.sum_named);
    }

    pub fn event_count(&self) -> i64 {
        self.event_count
    }

    pub fn sum_w(&self) -> f64 {
        self.sum_w.value()
    }

    pub fn sum_w2(&self) -> f64 {
        self.sum_w2.value()
    }

    pub fn scale_sums(&self) -> Vec<f64> {
        values(&self.sum_scale)
    }

    pub fn pdf_sums(&self) -> Vec<f64> {
        values(&self.sum_pdf)
    }

    pub fn named_sums(&self) -> Vec<f64> {
        values(&self.sum_named)
    }

    /// Export for the run summary. Named sums get their labels only when the
    /// run saw at least one event with LHE weights.
    pub fn to_summary(&self, named_labels: &[String]) -> RunSummary {
        let named_sumw = if self.sum_named.is_empty() {
            Vec::new()
        } else {
            named_labels
                .iter()
                .enumerate()
                .map(|(i, label)| NamedSum {
                    label: label.clone(),
                    sumw: self.sum_named.get(i).map_or(0.0, PreciseSum::value),
                })
                .collect()
        };
        RunSummary {
            event_count: self.event_count,
            sum_w: self.sum_w(),
            sum_w2: self.sum_w2(),
            scale_sumw: self.scale_sums(),
            pdf_sumw: self.pdf_sums(),
            named_sumw,
        }
    }
}

fn add_weighted(sums: &mut Vec<PreciseSum>, w0: f64, rel: &[f64]) {
    if rel.is_empty() {
        return;
    }
    if sums.len() < rel.len() {
        sums.resize(rel.len(), PreciseSum::ZERO);
    }
    for (sum, r) in sums.iter_mut().zip(rel) {
        sum.add(w0 * r);
    }
}

fn merge_sums(sums: &mut Vec<PreciseSum>, other: &[PreciseSum]) {
    if sums.len() < other.len() {
        sums.resize(other.len(), PreciseSum::ZERO);
    }
    for (sum, o) in sums.iter_mut().zip(other) {
        sum.merge(o);
    }
}

fn values(sums: &[PreciseSum]) -> Vec<f64> {
    sums.iter().map(PreciseSum::value).collect()
}
