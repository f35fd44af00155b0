//! WeightGroupParser - header の weight group を走査する状態機械
//!
//! # 状態遷移
//! ```text
//! Idle      --open(scale_variation)--> InScale
//! Idle      --open(PDF_variation)----> InPdf
//! Idle      --open(その他)-----------> InIgnored
//! In*       --close------------------> Idle
//! In*       --open(...)--------------> 新しい group へ直接遷移（close 抜けの回復）
//! ```
//!
//! group 内の行はまず entry、次に close、最後に open として判定します。
//! （entry と close が同じ行にあれば entry として扱う）
//! section の終わりで group が閉じていなくてもエラーにはしません。

use tracing::{info, warn};

use super::line::{self, GroupOpen, PdfEntry, ScaleEntry};
use crate::domain::{EntryError, PdfSetCandidate, ScaleField, ScaleVariationCandidate, push_pdf_member};

pub const SCALE_GROUP: &str = "scale_variation";
pub const PDF_GROUP: &str = "PDF_variation";

const SCALE_DOC_PREFIX: &str = "LHE scale variation weights (w_var / w_nominal)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    InScale,
    InPdf,
    InIgnored,
}

impl ScanState {
    fn entering(open: &GroupOpen<'_>) -> Self {
        match open.name {
            SCALE_GROUP => ScanState::InScale,
            PDF_GROUP => ScanState::InPdf,
            _ => ScanState::InIgnored,
        }
    }
}

/// Result of scanning one or more header sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedWeightGroups {
    /// Sorted by `(muR, muF, id)`: this is the scale column order.
    pub scale: Vec<ScaleVariationCandidate>,

    /// PDF families in header order.
    pub pdf: Vec<PdfSetCandidate>,

    /// Entries that had the right shape but unusable numbers.
    pub rejected: Vec<EntryError>,
}

impl ParsedWeightGroups {
    /// `"... ; [0] is <label>; [1] is <label>"`, or empty when there are no
    /// scale weights.
    pub fn scale_doc(&self) -> String {
        if self.scale.is_empty() {
            return String::new();
        }
        let entries: Vec<String> = self
            .scale
            .iter()
            .enumerate()
            .map(|(i, sw)| format!("[{i}] is {}", sw.label))
            .collect();
        format!("{SCALE_DOC_PREFIX}; {}", entries.join("; "))
    }

    pub fn scale_ids(&self) -> Vec<String> {
        self.scale.iter().map(|sw| sw.id.clone()).collect()
    }
}

pub struct WeightGroupParser {
    state: ScanState,
    scale: Vec<ScaleVariationCandidate>,
    pdf: Vec<PdfSetCandidate>,
    rejected: Vec<EntryError>,
    trace: bool,
}

impl WeightGroupParser {
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            scale: Vec::new(),
            pdf: Vec::new(),
            rejected: Vec::new(),
            trace: false,
        }
    }

    /// Log every line and transition at info level.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Scan one header section. Candidates accumulate across sections; the
    /// group state does not.
    pub fn scan_section<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.state = ScanState::Idle;
        for line in lines {
            self.feed_line(line.as_ref());
        }
        if self.trace && self.state != ScanState::Idle {
            info!(state = ?self.state, "section ended inside a weight group");
        }
        self.state = ScanState::Idle;
    }

    pub fn feed_line(&mut self, line: &str) {
        if self.trace {
            info!(state = ?self.state, line = line.trim_end(), "header line");
        }
        self.state = match self.state {
            ScanState::Idle => self.on_idle(line),
            ScanState::InScale => self.on_scale(line),
            ScanState::InPdf => self.on_pdf(line),
            ScanState::InIgnored => self.on_ignored(line),
        };
    }

    /// Sort the scale candidates and hand everything over.
    pub fn finish(mut self) -> ParsedWeightGroups {
        self.scale.sort();
        ParsedWeightGroups {
            scale: self.scale,
            pdf: self.pdf,
            rejected: self.rejected,
        }
    }

    fn on_idle(&mut self, line: &str) -> ScanState {
        match line::group_open(line) {
            Some(open) => self.open_group(&open, false),
            None => ScanState::Idle,
        }
    }

    fn on_scale(&mut self, line: &str) -> ScanState {
        if let Some(entry) = line::scale_entry(line) {
            self.push_scale(&entry);
            ScanState::InScale
        } else {
            self.close_or_reopen(line, ScanState::InScale)
        }
    }

    fn on_pdf(&mut self, line: &str) -> ScanState {
        if let Some(entry) = line::pdf_entry(line) {
            self.push_pdf(&entry);
            ScanState::InPdf
        } else {
            self.close_or_reopen(line, ScanState::InPdf)
        }
    }

    fn on_ignored(&mut self, line: &str) -> ScanState {
        self.close_or_reopen(line, ScanState::InIgnored)
    }

    fn close_or_reopen(&mut self, line: &str, current: ScanState) -> ScanState {
        if line::is_group_close(line) {
            if self.trace {
                info!("end of weight group");
            }
            return ScanState::Idle;
        }
        match line::group_open(line) {
            Some(open) => self.open_group(&open, true),
            None => current,
        }
    }

    fn open_group(&mut self, open: &GroupOpen<'_>, missed_close: bool) -> ScanState {
        let next = ScanState::entering(open);
        if self.trace {
            if missed_close {
                info!(name = open.name, "new weight group before the previous one was closed");
            }
            info!(name = open.name, combine = open.combine, next = ?next, "weight group");
        }
        next
    }

    fn push_scale(&mut self, entry: &ScaleEntry<'_>) {
        let parsed = parse_scale(entry.id, ScaleField::MuR, entry.mu_r)
            .and_then(|mu_r| Ok((mu_r, parse_scale(entry.id, ScaleField::MuF, entry.mu_f)?)));
        match parsed {
            Ok((mu_r, mu_f)) => {
                if self.trace {
                    info!(id = entry.id, mu_r, mu_f, label = entry.label, "scale weight");
                }
                self.scale
                    .push(ScaleVariationCandidate::new(entry.id, entry.label, mu_r, mu_f));
            }
            Err(err) => self.reject(err),
        }
    }

    fn push_pdf(&mut self, entry: &PdfEntry<'_>) {
        match entry.lha_id.parse::<u32>() {
            Ok(lha_id) => {
                if self.trace {
                    info!(id = entry.id, lha_id, "pdf weight");
                }
                push_pdf_member(&mut self.pdf, entry.id, lha_id);
            }
            Err(_) => self.reject(EntryError::InvalidLhaId {
                id: entry.id.to_string(),
                value: entry.lha_id.to_string(),
            }),
        }
    }

    fn reject(&mut self, err: EntryError) {
        warn!(error = %err, "dropping malformed weight entry");
        self.rejected.push(err);
    }
}

impl Default for WeightGroupParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_scale(id: &str, field: ScaleField, value: &str) -> Result<f32, EntryError> {
    value.parse::<f32>().map_err(|_| EntryError::InvalidScale {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

/// Scan a single section with a fresh parser.
pub fn parse_section<I, S>(lines: I) -> ParsedWeightGroups
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = WeightGroupParser::new();
    parser.scan_section(lines);
    parser.finish()
}
