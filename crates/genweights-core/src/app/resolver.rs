//! WeightChoiceResolver - run ごとの列定義を決める
//!
//! header を走査し、scale 重みはソート順そのまま、PDF は優先リストの
//! 先頭から最初に見つかった family を採用します。
//! header が無い・空の run は空の choice になります（エラーではない）。

use tracing::info;

use crate::domain::{DynamicWeightChoice, PdfSetCandidate, RunHeaders};
use crate::header::{ParsedWeightGroups, WeightGroupParser};

const PDF_DOC_PREFIX: &str = "LHE pdf variation weights (w_var / w_nominal) for LHA IDs";

pub struct WeightChoiceResolver<'a> {
    preferred_pdfs: &'a [u32],
    header_tag: &'a str,
    trace: bool,
}

impl<'a> WeightChoiceResolver<'a> {
    pub fn new(preferred_pdfs: &'a [u32], header_tag: &'a str) -> Self {
        Self {
            preferred_pdfs,
            header_tag,
            trace: false,
        }
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Scan the tagged sections of `headers` (if any) and freeze the choice.
    pub fn resolve(&self, headers: Option<&RunHeaders>) -> DynamicWeightChoice {
        let Some(headers) = headers else {
            return DynamicWeightChoice::empty();
        };
        let mut parser = WeightGroupParser::new().with_trace(self.trace);
        let mut scanned = 0usize;
        for section in &headers.sections {
            if section.tag != self.header_tag {
                if self.trace {
                    info!(tag = %section.tag, "skipping header section");
                }
                continue;
            }
            if self.trace {
                info!(tag = %section.tag, lines = section.lines.len(), "scanning header section");
            }
            parser.scan_section(&section.lines);
            scanned += 1;
        }
        if scanned == 0 {
            return DynamicWeightChoice::empty();
        }
        let parsed = parser.finish();
        if self.trace {
            trace_parsed(&parsed);
        }
        self.choose(&parsed)
    }

    /// Apply the PDF preference to already parsed groups.
    pub fn choose(&self, parsed: &ParsedWeightGroups) -> DynamicWeightChoice {
        let mut choice = DynamicWeightChoice {
            scale_weight_ids: parsed.scale_ids(),
            scale_weights_doc: parsed.scale_doc(),
            ..DynamicWeightChoice::default()
        };
        if let Some(family) = select_pdf_family(&parsed.pdf, self.preferred_pdfs) {
            choice.pdf_weight_ids = family.ids.clone();
            choice.pdf_weights_doc =
                format!("{PDF_DOC_PREFIX} {} - {}", family.first(), family.last());
        }
        choice
    }
}

/// First family, in preference order, whose range starts at a preferred LHA id.
pub fn select_pdf_family<'f>(
    families: &'f [PdfSetCandidate],
    preferred: &[u32],
) -> Option<&'f PdfSetCandidate> {
    preferred
        .iter()
        .find_map(|&lha_id| families.iter().find(|f| f.first() == lha_id))
}

fn trace_parsed(parsed: &ParsedWeightGroups) {
    info!(count = parsed.scale.len(), "scale variations found");
    for sw in &parsed.scale {
        info!(id = %sw.id, mu_r = sw.mu_r, mu_f = sw.mu_f, label = %sw.label, "scale variation");
    }
    info!(count = parsed.pdf.len(), "PDF set errors found");
    for pw in &parsed.pdf {
        info!(
            first = pw.first(),
            last = pw.last(),
            weights = pw.len(),
            first_id = pw.ids.first().map(String::as_str).unwrap_or_default(),
            "PDF family"
        );
    }
}
