//! Run summary: what is written once per run after all workers are merged.

use serde::{Deserialize, Serialize};

/// Weighted sum of one named weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSum {
    pub label: String,
    pub sumw: f64,
}

/// Merged per-run counters.
///
/// Field names on the wire follow the mergeable counter table of the event
/// format (`genEventCount`, `genEventSumw`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(rename = "genEventCount")]
    pub event_count: i64,

    #[serde(rename = "genEventSumw")]
    pub sum_w: f64,

    #[serde(rename = "genEventSumw2")]
    pub sum_w2: f64,

    /// Sum of genWeight * LHEScaleWeight[i].
    #[serde(rename = "LHEScaleSumw", default)]
    pub scale_sumw: Vec<f64>,

    /// Sum of genWeight * LHEPdfWeight[i].
    #[serde(rename = "LHEPdfSumw", default)]
    pub pdf_sumw: Vec<f64>,

    /// Empty when the run carried no LHE information at all.
    #[serde(rename = "LHESumw", default, skip_serializing_if = "Vec::is_empty")]
    pub named_sumw: Vec<NamedSum>,
}

/// Typed value of one summary column.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryValue {
    Int(i64),
    Float(f64),
    FloatVec(Vec<f64>),
}

/// Flat column view of a [`RunSummary`], for table writers.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryColumn {
    pub name: String,
    pub doc: String,
    pub value: SummaryValue,
}

impl RunSummary {
    pub fn named(&self, label: &str) -> Option<f64> {
        self.named_sumw.iter().find(|n| n.label == label).map(|n| n.sumw)
    }

    pub fn columns(&self) -> Vec<SummaryColumn> {
        let mut out = vec![
            SummaryColumn {
                name: "genEventCount".into(),
                doc: "event count".into(),
                value: SummaryValue::Int(self.event_count),
            },
            SummaryColumn {
                name: "genEventSumw".into(),
                doc: "sum of gen weights".into(),
                value: SummaryValue::Float(self.sum_w),
            },
            SummaryColumn {
                name: "genEventSumw2".into(),
                doc: "sum of gen (weight^2)".into(),
                value: SummaryValue::Float(self.sum_w2),
            },
            SummaryColumn {
                name: "LHEScaleSumw".into(),
                doc: "Sum of genEventWeight * LHEScaleWeight[i]".into(),
                value: SummaryValue::FloatVec(self.scale_sumw.clone()),
            },
            SummaryColumn {
                name: "LHEPdfSumw".into(),
                doc: "Sum of genEventWeight * LHEPdfWeight[i]".into(),
                value: SummaryValue::FloatVec(self.pdf_sumw.clone()),
            },
        ];
        for n in &self.named_sumw {
            out.push(SummaryColumn {
                name: format!("LHESumw_{}", n.label),
                doc: format!("Sum of genEventWeight * LHEWeight_{}", n.label),
                value: SummaryValue::Float(n.sumw),
            });
        }
        out
    }
}
