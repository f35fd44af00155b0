//! Input shapes handed to us by the host: per-event weights and run headers.
//!
//! Deserialization from the generator's storage format happens elsewhere; these
//! types only describe the values once they are in memory.

use serde::{Deserialize, Serialize};

/// One declared or observed weight: `(id, value)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWeightEntry {
    pub id: String,
    pub value: f64,
}

impl RawWeightEntry {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// Per-event LHE weight container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LheEventWeights {
    /// Nominal weight written by the matrix-element generator (`originalXWGTUP`).
    /// Denominator of every relative weight.
    pub original_weight: f64,

    #[serde(default)]
    pub weights: Vec<RawWeightEntry>,
}

/// Everything one event contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    /// Generator event weight. Always present; this is what gets accumulated.
    pub gen_weight: f64,

    /// Missing when the sample carries no LHE information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lhe: Option<LheEventWeights>,
}

impl EventInput {
    pub fn gen_only(gen_weight: f64) -> Self {
        Self {
            gen_weight,
            lhe: None,
        }
    }

    pub fn with_lhe(gen_weight: f64, original_weight: f64, weights: Vec<RawWeightEntry>) -> Self {
        Self {
            gen_weight,
            lhe: Some(LheEventWeights {
                original_weight,
                weights,
            }),
        }
    }
}

/// One tagged metadata section of the run header (e.g. `initrwgt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderSection {
    pub tag: String,

    #[serde(default)]
    pub lines: Vec<String>,
}

impl HeaderSection {
    pub fn new<I, S>(tag: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tag: tag.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Run-level metadata product: zero or more header sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunHeaders {
    #[serde(default)]
    pub sections: Vec<HeaderSection>,
}

impl RunHeaders {
    pub fn new(sections: Vec<HeaderSection>) -> Self {
        Self { sections }
    }

    /// Sections carrying `tag`, in header order.
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a HeaderSection> + 'a {
        self.sections.iter().filter(move |s| s.tag == tag)
    }
}
