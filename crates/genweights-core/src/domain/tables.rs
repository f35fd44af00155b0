//! Per-event output tables.
//!
//! Column layout follows the generator-weight tables of the event format:
//! `genWeight`, `LHEScaleWeight`, `LHEPdfWeight` and `LHEWeight`. Values are
//! single precision; the accumulation itself never sees these `f32`s.

use serde::{Deserialize, Serialize};

pub const GEN_WEIGHT_TABLE: &str = "genWeight";
pub const SCALE_TABLE: &str = "LHEScaleWeight";
pub const PDF_TABLE: &str = "LHEPdfWeight";
pub const NAMED_TABLE: &str = "LHEWeight";

/// One variable-length table of relative weights (one row per variation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,

    #[serde(default)]
    pub values: Vec<f32>,
}

impl WeightTable {
    /// Table with no rows. Emitted when the event has no LHE weights so the
    /// output shape stays the same for every event.
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            doc: String::new(),
            values: Vec::new(),
        }
    }

    pub fn from_relative(name: &str, doc: &str, relative: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            doc: doc.to_string(),
            values: relative.iter().map(|&w| w as f32).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Single labelled column of the `LHEWeight` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColumn {
    pub label: String,
    pub doc: String,
    pub value: f32,
}

/// `LHEWeight` record: nominal LHE weight plus one column per named weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedWeightRecord {
    #[serde(rename = "originalXWGTUP", default, skip_serializing_if = "Option::is_none")]
    pub original_weight: Option<f32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<NamedColumn>,
}

impl NamedWeightRecord {
    pub fn column(&self, label: &str) -> Option<f32> {
        self.columns.iter().find(|c| c.label == label).map(|c| c.value)
    }
}

/// Everything emitted for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTables {
    #[serde(rename = "genWeight")]
    pub gen_weight: f32,

    pub scale: WeightTable,
    pub pdf: WeightTable,
    pub named: NamedWeightRecord,
}

impl EventTables {
    /// Tables for an event without LHE information.
    pub fn gen_only(gen_weight: f64) -> Self {
        Self {
            gen_weight: gen_weight as f32,
            scale: WeightTable::empty(SCALE_TABLE),
            pdf: WeightTable::empty(PDF_TABLE),
            named: NamedWeightRecord::default(),
        }
    }

    pub fn has_lhe(&self) -> bool {
        self.named.original_weight.is_some()
    }
}
