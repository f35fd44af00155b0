//! Domain model (inputs, candidates, run choice, outputs, errors).
//!
//! - weight: host から渡される入力（イベントの重み、run header）
//! - candidate: header 走査で見つかった scale / PDF の候補
//! - choice: run ごとに凍結される列定義
//! - tables / summary: 出力の形
//! - config / errors / ids

pub mod candidate;
pub mod choice;
pub mod config;
pub mod errors;
pub mod ids;
pub mod summary;
pub mod tables;
pub mod weight;

pub use candidate::{PdfSetCandidate, ScaleVariationCandidate, push_pdf_member};
pub use choice::DynamicWeightChoice;
pub use config::{DEFAULT_HEADER_TAG, ValidatedConfig, WeightConfig};
pub use errors::{ConfigError, EntryError, GenWeightsError, ScaleField, SinkError};
pub use ids::RunId;
pub use summary::{NamedSum, RunSummary, SummaryColumn, SummaryValue};
pub use tables::{EventTables, NamedColumn, NamedWeightRecord, WeightTable};
pub use weight::{EventInput, HeaderSection, LheEventWeights, RawWeightEntry, RunHeaders};
