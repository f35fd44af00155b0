//! DynamicWeightChoice - run ごとに凍結される列定義
//!
//! run の開始時に一度だけ作られ、`Arc` で全ワーカーに共有されます（読み取り専用）。

use serde::{Deserialize, Serialize};

/// Weight ids chosen for this run, in output column order.
///
/// Both id lists empty means "no reweighting information for this run".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicWeightChoice {
    pub scale_weight_ids: Vec<String>,
    pub scale_weights_doc: String,
    pub pdf_weight_ids: Vec<String>,
    pub pdf_weights_doc: String,
}

impl DynamicWeightChoice {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scale_weight_ids.is_empty() && self.pdf_weight_ids.is_empty()
    }
}
