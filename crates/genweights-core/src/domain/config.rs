//! Producer configuration.
//!
//! Every field has a default so a partial JSON document is enough. The config
//! has to go through [`WeightConfig::validate`] before anything can use it.

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// Header section tag scanned for weight groups.
pub const DEFAULT_HEADER_TAG: &str = "initrwgt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// LHA ids of the preferred PDF families, most preferred first.
    pub preferred_pdfs: Vec<u32>,

    /// Weight ids picked by exact match, independent of the group scan.
    pub named_weight_ids: Vec<String>,

    /// Output label for each named weight id (same length as the ids).
    pub named_weight_labels: Vec<String>,

    /// Dump the header scan of the first run and the weights of the first event.
    pub debug: bool,

    pub header_tag: String,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            preferred_pdfs: vec![91400, 260001],
            named_weight_ids: Vec::new(),
            named_weight_labels: Vec::new(),
            debug: false,
            header_tag: DEFAULT_HEADER_TAG.to_string(),
        }
    }
}

impl WeightConfig {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.named_weight_ids.len() != self.named_weight_labels.len() {
            return Err(ConfigError::NamedWeightSizeMismatch {
                ids: self.named_weight_ids.len(),
                labels: self.named_weight_labels.len(),
            });
        }
        Ok(ValidatedConfig { inner: self })
    }
}

/// A [`WeightConfig`] whose named ids and labels are known to line up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    inner: WeightConfig,
}

impl ValidatedConfig {
    pub fn preferred_pdfs(&self) -> &[u32] {
        &self.inner.preferred_pdfs
    }

    pub fn named_weight_ids(&self) -> &[String] {
        &self.inner.named_weight_ids
    }

    pub fn named_weight_labels(&self) -> &[String] {
        &self.inner.named_weight_labels
    }

    /// `(id, label)` pairs in configured order.
    pub fn named_weights(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .named_weight_ids
            .iter()
            .zip(&self.inner.named_weight_labels)
            .map(|(id, label)| (id.as_str(), label.as_str()))
    }

    pub fn debug(&self) -> bool {
        self.inner.debug
    }

    pub fn header_tag(&self) -> &str {
        &self.inner.header_tag
    }

    pub fn as_config(&self) -> &WeightConfig {
        &self.inner
    }
}
