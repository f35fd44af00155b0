//! CoordinatorBuilder - RunCoordinator の構築
//!
//! # Fail-fast 設計
//! - named weight の id と label の数が合わなければ `build()` が
//!   `ConfigError` を返す（イベント処理が始まる前に止める）

use super::coordinator::RunCoordinator;
use crate::domain::{ConfigError, WeightConfig};

/// # 使用例
/// ```ignore
/// let coordinator = CoordinatorBuilder::new()
///     .preferred_pdfs([91400, 260001])
///     .named_weight("rwgt_1", "sm")
///     .build()?;
/// ```
pub struct CoordinatorBuilder {
    config: WeightConfig,
}

impl CoordinatorBuilder {
    pub fn new() -> Self {
        Self::from_config(WeightConfig::default())
    }

    pub fn from_config(config: WeightConfig) -> Self {
        Self { config }
    }

    /// Replace the PDF preference list.
    pub fn preferred_pdfs(mut self, lha_ids: impl IntoIterator<Item = u32>) -> Self {
        self.config.preferred_pdfs = lha_ids.into_iter().collect();
        self
    }

    pub fn named_weight(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.config.named_weight_ids.push(id.into());
        self.config.named_weight_labels.push(label.into());
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn header_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.header_tag = tag.into();
        self
    }

    pub fn build(self) -> Result<RunCoordinator, ConfigError> {
        let config = self.config.validate()?;
        Ok(RunCoordinator::new(config))
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
