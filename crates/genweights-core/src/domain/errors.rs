//! Errors - エラー型と分類
//!
//! - `ConfigError`: 起動時に検出される致命的な設定エラー（唯一の fatal）
//! - `EntryError`: header 行の数値パース失敗（記録してスキップ、run は止めない）
//! - `SinkError`: 出力先の書き込みエラー
//! - `GenWeightsError`: オーケストレーション層のまとめ

use thiserror::Error;

/// Startup configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("size mismatch between named_weight_ids ({ids}) and named_weight_labels ({labels})")]
    NamedWeightSizeMismatch { ids: usize, labels: usize },
}

/// Which scale of a scale entry failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleField {
    MuR,
    MuF,
}

impl std::fmt::Display for ScaleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleField::MuR => f.write_str("muR"),
            ScaleField::MuF => f.write_str("muF"),
        }
    }
}

/// A header line matched a weight-entry shape but its numbers did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("scale weight id={id}: cannot parse {field}={value:?}")]
    InvalidScale {
        id: String,
        field: ScaleField,
        value: String,
    },

    #[error("pdf weight id={id}: cannot parse LHA id {value:?}")]
    InvalidLhaId { id: String, value: String },
}

/// Output sink failure.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink io: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sink poisoned: {0}")]
    Poisoned(String),
}

/// Top-level error of the run orchestration.
#[derive(Debug, Error)]
pub enum GenWeightsError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("worker-{worker} did not finish: {source}")]
    Worker {
        worker: usize,
        #[source]
        source: tokio::task::JoinError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message_names_both_sizes() {
        let err = ConfigError::NamedWeightSizeMismatch { ids: 2, labels: 1 };
        let msg = err.to_string();
        assert!(msg.contains("(2)"));
        assert!(msg.contains("(1)"));
    }

    #[test]
    fn entry_error_names_the_field() {
        let err = EntryError::InvalidScale {
            id: "1001".to_string(),
            field: ScaleField::MuF,
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "scale weight id=1001: cannot parse muF=\"x\"");
    }
}
