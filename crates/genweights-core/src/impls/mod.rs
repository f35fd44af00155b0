//! Impls - TableSink の実装
//!
//! # 含まれる実装
//! - **InMemorySink**: テスト・開発用、全レコードをメモリに保持
//! - **JsonLinesSink**: 任意の `Write` へ JSON Lines で書き出す（CLI が使う）

pub mod jsonl_sink;
pub mod memory_sink;

pub use self::jsonl_sink::JsonLinesSink;
pub use self::memory_sink::InMemorySink;
