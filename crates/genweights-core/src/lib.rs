//! genweights-core
//!
//! Generator weight tables for LHE samples: which scale and PDF variation
//! weights a run declares, their per-event values relative to the nominal
//! weight, and the per-run sums that stay mergeable across workers and files.
//!
//! # モジュール構成
//! - **domain**: 入出力の型、設定、エラー
//! - **header**: run header の行パーサ（weightgroup の状態機械）
//! - **accum**: ワーカーごとの和と merge
//! - **app**: resolver, matcher, coordinator, worker group
//! - **ports**: 出力先の抽象化（TableSink）
//! - **impls**: InMemorySink, JsonLinesSink

pub mod accum;
pub mod app;
pub mod domain;
pub mod header;
pub mod impls;
pub mod ports;
