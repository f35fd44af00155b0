//! Ports - 出力先の抽象化
//!
//! 計算（header 解析、マッチング、和の集計）は出力先を知りません。
//! イベントごとの表と run summary は `TableSink` を通して外へ出ます。

pub mod sink;

pub use self::sink::{NoopSink, TableSink};
