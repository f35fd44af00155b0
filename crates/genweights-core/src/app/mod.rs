//! App - run のオーケストレーション
//!
//! - **resolver**: run header から `DynamicWeightChoice` を決める
//! - **matcher / processor**: イベントごとの表づくり
//! - **coordinator**: begin_run / process_event / end_run
//! - **worker**: ワーカー群への分配と Accumulator の回収
//! - **builder**: 設定を検証して RunCoordinator を作る
//! - **latch**: プロセス単位の one-shot フラグ

pub mod builder;
pub mod coordinator;
pub mod latch;
pub mod matcher;
pub mod processor;
pub mod resolver;
pub mod worker;

pub use self::builder::CoordinatorBuilder;
pub use self::coordinator::{Diagnostics, RunContext, RunCoordinator};
pub use self::latch::OneShot;
pub use self::matcher::{RelativeWeights, match_event_weights};
pub use self::processor::fill_lhe_tables;
pub use self::resolver::{WeightChoiceResolver, select_pdf_family};
pub use self::worker::{Worker, WorkerGroup};
