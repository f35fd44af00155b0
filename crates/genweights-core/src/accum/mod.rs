//! Running sums of event weights and their merge algebra.

pub mod counter;
pub mod precise;

pub use self::counter::Accumulator;
pub use self::precise::PreciseSum;
