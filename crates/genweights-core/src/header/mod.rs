//! Header scanning: line shapes and the weight-group state machine.

pub mod line;
pub mod parser;

pub use self::parser::{
    PDF_GROUP, ParsedWeightGroups, SCALE_GROUP, ScanState, WeightGroupParser, parse_section,
};
