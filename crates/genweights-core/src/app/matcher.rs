//! EventWeightMatcher: maps one event's raw `(id, weight)` pairs onto the
//! frozen columns of the run.

use crate::domain::{DynamicWeightChoice, RawWeightEntry};

/// Relative weights (`w / w0`) per family, one slot per target id.
/// Slots without a matching raw weight stay at `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeWeights {
    pub scale: Vec<f64>,
    pub pdf: Vec<f64>,
    pub named: Vec<f64>,
}

pub fn match_event_weights(
    raw: &[RawWeightEntry],
    choice: &DynamicWeightChoice,
    w0: f64,
    named_ids: &[String],
) -> RelativeWeights {
    let mut out = RelativeWeights {
        scale: vec![1.0; choice.scale_weight_ids.len()],
        pdf: vec![1.0; choice.pdf_weight_ids.len()],
        named: vec![1.0; named_ids.len()],
    };
    for entry in raw {
        let rel = entry.value / w0;
        assign(&mut out.scale, &choice.scale_weight_ids, &entry.id, rel);
        assign(&mut out.pdf, &choice.pdf_weight_ids, &entry.id, rel);
        assign(&mut out.named, named_ids, &entry.id, rel);
    }
    out
}

fn assign(slots: &mut [f64], targets: &[String], id: &str, rel: f64) {
    for (slot, target) in slots.iter_mut().zip(targets) {
        if target == id {
            *slot = rel;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice() -> DynamicWeightChoice {
        DynamicWeightChoice {
            scale_weight_ids: vec!["1003".into(), "1001".into(), "1002".into()],
            pdf_weight_ids: vec!["2001".into(), "2002".into()],
            ..DynamicWeightChoice::default()
        }
    }

    #[test]
    fn matches_by_exact_id() {
        let raw = vec![
            RawWeightEntry::new("1001", 2.0),
            RawWeightEntry::new("1002", 4.0),
            RawWeightEntry::new("1003", 1.0),
            RawWeightEntry::new("2002", 3.0),
            RawWeightEntry::new("rwgt_1", 0.5),
            RawWeightEntry::new("9999", 100.0),
        ];
        let w = match_event_weights(&raw, &choice(), 2.0, &["rwgt_1".to_string()]);
        assert_eq!(w.scale, vec![0.5, 1.0, 2.0]);
        assert_eq!(w.pdf, vec![1.0, 1.5]);
        assert_eq!(w.named, vec![0.25]);
    }

    #[test]
    fn missing_ids_keep_default() {
        let raw = vec![RawWeightEntry::new("1001", 3.0)];
        let w = match_event_weights(&raw, &choice(), 1.0, &["absent".to_string()]);
        assert_eq!(w.scale, vec![1.0, 3.0, 1.0]);
        assert_eq!(w.pdf, vec![1.0, 1.0]);
        assert_eq!(w.named, vec![1.0]);
    }

    #[test]
    fn id_match_is_not_numeric() {
        let raw = vec![RawWeightEntry::new("01001", 3.0), RawWeightEntry::new("1001 ", 3.0)];
        let w = match_event_weights(&raw, &choice(), 1.0, &[]);
        assert_eq!(w.scale, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn empty_choice_gives_empty_vectors() {
        let raw = vec![RawWeightEntry::new("1001", 3.0)];
        let w = match_event_weights(&raw, &DynamicWeightChoice::empty(), 1.0, &[]);
        assert!(w.scale.is_empty());
        assert!(w.pdf.is_empty());
        assert!(w.named.is_empty());
    }

    #[test]
    fn later_duplicate_raw_entry_wins() {
        let raw = vec![RawWeightEntry::new("1001", 3.0), RawWeightEntry::new("1001", 5.0)];
        let w = match_event_weights(&raw, &choice(), 1.0, &[]);
        assert_eq!(w.scale[1], 5.0);
    }
}
