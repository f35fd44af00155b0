//! Per-event filling of the LHE weight tables.

use tracing::info;

use super::matcher::match_event_weights;
use crate::accum::Accumulator;
use crate::domain::{
    DynamicWeightChoice, EventTables, LheEventWeights, NamedColumn, NamedWeightRecord,
    ValidatedConfig, WeightTable, tables,
};

/// Build the tables of one event that carries LHE weights and record it in
/// `acc`. `dump` logs every raw weight with its relative value.
pub fn fill_lhe_tables(
    config: &ValidatedConfig,
    choice: &DynamicWeightChoice,
    gen_weight: f64,
    lhe: &LheEventWeights,
    acc: &mut Accumulator,
    dump: bool,
) -> EventTables {
    let w0 = lhe.original_weight;
    if dump {
        for w in &lhe.weights {
            info!(id = %w.id, weight = w.value, rel = w.value / w0, "LHE weight");
        }
    }

    let rel = match_event_weights(&lhe.weights, choice, w0, config.named_weight_ids());

    let named = NamedWeightRecord {
        original_weight: Some(w0 as f32),
        columns: config
            .named_weights()
            .zip(&rel.named)
            .map(|((id, label), &value)| NamedColumn {
                label: label.to_string(),
                doc: format!("LHE weight for id {id}, relative to nominal"),
                value: value as f32,
            })
            .collect(),
    };

    let out = EventTables {
        gen_weight: gen_weight as f32,
        scale: WeightTable::from_relative(tables::SCALE_TABLE, &choice.scale_weights_doc, &rel.scale),
        pdf: WeightTable::from_relative(tables::PDF_TABLE, &choice.pdf_weights_doc, &rel.pdf),
        named,
    };

    acc.record_full(gen_weight, &rel.scale, &rel.pdf, &rel.named);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawWeightEntry, WeightConfig};

    fn config() -> ValidatedConfig {
        WeightConfig {
            named_weight_ids: vec!["rwgt_7".into()],
            named_weight_labels: vec!["cW".into()],
            ..WeightConfig::default()
        }
        .validate()
        .unwrap()
    }

    fn choice() -> DynamicWeightChoice {
        DynamicWeightChoice {
            scale_weight_ids: vec!["1".into(), "2".into()],
            scale_weights_doc: "scale doc".into(),
            pdf_weight_ids: vec!["10".into()],
            pdf_weights_doc: "pdf doc".into(),
        }
    }

    #[test]
    fn fills_tables_and_accumulates_with_gen_weight() {
        let lhe = LheEventWeights {
            original_weight: 4.0,
            weights: vec![
                RawWeightEntry::new("2", 2.0),
                RawWeightEntry::new("10", 6.0),
                RawWeightEntry::new("rwgt_7", 1.0),
            ],
        };
        let mut acc = Accumulator::new();
        let t = fill_lhe_tables(&config(), &choice(), 0.5, &lhe, &mut acc, false);

        assert_eq!(t.gen_weight, 0.5);
        assert_eq!(t.scale.name, "LHEScaleWeight");
        assert_eq!(t.scale.doc, "scale doc");
        // "1" is missing from the event: stays 1.0
        assert_eq!(t.scale.values, vec![1.0, 0.5]);
        assert_eq!(t.pdf.values, vec![1.5]);
        assert_eq!(t.named.original_weight, Some(4.0));
        assert_eq!(t.named.column("cW"), Some(0.25));
        assert_eq!(
            t.named.columns[0].doc,
            "LHE weight for id rwgt_7, relative to nominal"
        );

        // sums use the generator weight, not the LHE nominal
        assert_eq!(acc.event_count(), 1);
        assert_eq!(acc.sum_w(), 0.5);
        assert_eq!(acc.scale_sums(), vec![0.5, 0.25]);
        assert_eq!(acc.pdf_sums(), vec![0.75]);
        assert_eq!(acc.named_sums(), vec![0.125]);
    }
}
