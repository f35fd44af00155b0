//! Candidates discovered while scanning the header: scale variations and PDF
//! error-set families.

use std::cmp::Ordering;

/// One declared renormalization/factorization scale variation.
///
/// Ordering: `(mu_r, mu_f)` ascending, then `id`, then `label`. This ordering
/// fixes the scale column order of the run. Equality follows the same total
/// order, so `-0.0 != 0.0` and a NaN scale equals itself.
#[derive(Debug, Clone)]
pub struct ScaleVariationCandidate {
    pub id: String,

    /// Full entry text starting at `muR=` (used in the column documentation).
    pub label: String,

    pub mu_r: f32,
    pub mu_f: f32,
}

impl ScaleVariationCandidate {
    pub fn new(id: impl Into<String>, label: impl Into<String>, mu_r: f32, mu_f: f32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            mu_r,
            mu_f,
        }
    }

    fn scales(&self) -> (f32, f32) {
        (self.mu_r, self.mu_f)
    }
}

impl PartialEq for ScaleVariationCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScaleVariationCandidate {}

impl PartialOrd for ScaleVariationCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScaleVariationCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        let (r, f) = self.scales();
        let (or, of) = other.scales();
        r.total_cmp(&or)
            .then_with(|| f.total_cmp(&of))
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.label.cmp(&other.label))
    }
}

/// A contiguous run of PDF error-set members sharing one LHA family.
///
/// Invariant: `ids.len() == last - first + 1`, ids in LHA order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfSetCandidate {
    pub ids: Vec<String>,
    first: u32,
    last: u32,
}

impl PdfSetCandidate {
    /// Start a family with its first member.
    pub fn new(id: impl Into<String>, lha_id: u32) -> Self {
        Self {
            ids: vec![id.into()],
            first: lha_id,
            last: lha_id,
        }
    }

    /// Append `id` if `lha_id` continues the range (`last + 1`).
    /// Returns false (and leaves the family untouched) otherwise.
    pub fn try_extend(&mut self, id: &str, lha_id: u32) -> bool {
        if self.last.checked_add(1) != Some(lha_id) {
            return false;
        }
        self.last = lha_id;
        self.ids.push(id.to_string());
        true
    }

    pub fn first(&self) -> u32 {
        self.first
    }

    pub fn last(&self) -> u32 {
        self.last
    }

    pub fn lha_range(&self) -> (u32, u32) {
        (self.first, self.last)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Append `(id, lha_id)` to the last family if it continues it, otherwise open
/// a new family. Families therefore keep header order.
pub fn push_pdf_member(families: &mut Vec<PdfSetCandidate>, id: &str, lha_id: u32) {
    let extended = families
        .last_mut()
        .is_some_and(|last| last.try_extend(id, lha_id));
    if !extended {
        families.push(PdfSetCandidate::new(id, lha_id));
    }
}
