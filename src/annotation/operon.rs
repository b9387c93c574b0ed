//! Operon merge policy for closely spaced same-strand genes.

/// Outcome of the operon check at a gene boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperonDecision {
    /// Treat both genes as one transcription unit; the gap is plain intergenic space.
    Merge,
    /// Give the boundary its own promoter and TSS.
    Separate,
}

/// Decide whether a gap of `gap` bases between two same-strand genes joins them into an operon.
///
/// `gap` is signed: overlapping genes produce a negative gap, which merges whenever operons
/// are enabled.
#[must_use]
pub fn decide(gap: i64, operon_distance: u64, operons_enabled: bool) -> OperonDecision {
    let distance = i64::try_from(operon_distance).unwrap_or(i64::MAX);
    if operons_enabled && gap < distance {
        OperonDecision::Merge
    } else {
        OperonDecision::Separate
    }
}
