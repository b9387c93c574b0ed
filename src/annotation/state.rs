//! Rolling context carried from one feature record to the next.

use crate::strand::Strand;

use super::region::RegionKind;

/// Context the automaton threads through the scan.
///
/// Each transition consumes one state and returns the next; nothing else is mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomatonState {
    /// Chromosome of the most recent gene.
    pub prev_chrom: Option<String>,
    /// Last coordinate accounted for by an emitted interval or a transcribed segment.
    pub prev_end: u64,
    /// Kind of the preceding anchor: `Tss` after a forward gene, `Intergenic` after a
    /// reverse gene, otherwise the last labelled CDS/UTR segment.
    pub prev_kind: Option<RegionKind>,
    pub prev_strand: Strand,
    pub prev_gene_id: Option<String>,
    /// The most recent gene is on the reverse strand and still owes its TSS and promoter.
    pub pending_reverse_gene: bool,
    /// Start of the pending reverse gene while none of its CDS/UTR segments has been seen.
    pub reverse_body_start: Option<u64>,
}

impl AutomatonState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `chrom` continues the chromosome of the previous gene.
    #[must_use]
    pub fn is_same_chromosome(&self, chrom: &str) -> bool {
        self.prev_chrom.as_deref() == Some(chrom)
    }
}
