//! Feature records consumed by the annotation automaton.

use crate::strand::Strand;

/// Gene-structure feature types the automaton understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Gene,
    MRna,
    Cds,
    Utr,
}

impl FeatureKind {
    /// Map a GFF column 3 value onto a feature kind.
    ///
    /// Returns `None` for types that play no part in the partition (exons, codons, ...).
    #[must_use]
    pub fn from_gff(s: &str) -> Option<Self> {
        match s {
            "gene" => Some(Self::Gene),
            "mRNA" | "transcript" => Some(Self::MRna),
            "CDS" => Some(Self::Cds),
            "UTR" | "five_prime_UTR" | "three_prime_UTR" => Some(Self::Utr),
            _ => None,
        }
    }
}

/// One feature line, reduced to what the automaton needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub chrom: String,
    /// 1-based inclusive.
    pub start: u64,
    /// 1-based inclusive.
    pub end: u64,
    pub kind: FeatureKind,
    pub strand: Strand,
    /// Only set on gene records; CDS and UTR records inherit the current gene.
    pub gene_id: Option<String>,
}

impl FeatureRecord {
    pub fn gene(chrom: &str, start: u64, end: u64, strand: Strand, gene_id: &str) -> Self {
        Self {
            chrom: chrom.to_string(),
            start,
            end,
            kind: FeatureKind::Gene,
            strand,
            gene_id: Some(gene_id.to_string()),
        }
    }

    /// A non-gene feature (mRNA, CDS or UTR).
    pub fn part(chrom: &str, start: u64, end: u64, kind: FeatureKind, strand: Strand) -> Self {
        Self {
            chrom: chrom.to_string(),
            start,
            end,
            kind,
            strand,
            gene_id: None,
        }
    }
}
