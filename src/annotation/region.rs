//! Functional region labels and the intervals the automaton emits.

use std::fmt;

/// Functional class of an emitted interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKind {
    Promoter,
    Tss,
    Intergenic,
    Intron,
    Cds,
    FivePrimeUtr,
    ThreePrimeUtr,
}

impl RegionKind {
    pub const ALL: [RegionKind; 7] = [
        Self::Promoter,
        Self::Tss,
        Self::Intergenic,
        Self::Intron,
        Self::Cds,
        Self::FivePrimeUtr,
        Self::ThreePrimeUtr,
    ];

    /// Label written to the output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Promoter => "Promoter",
            Self::Tss => "TSS",
            Self::Intergenic => "Intergenic",
            Self::Intron => "Intron",
            Self::Cds => "CDS",
            Self::FivePrimeUtr => "5'UTR",
            Self::ThreePrimeUtr => "3'UTR",
        }
    }

    /// CDS and UTR segments: the features an intron can sit between.
    #[must_use]
    pub fn is_transcribed_segment(self) -> bool {
        matches!(self, Self::Cds | Self::FivePrimeUtr | Self::ThreePrimeUtr)
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A labelled, 1-based inclusive interval on one chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub kind: RegionKind,
    /// `None` for intervals not tied to a gene, such as intergenic space.
    pub gene_id: Option<String>,
}

impl AnnotationInterval {
    /// Gene identifier as written to the output; `.` when absent.
    #[must_use]
    pub fn gene_label(&self) -> &str {
        self.gene_id.as_deref().unwrap_or(".")
    }
}

impl fmt::Display for AnnotationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{} {} {}",
            self.chrom,
            self.start,
            self.end,
            self.kind,
            self.gene_label()
        )
    }
}
