//! Strand orientation for genomic features.

use std::fmt;

/// Strand orientation of a gene. Decides on which side of the gene its
/// promoter and transcription start site are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    /// Parse from GFF column 7. "-" is reverse; everything else is forward.
    #[must_use]
    pub fn from_gff(s: &str) -> Self {
        if s == "-" { Self::Reverse } else { Self::Forward }
    }

    #[must_use]
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
