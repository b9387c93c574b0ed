//! Genome partitioning: turns ordered gene-structure records into promoter, TSS, UTR,
//! CDS, intron and intergenic intervals.

pub mod annotator;
pub mod automaton;
pub mod operon;
pub mod region;
pub mod state;

pub use annotator::{Annotator, RunStats};
pub use automaton::{Automaton, GeneRule, Transition};
pub use region::{AnnotationInterval, RegionKind};
pub use state::AutomatonState;
