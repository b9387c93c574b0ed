//! Regio: functional partitioning of genomes from GFF gene annotations.

pub mod error;

pub mod annotation;
pub mod bed;
pub mod chromosome;
pub mod cli;
pub mod config;
pub mod gff;
pub mod strand;
