//! GFF/GTF line parser.

use crate::error::Error;
use crate::strand::Strand;

use super::entry::{FeatureKind, FeatureRecord};
use super::gene_id::GeneIdExtractor;

/// Result of parsing a single feature line.
#[derive(Debug)]
pub enum ParsedLine {
    Record(FeatureRecord),
    Discarded,
    Comment,
    /// `##FASTA`: everything after is sequence, not features.
    EndOfFeatures,
}

/// Parse a single tab-delimited feature line.
///
/// Columns 2 (source), 6 (score) and 8 (frame) are ignored. Gene identifiers are
/// only extracted for gene lines; a gene without one is an error.
pub fn parse_line(line: &str, gene_ids: &dyn GeneIdExtractor) -> Result<ParsedLine, Error> {
    if line.starts_with('#') {
        if line.starts_with("##FASTA") {
            return Ok(ParsedLine::EndOfFeatures);
        }
        return Ok(ParsedLine::Comment);
    }

    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(ParsedLine::Comment);
    }

    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() != 9 {
        return Err(Error::Parse(format!(
            "feature line has {} columns, expected 9",
            columns.len()
        )));
    }

    let Some(kind) = FeatureKind::from_gff(columns[2]) else {
        return Ok(ParsedLine::Discarded);
    };

    let start: u64 = columns[3]
        .parse()
        .map_err(|e| Error::Parse(format!("invalid start '{}': {e}", columns[3])))?;
    let end: u64 = columns[4]
        .parse()
        .map_err(|e| Error::Parse(format!("invalid end '{}': {e}", columns[4])))?;
    if start == 0 {
        return Err(Error::Validation(
            "feature start is 0, coordinates are 1-based".to_string(),
        ));
    }
    if start > end {
        return Err(Error::Validation(format!(
            "feature start {start} is past its end {end}"
        )));
    }

    let strand = Strand::from_gff(columns[6]);

    let gene_id = if kind == FeatureKind::Gene {
        let id = gene_ids.extract(columns[8]).ok_or_else(|| {
            Error::UnrecognizedGeneIdentifier(format!("no gene identifier in '{}'", columns[8]))
        })?;
        Some(id)
    } else {
        None
    };

    Ok(ParsedLine::Record(FeatureRecord {
        chrom: columns[0].to_string(),
        start,
        end,
        kind,
        strand,
        gene_id,
    }))
}
