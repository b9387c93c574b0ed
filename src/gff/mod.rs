//! GFF/GTF feature reader: yields gene-structure records in file order.

pub mod entry;
pub mod gene_id;
pub mod parser;

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::Error;

use entry::FeatureRecord;
use gene_id::GeneIdExtractor;
use parser::ParsedLine;

/// Open a feature or size file, decompressing it when the name ends in `.gz`.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let file = File::open(path)?;
    let is_gz = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    if is_gz {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Lazily parse feature records from a buffered reader.
pub fn read_features<R: BufRead>(
    reader: R,
    gene_ids: &dyn GeneIdExtractor,
) -> FeatureReader<'_, R> {
    FeatureReader {
        lines: reader.lines(),
        line_num: 0,
        gene_ids,
        done: false,
    }
}

/// Iterator over the records of a feature file.
///
/// Stops after the first error or at a `##FASTA` directive.
pub struct FeatureReader<'a, R> {
    lines: Lines<R>,
    line_num: usize,
    gene_ids: &'a dyn GeneIdExtractor,
    done: bool,
}

impl<R: BufRead> Iterator for FeatureReader<'_, R> {
    type Item = Result<FeatureRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_num += 1;

            match parser::parse_line(&line, self.gene_ids) {
                Ok(ParsedLine::Record(record)) => return Some(Ok(record)),
                Ok(ParsedLine::Discarded | ParsedLine::Comment) => continue,
                Ok(ParsedLine::EndOfFeatures) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(with_line(e, self.line_num, &line)));
                }
            }
        }
        None
    }
}

fn with_line(err: Error, line_num: usize, line: &str) -> Error {
    let at = format!("(line {line_num}: {line})");
    match err {
        Error::Parse(msg) => Error::Parse(format!("{msg} {at}")),
        Error::Validation(msg) => Error::Validation(format!("{msg} {at}")),
        Error::UnrecognizedGeneIdentifier(msg) => {
            Error::UnrecognizedGeneIdentifier(format!("{msg} (line {line_num})"))
        }
        other => other,
    }
}
