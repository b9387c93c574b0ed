//! Chromosome size registry.

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::Error;

/// Largest chromosome length, and largest promoter or operon distance, that the
/// annotator accepts.
pub const MAX_POSITION: u64 = 1 << 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    pub name: String,
    pub length: u64,
}

impl Chromosome {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::Validation(
                "chromosome size entry has an empty name".to_string(),
            ));
        }
        if self.length == 0 {
            return Err(Error::Validation(format!(
                "chromosome '{}' has zero length",
                self.name
            )));
        }
        if self.length > MAX_POSITION {
            return Err(Error::Validation(format!(
                "chromosome '{}' length {} exceeds {MAX_POSITION}",
                self.name, self.length
            )));
        }
        Ok(())
    }
}

/// Immutable lookup from chromosome name to length.
///
/// Chromosomes keep the order in which they were loaded; that order is used when
/// filling chromosomes that never carried a gene.
#[derive(Debug, Clone, Default)]
pub struct ChromosomeSizes {
    chromosomes: Vec<Chromosome>,
    name_to_index: HashMap<String, usize>,
}

impl ChromosomeSizes {
    /// Build the registry from `(name, length)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut sizes = Self::default();
        for (name, length) in pairs {
            sizes.insert(Chromosome {
                name: name.into(),
                length,
            })?;
        }
        Ok(sizes)
    }

    /// Parse a tab-delimited `name<TAB>length` table.
    ///
    /// Blank lines and `#` comments are skipped and columns past the second are ignored.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut sizes = Self::default();

        for (line_num, line) in reader.lines().enumerate() {
            let line_num = line_num + 1;
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let name = fields.next().unwrap_or_default().trim();
            let length = fields.next().ok_or_else(|| {
                Error::Parse(format!(
                    "chromosome size line has 1 column, expected 2 (line {line_num}: {line})"
                ))
            })?;
            let length: u64 = length.trim().parse().map_err(|e| {
                Error::Parse(format!(
                    "invalid chromosome length '{length}': {e} (line {line_num})"
                ))
            })?;

            sizes.insert(Chromosome {
                name: name.to_string(),
                length,
            })?;
        }

        Ok(sizes)
    }

    fn insert(&mut self, chr: Chromosome) -> Result<(), Error> {
        chr.validate()?;
        if self.name_to_index.contains_key(&chr.name) {
            return Err(Error::Validation(format!(
                "chromosome '{}' is listed more than once",
                chr.name
            )));
        }
        self.name_to_index
            .insert(chr.name.clone(), self.chromosomes.len());
        self.chromosomes.push(chr);
        Ok(())
    }

    /// Length of `name`, failing with `UnknownChromosome` if it was never loaded.
    pub fn lookup(&self, name: &str) -> Result<u64, Error> {
        self.name_to_index
            .get(name)
            .map(|&idx| self.chromosomes[idx].length)
            .ok_or_else(|| Error::UnknownChromosome(name.to_string()))
    }

    /// Chromosomes in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Chromosome> {
        self.chromosomes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Sum of all chromosome lengths.
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.chromosomes.iter().map(|c| c.length).sum()
    }
}
