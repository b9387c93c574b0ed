//! Drives the automaton over a whole feature stream.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info};

use crate::bed::IntervalSink;
use crate::chromosome::ChromosomeSizes;
use crate::config::AnnotationConfig;
use crate::error::Error;
use crate::gff::entry::{FeatureKind, FeatureRecord};

use super::automaton::Automaton;
use super::region::{AnnotationInterval, RegionKind};
use super::state::AutomatonState;

/// Counters collected during one annotation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub records: usize,
    pub genes: usize,
    pub intervals: usize,
    pub by_kind: BTreeMap<RegionKind, usize>,
    /// UTR records with no 5'/3' context, which produce no interval.
    pub unlabelled_utrs: usize,
    pub chromosomes_with_genes: usize,
    /// Chromosomes without genes, filled with a single intergenic interval.
    pub chromosomes_filled: usize,
}

impl RunStats {
    fn count(&mut self, intervals: &[AnnotationInterval]) {
        self.intervals += intervals.len();
        for interval in intervals {
            *self.by_kind.entry(interval.kind).or_default() += 1;
        }
    }

    #[must_use]
    pub fn kind_count(&self, kind: RegionKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Owns the rolling state of one scan.
pub struct Annotator<'a> {
    automaton: Automaton<'a>,
    sizes: &'a ChromosomeSizes,
    state: AutomatonState,
    touched: HashSet<String>,
    stats: RunStats,
}

impl<'a> Annotator<'a> {
    pub fn new(sizes: &'a ChromosomeSizes, config: &'a AnnotationConfig) -> Self {
        Self {
            automaton: Automaton::new(sizes, config),
            sizes,
            state: AutomatonState::new(),
            touched: HashSet::new(),
            stats: RunStats::default(),
        }
    }

    /// Feed one record, returning the intervals it produced.
    pub fn push(&mut self, record: &FeatureRecord) -> Result<Vec<AnnotationInterval>, Error> {
        let state = std::mem::take(&mut self.state);
        let transition = self.automaton.process(record, state)?;
        self.state = transition.state;

        self.stats.records += 1;
        match record.kind {
            FeatureKind::Gene => {
                self.stats.genes += 1;
                if self.touched.insert(record.chrom.clone()) {
                    debug!("first gene on {}", record.chrom);
                }
            }
            FeatureKind::Utr
                if !transition.intervals.iter().any(|i| {
                    matches!(i.kind, RegionKind::FivePrimeUtr | RegionKind::ThreePrimeUtr)
                }) =>
            {
                self.stats.unlabelled_utrs += 1;
            }
            _ => {}
        }
        self.stats.count(&transition.intervals);
        Ok(transition.intervals)
    }

    /// Close the scan: the tail of the last chromosome and every gene-free chromosome.
    pub fn finish(mut self) -> Result<(Vec<AnnotationInterval>, RunStats), Error> {
        let intervals = self.automaton.finalize(&self.state, &self.touched)?;
        self.stats.count(&intervals);
        self.stats.chromosomes_with_genes = self.touched.len();
        self.stats.chromosomes_filled = self
            .sizes
            .iter()
            .filter(|c| !self.touched.contains(&c.name))
            .count();
        info!(
            "{} records, {} intervals, {} chromosomes without genes",
            self.stats.records, self.stats.intervals, self.stats.chromosomes_filled
        );
        Ok((intervals, self.stats))
    }

    /// Run a full pass, writing every interval to `sink` in emission order.
    pub fn annotate<I, S>(mut self, records: I, sink: &mut S) -> Result<RunStats, Error>
    where
        I: IntoIterator<Item = Result<FeatureRecord, Error>>,
        S: IntervalSink + ?Sized,
    {
        for record in records {
            for interval in self.push(&record?)? {
                sink.write(&interval)?;
            }
        }
        let (tail, stats) = self.finish()?;
        for interval in &tail {
            sink.write(interval)?;
        }
        sink.finish()?;
        Ok(stats)
    }
}
