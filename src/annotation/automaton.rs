//! Single-pass annotation automaton.
//!
//! Each feature record is turned into zero or more labelled intervals using only the
//! record itself and an [`AutomatonState`] carried over from the previous record.
//! Gene records decide where promoters, TSS markers and intergenic space go; CDS and
//! UTR records label the gene body and the introns between its segments.
//!
//! Coordinates are 1-based and inclusive. Spans that would be empty after clamping to
//! `[1, chromosome length]` are dropped.

use std::collections::HashSet;

use log::{debug, trace};

use crate::chromosome::{ChromosomeSizes, MAX_POSITION};
use crate::config::AnnotationConfig;
use crate::error::Error;
use crate::gff::entry::{FeatureKind, FeatureRecord};
use crate::strand::Strand;

use super::operon::{self, OperonDecision};
use super::region::{AnnotationInterval, RegionKind};
use super::state::AutomatonState;

/// Intervals produced by one record, plus the state for the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub intervals: Vec<AnnotationInterval>,
    pub state: AutomatonState,
}

/// Boundary rule applied when a gene record arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneRule {
    /// Reverse gene followed by a forward gene: both promoters face the gap.
    HeadToHead,
    /// Reverse gene followed by a reverse gene: the earlier gene's promoter fills the gap
    /// unless the pair forms an operon.
    TailToTail,
    /// Forward gene followed by a forward gene: the later gene's promoter fills the gap
    /// unless the pair forms an operon.
    ForwardForward,
    /// Forward gene followed by a reverse gene: nothing regulatory in between.
    Convergent,
    /// First forward gene of a chromosome.
    FirstForward,
    /// First reverse gene of a chromosome.
    FirstReverse,
}

impl GeneRule {
    #[must_use]
    pub fn select(same_chromosome: bool, pending_reverse_gene: bool, strand: Strand) -> Self {
        match (same_chromosome, pending_reverse_gene, strand) {
            (true, true, Strand::Forward) => Self::HeadToHead,
            (true, true, Strand::Reverse) => Self::TailToTail,
            (true, false, Strand::Forward) => Self::ForwardForward,
            (true, false, Strand::Reverse) => Self::Convergent,
            (false, _, Strand::Forward) => Self::FirstForward,
            (false, _, Strand::Reverse) => Self::FirstReverse,
        }
    }
}

/// The transition function plus the read-only inputs it consults.
#[derive(Debug, Clone, Copy)]
pub struct Automaton<'a> {
    sizes: &'a ChromosomeSizes,
    config: &'a AnnotationConfig,
}

impl<'a> Automaton<'a> {
    pub fn new(sizes: &'a ChromosomeSizes, config: &'a AnnotationConfig) -> Self {
        Self { sizes, config }
    }

    /// Consume one record.
    ///
    /// Fails if the record's chromosome is not in the size table or a gene record
    /// carries no identifier.
    pub fn process(
        &self,
        record: &FeatureRecord,
        state: AutomatonState,
    ) -> Result<Transition, Error> {
        let length = coord(self.sizes.lookup(&record.chrom)?);
        match record.kind {
            FeatureKind::Gene => self.gene(record, length, state),
            // mRNA lines leave the state untouched so the next segment still sees
            // whatever preceded the transcript.
            FeatureKind::MRna => Ok(Transition {
                intervals: Vec::new(),
                state,
            }),
            FeatureKind::Cds | FeatureKind::Utr => Ok(segment(record, length, state)),
        }
    }

    /// Close the last chromosome of the scan and fill every chromosome that never
    /// carried a gene with one intergenic interval.
    ///
    /// `touched` holds the chromosomes on which a gene record was processed.
    pub fn finalize(
        &self,
        state: &AutomatonState,
        touched: &HashSet<String>,
    ) -> Result<Vec<AnnotationInterval>, Error> {
        let mut intervals = Vec::new();
        self.close_chromosome(state, &mut intervals)?;

        for chr in self.sizes.iter() {
            if touched.contains(&chr.name) || state.is_same_chromosome(&chr.name) {
                continue;
            }
            debug!("{} has no genes; filling 1-{} as intergenic", chr.name, chr.length);
            intervals.push(AnnotationInterval {
                chrom: chr.name.clone(),
                start: 1,
                end: chr.length,
                kind: RegionKind::Intergenic,
                gene_id: None,
            });
        }
        Ok(intervals)
    }

    fn gene(
        &self,
        record: &FeatureRecord,
        length: i64,
        mut state: AutomatonState,
    ) -> Result<Transition, Error> {
        let gene_id = record.gene_id.as_deref().ok_or_else(|| {
            Error::UnrecognizedGeneIdentifier(format!(
                "gene at {}:{}-{} has no identifier",
                record.chrom, record.start, record.end
            ))
        })?;

        let mut intervals = Vec::new();
        let same_chromosome = state.is_same_chromosome(&record.chrom);
        if !same_chromosome {
            self.close_chromosome(&state, &mut intervals)?;
        }

        let rule = GeneRule::select(same_chromosome, state.pending_reverse_gene, record.strand);
        debug!(
            "{rule:?} at gene {gene_id} ({}:{}-{} {})",
            record.chrom, record.start, record.end, record.strand
        );

        let promoter_size = coord(self.config.promoter_size);
        let anchor = if same_chromosome {
            coord(state.prev_end)
        } else {
            0
        };
        let start = coord(record.start);
        let gap = start - anchor - 1;
        let prev_gene = state.prev_gene_id.as_deref();
        let mut em = Emitter::new(&record.chrom, length, &mut intervals);
        if same_chromosome && state.pending_reverse_gene {
            cover_reverse_body(&mut em, &state);
        }

        let next_anchor = match rule {
            GeneRule::HeadToHead => {
                // Promoters keep their full size here even when they overlap each other.
                em.region(RegionKind::Tss, anchor - 1, anchor, prev_gene);
                em.region(
                    RegionKind::Promoter,
                    anchor + 1,
                    anchor + 1 + promoter_size,
                    prev_gene,
                );
                if start - 1 - promoter_size > anchor + 1 + promoter_size {
                    em.region(
                        RegionKind::Intergenic,
                        anchor + 1 + promoter_size,
                        start - 1 - promoter_size,
                        None,
                    );
                }
                em.region(
                    RegionKind::Promoter,
                    start - 1 - promoter_size,
                    start - 1,
                    Some(gene_id),
                );
                em.region(RegionKind::Tss, start, start + 1, Some(gene_id))
                    .unwrap_or(anchor)
            }
            GeneRule::TailToTail => {
                match self.operon(gap) {
                    OperonDecision::Merge => {
                        em.region(RegionKind::Intergenic, anchor + 1, start - 1, None);
                    }
                    OperonDecision::Separate => {
                        close_reverse_gene(&mut em, anchor, start - 1, prev_gene, promoter_size);
                    }
                }
                coord(record.end)
            }
            GeneRule::ForwardForward => match self.operon(gap) {
                OperonDecision::Merge => {
                    em.region(RegionKind::Intergenic, anchor + 1, start - 1, None);
                    anchor.max(start - 1)
                }
                OperonDecision::Separate => {
                    open_forward_gene(&mut em, anchor, start, gene_id, promoter_size)
                }
            },
            GeneRule::FirstForward => {
                open_forward_gene(&mut em, anchor, start, gene_id, promoter_size)
            }
            GeneRule::Convergent | GeneRule::FirstReverse => {
                em.region(RegionKind::Intergenic, anchor + 1, start - 1, None);
                coord(record.end)
            }
        };

        if !same_chromosome {
            state.prev_chrom = Some(record.chrom.clone());
        }
        state.prev_end = to_position(next_anchor);
        state.prev_kind = Some(match record.strand {
            Strand::Forward => RegionKind::Tss,
            Strand::Reverse => RegionKind::Intergenic,
        });
        state.prev_strand = record.strand;
        state.prev_gene_id = Some(gene_id.to_string());
        state.pending_reverse_gene = record.strand.is_reverse();
        state.reverse_body_start = record.strand.is_reverse().then_some(record.start);

        Ok(Transition { intervals, state })
    }

    fn operon(&self, gap: i64) -> OperonDecision {
        let decision = operon::decide(
            gap,
            self.config.operon_distance,
            self.config.operons_enabled,
        );
        if decision == OperonDecision::Merge {
            debug!("gap of {gap} bp below operon distance; merging");
        }
        decision
    }

    /// Emit whatever is still owed between the last gene of the previous chromosome
    /// and that chromosome's end.
    fn close_chromosome(
        &self,
        state: &AutomatonState,
        out: &mut Vec<AnnotationInterval>,
    ) -> Result<(), Error> {
        let Some(chrom) = state.prev_chrom.as_deref() else {
            return Ok(());
        };
        let length = coord(self.sizes.lookup(chrom)?);
        let anchor = coord(state.prev_end);
        let mut em = Emitter::new(chrom, length, out);

        if state.pending_reverse_gene {
            cover_reverse_body(&mut em, state);
            close_reverse_gene(
                &mut em,
                anchor,
                length,
                state.prev_gene_id.as_deref(),
                coord(self.config.promoter_size),
            );
        } else {
            em.region(RegionKind::Intergenic, anchor + 1, length, None);
        }
        Ok(())
    }
}

/// Gap before a forward gene that gets its own promoter: intergenic space up to a
/// full-size promoter, or a shrunk promoter filling the whole gap. Returns the TSS end.
///
/// Intergenic space shares its last base with the promoter, so a single-base span is
/// left to the promoter.
fn open_forward_gene(
    em: &mut Emitter<'_>,
    anchor: i64,
    start: i64,
    gene_id: &str,
    promoter_size: i64,
) -> i64 {
    let promoter_start = start - 1 - promoter_size;
    if promoter_start > anchor + 1 {
        em.region(RegionKind::Intergenic, anchor + 1, promoter_start, None);
        em.region(RegionKind::Promoter, promoter_start, start - 1, Some(gene_id));
    } else {
        em.region(RegionKind::Promoter, anchor + 1, start - 1, Some(gene_id));
    }
    em.region(RegionKind::Tss, start, start + 1, Some(gene_id))
        .unwrap_or(anchor)
}

/// TSS and promoter of a reverse gene ending at `anchor`, bounded by `limit`.
/// A promoter that does not fit, or leaves only the base it shares with the intergenic
/// span, is shrunk to `limit` and no intergenic space follows.
fn close_reverse_gene(
    em: &mut Emitter<'_>,
    anchor: i64,
    limit: i64,
    gene_id: Option<&str>,
    promoter_size: i64,
) {
    em.region(RegionKind::Tss, anchor - 1, anchor, gene_id);
    let promoter_end = anchor + 1 + promoter_size;
    if promoter_end < limit {
        em.region(RegionKind::Promoter, anchor + 1, promoter_end, gene_id);
        em.region(RegionKind::Intergenic, promoter_end, limit, None);
    } else {
        em.region(RegionKind::Promoter, anchor + 1, limit, gene_id);
    }
}

/// Body of a reverse gene that never received a CDS or UTR, up to its TSS.
fn cover_reverse_body(em: &mut Emitter<'_>, state: &AutomatonState) {
    if let Some(start) = state.reverse_body_start {
        em.region(
            RegionKind::Intergenic,
            coord(start),
            coord(state.prev_end) - 2,
            None,
        );
    }
}

/// CDS or UTR record: an intron for any gap after the previous segment, then the
/// segment itself.
fn segment(record: &FeatureRecord, length: i64, mut state: AutomatonState) -> Transition {
    let mut intervals = Vec::new();
    let gene_id = state.prev_gene_id.as_deref();
    let start = coord(record.start);
    let prev_end = coord(state.prev_end);
    let mut em = Emitter::new(&record.chrom, length, &mut intervals);

    if state
        .prev_kind
        .is_some_and(RegionKind::is_transcribed_segment)
        && prev_end < start - 1
    {
        em.region(RegionKind::Intron, prev_end + 1, start - 1, gene_id);
    }

    let kind = match record.kind {
        FeatureKind::Cds => Some(RegionKind::Cds),
        _ => classify_utr(state.prev_strand, state.prev_kind),
    };
    match kind {
        Some(kind) => {
            em.feature(kind, record.start, record.end, gene_id);
            state.prev_kind = Some(kind);
        }
        None => debug!(
            "UTR {}:{}-{} of {} has no 5'/3' context after {:?}; not emitted",
            record.chrom,
            record.start,
            record.end,
            gene_id.unwrap_or("."),
            state.prev_kind
        ),
    }
    state.prev_end = record.end;
    state.reverse_body_start = None;

    Transition { intervals, state }
}

/// Label a UTR from the gene's strand and the kind that precedes it.
///
/// Forward UTRs straight after the TSS are 5', after a CDS 3'. Reverse genes are read
/// right to left: a UTR after a CDS or any other UTR is 5', one opening the gene after
/// intergenic space is 3'. Anything else has no label.
#[must_use]
pub fn classify_utr(strand: Strand, prev_kind: Option<RegionKind>) -> Option<RegionKind> {
    match (strand, prev_kind?) {
        (Strand::Forward, RegionKind::Tss) => Some(RegionKind::FivePrimeUtr),
        (Strand::Forward, RegionKind::Cds) => Some(RegionKind::ThreePrimeUtr),
        (
            Strand::Reverse,
            RegionKind::Cds | RegionKind::FivePrimeUtr | RegionKind::ThreePrimeUtr,
        ) => Some(RegionKind::FivePrimeUtr),
        (Strand::Reverse, RegionKind::Intergenic) => Some(RegionKind::ThreePrimeUtr),
        _ => None,
    }
}

/// Appends intervals for one chromosome.
struct Emitter<'a> {
    chrom: &'a str,
    length: i64,
    out: &'a mut Vec<AnnotationInterval>,
}

impl<'a> Emitter<'a> {
    fn new(chrom: &'a str, length: i64, out: &'a mut Vec<AnnotationInterval>) -> Self {
        Self { chrom, length, out }
    }

    /// Push a derived region clamped to `[1, length]`; returns its end, or `None`
    /// when nothing is left after clamping.
    fn region(
        &mut self,
        kind: RegionKind,
        start: i64,
        end: i64,
        gene_id: Option<&str>,
    ) -> Option<i64> {
        let start = start.max(1);
        let end = end.min(self.length);
        if end < start {
            trace!("skipping empty {kind} {}:{start}-{end}", self.chrom);
            return None;
        }
        self.push(kind, to_position(start), to_position(end), gene_id);
        Some(end)
    }

    /// Push a CDS or UTR with the record's own coordinates.
    fn feature(&mut self, kind: RegionKind, start: u64, end: u64, gene_id: Option<&str>) {
        self.push(kind, start, end, gene_id);
    }

    fn push(&mut self, kind: RegionKind, start: u64, end: u64, gene_id: Option<&str>) {
        let interval = AnnotationInterval {
            chrom: self.chrom.to_string(),
            start,
            end,
            kind,
            gene_id: gene_id.map(str::to_string),
        };
        trace!("emit {interval}");
        self.out.push(interval);
    }
}

/// Signed working coordinate; positions past [`MAX_POSITION`] are pinned to it so span
/// arithmetic cannot overflow.
fn coord(position: u64) -> i64 {
    i64::try_from(position.min(MAX_POSITION)).unwrap_or(i64::MAX)
}

fn to_position(coord: i64) -> u64 {
    u64::try_from(coord).unwrap_or(0)
}
