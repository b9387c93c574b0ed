use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use regio::annotation::{Annotator, RegionKind};
use regio::bed::BedWriter;
use regio::chromosome::ChromosomeSizes;
use regio::cli;
use regio::config::AnnotationConfig;
use regio::gff::gene_id::{AttributeKeyExtractor, GeneIdExtractor, PatternExtractor};
use regio::gff::{self, read_features};

#[derive(Parser)]
#[command(
    name = "annotate",
    about = "Partition a genome into promoter, TSS, UTR, CDS, intron and intergenic regions"
)]
struct Cli {
    /// GFF/GTF file with gene, mRNA, CDS and UTR features (may be gzipped)
    gff: PathBuf,

    /// Tab-delimited chromosome sizes (name, length)
    sizes: PathBuf,

    /// Output file; defaults to stdout
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Promoter size in bases; shrunk where genes or chromosome ends leave less room
    #[arg(short = 'p', long = "promoter-size")]
    promoter_size: Option<u64>,

    /// Same-strand genes closer than this many bases form an operon
    #[arg(short = 'd', long = "operon-distance")]
    operon_distance: Option<u64>,

    /// Give every gene its own promoter, however close
    #[arg(long = "no-operons")]
    no_operons: bool,

    /// Regular expression extracting the gene identifier from column 9
    #[arg(long = "gene-pattern")]
    gene_pattern: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();
    cli::init_logging(cli_args.verbose);

    cli::banner("Genome Annotation");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = match &cli_args.config {
        Some(path) => AnnotationConfig::from_file(path)?,
        None => AnnotationConfig::default(),
    }
    .with_overrides(
        cli_args.promoter_size,
        cli_args.operon_distance,
        cli_args.no_operons,
    );
    config.validate()?;

    cli::kv("Features", &cli_args.gff.display().to_string());
    cli::kv("Sizes", &cli_args.sizes.display().to_string());
    cli::kv(
        "Output",
        &cli_args
            .out
            .as_ref()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string()),
    );
    cli::kv("Promoter size", &format!("{} bp", config.promoter_size));
    if config.operons_enabled {
        cli::kv("Operon distance", &format!("{} bp", config.operon_distance));
    } else {
        cli::kv("Operons", &"disabled".dimmed().to_string());
    }

    let extractor: Box<dyn GeneIdExtractor> = match &cli_args.gene_pattern {
        Some(pattern) => {
            cli::kv("Gene pattern", pattern);
            Box::new(PatternExtractor::new(pattern)?)
        }
        None => Box::new(AttributeKeyExtractor::default()),
    };

    eprintln!();

    // ── Chromosome Sizes ─────────────────────────────────
    cli::section("Chromosome Sizes");

    let sizes_reader = gff::open(&cli_args.sizes).with_context(|| {
        format!(
            "failed to open chromosome sizes: {}",
            cli_args.sizes.display()
        )
    })?;
    let sizes = ChromosomeSizes::from_reader(sizes_reader).with_context(|| {
        format!(
            "failed to read chromosome sizes: {}",
            cli_args.sizes.display()
        )
    })?;

    cli::kv("Chromosomes", &cli::format_count(sizes.len() as u64));
    cli::kv("Genome length", &format!("{} bp", cli::format_count(sizes.total_length())));

    eprintln!();

    // ── Annotation ───────────────────────────────────────
    cli::section("Annotation");

    let gff_reader = gff::open(&cli_args.gff)
        .with_context(|| format!("failed to open features: {}", cli_args.gff.display()))?;
    let records = read_features(gff_reader, extractor.as_ref());

    let writer: Box<dyn Write> = match &cli_args.out {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create output: {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut sink = BedWriter::new(BufWriter::new(writer));

    let stats = Annotator::new(&sizes, &config)
        .annotate(records, &mut sink)
        .with_context(|| format!("failed to annotate {}", cli_args.gff.display()))?;

    cli::kv("Records", &cli::format_count(stats.records as u64));
    cli::kv("Genes", &cli::format_count(stats.genes as u64));
    for kind in RegionKind::ALL {
        cli::kv(kind.label(), &cli::format_count(stats.kind_count(kind) as u64));
    }
    cli::kv(
        "Gene-free chromosomes",
        &cli::format_count(stats.chromosomes_filled as u64),
    );
    if stats.unlabelled_utrs > 0 {
        cli::warning(&format!(
            "{} UTR records had no 5'/3' context and were skipped",
            stats.unlabelled_utrs
        ));
    }
    cli::success(&format!(
        "{} intervals written",
        cli::format_count(stats.intervals as u64)
    ));

    cli::print_summary(start);
    Ok(())
}
