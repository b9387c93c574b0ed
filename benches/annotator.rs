use std::io::{self, Cursor};

use criterion::{Criterion, criterion_group, criterion_main};

use regio::annotation::Annotator;
use regio::bed::BedWriter;
use regio::chromosome::ChromosomeSizes;
use regio::config::AnnotationConfig;
use regio::gff::gene_id::AttributeKeyExtractor;
use regio::gff::read_features;

const CHROMOSOMES: usize = 4;
const GENES_PER_CHROMOSOME: u64 = 5_000;
const GENE_SPACING: u64 = 2_000;

/// Builds a GFF3 text with alternating-strand genes, each with two exons.
fn synthetic_gff() -> String {
    let mut gff = String::from("##gff-version 3\n");
    for c in 0..CHROMOSOMES {
        for g in 0..GENES_PER_CHROMOSOME {
            let start = 500 + g * GENE_SPACING;
            let end = start + 1_200;
            let strand = if g % 3 == 0 { '-' } else { '+' };
            let id = format!("c{c}g{g}");
            gff.push_str(&format!(
                "chr{c}\tbench\tgene\t{start}\t{end}\t.\t{strand}\t.\tID=gene-{id}\n\
                 chr{c}\tbench\tmRNA\t{start}\t{end}\t.\t{strand}\t.\tID=rna-{id};Parent=gene-{id}\n\
                 chr{c}\tbench\tCDS\t{start}\t{}\t.\t{strand}\t0\tParent=rna-{id}\n\
                 chr{c}\tbench\tCDS\t{}\t{end}\t.\t{strand}\t0\tParent=rna-{id}\n",
                start + 400,
                start + 800,
            ));
        }
    }
    gff
}

fn synthetic_sizes() -> ChromosomeSizes {
    let length = 1_000 + GENES_PER_CHROMOSOME * GENE_SPACING;
    let names: Vec<String> = (0..CHROMOSOMES + 2).map(|c| format!("chr{c}")).collect();
    ChromosomeSizes::from_pairs(names.iter().map(|n| (n.as_str(), length))).unwrap()
}

fn bench_annotate(c: &mut Criterion) {
    let gff = synthetic_gff();
    let sizes = synthetic_sizes();
    let config = AnnotationConfig::default();
    let extractor = AttributeKeyExtractor::default();

    c.bench_function("annotate (20k genes, 6 chromosomes)", |b| {
        b.iter(|| {
            let records = read_features(Cursor::new(gff.as_bytes()), &extractor);
            let mut sink = BedWriter::new(io::sink());
            let stats = Annotator::new(&sizes, &config)
                .annotate(records, &mut sink)
                .unwrap();
            assert_eq!(stats.chromosomes_filled, 2);
        });
    });
}

fn bench_parse(c: &mut Criterion) {
    let gff = synthetic_gff();
    let extractor = AttributeKeyExtractor::default();

    c.bench_function("read_features (80k records)", |b| {
        b.iter(|| {
            let n = read_features(Cursor::new(gff.as_bytes()), &extractor)
                .map(Result::unwrap)
                .count();
            assert_eq!(n, CHROMOSOMES * GENES_PER_CHROMOSOME as usize * 4);
        });
    });
}

criterion_group!(benches, bench_annotate, bench_parse);
criterion_main!(benches);
