//! Benchmarks for annotation parsing and token alignment

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use trellis_core::{parse_annotation, AlignRules, Aligner, SurfaceToken};

const CLAUSE: &str = "NP-SUBJ person_kvk_nf person_kvk_nf person_kvk_nf /NP-SUBJ \
    VP so_et_fh_gm_nt_p3 NP-OBJ no_et_gr_kk_þf /NP-OBJ /VP \
    ADVP ADVP-DATE-REL ao ao /ADVP-DATE-REL /ADVP";

const WORDS: &str = "Ingibjörg Sólrún Gísladóttir hittir hópinn á morgun";

/// Build a sentence of `clauses` coordinated clauses with its annotation
fn generate(clauses: usize) -> (String, String) {
    let annotation = std::iter::repeat(format!("IP {CLAUSE} /IP"))
        .take(clauses)
        .collect::<Vec<_>>()
        .join(" ");
    let sentence = std::iter::repeat(WORDS)
        .take(clauses)
        .collect::<Vec<_>>()
        .join(" ");
    (format!("P {annotation} /P"), sentence)
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_annotation");

    for size in [1, 10, 100].iter() {
        let (annotation, _) = generate(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &annotation, |b, text| {
            b.iter(|| parse_annotation(black_box(text)));
        });
    }

    group.finish();
}

fn benchmark_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align");
    let rules = AlignRules::embedded();

    for size in [1, 10, 100].iter() {
        let (annotation, sentence) = generate(*size);
        let tree = parse_annotation(&annotation).unwrap();
        let tokens = SurfaceToken::words(&sentence);

        group.bench_with_input(BenchmarkId::from_parameter(size), &tree, |b, tree| {
            b.iter(|| {
                Aligner::new(rules)
                    .with_sentence(&sentence)
                    .align(black_box(tree.clone()), &tokens)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_align);
criterion_main!(benches);
