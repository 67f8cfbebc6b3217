//! Benchmarks for docxgen assembly and serialization.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docxgen::{Article, AssemblerOptions, DocumentAssembler, WriteOptions};

/// Creates an assembler with the given number of paragraph/table pairs.
fn create_document(sections: usize) -> DocumentAssembler {
    let mut asm = DocumentAssembler::new();
    for i in 0..sections {
        asm.append_heading(1, format!("{}. SECTION", i + 1)).unwrap();
        asm.append_text(
            "Normal",
            "Benchmark body text for docxgen serialization measurement.",
        )
        .unwrap();
        asm.append_table(
            "Normal",
            format!("TABLE {}", i + 1),
            ["A", "B", "C"],
            [["1", "2", "3"], ["4", "5", "6"]],
        )
        .unwrap();
        asm.append_equation("E=mc^2", i as u32 + 1).unwrap();
    }
    asm
}

/// Benchmark assembling the built-in article from its manifest.
fn bench_article_assembly(c: &mut Criterion) {
    let article = Article::smeci().unwrap();

    c.bench_function("assemble_smeci", |b| {
        b.iter(|| {
            black_box(&article)
                .assemble(AssemblerOptions::default())
                .unwrap()
        });
    });
}

/// Benchmark package serialization at various sizes.
fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    for sections in [1, 10, 50].iter() {
        let asm = create_document(*sections);
        let deflated = WriteOptions::default();
        let stored = WriteOptions::new().stored();

        group.bench_function(format!("{}_sections_deflated", sections), |b| {
            b.iter(|| asm.to_bytes(black_box(&deflated)).unwrap());
        });
        group.bench_function(format!("{}_sections_stored", sections), |b| {
            b.iter(|| asm.to_bytes(black_box(&stored)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark reading a generated package back.
fn bench_read_back(c: &mut Criterion) {
    let bytes = create_document(10)
        .to_bytes(&WriteOptions::default())
        .unwrap();

    c.bench_function("read_10_sections", |b| {
        b.iter(|| docxgen::read_bytes(black_box(&bytes)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_article_assembly,
    bench_serialization,
    bench_read_back,
);
criterion_main!(benches);
