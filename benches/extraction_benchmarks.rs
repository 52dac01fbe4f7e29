//! Performance benchmarks for mailsift components.
//!
//! Covers candidate matching, the full ingest pipeline (match, canonicalize,
//! validate, dedup, group), domain filtering and export rendering.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use mailsift::domains::DomainIndex;
use mailsift::output::render;
use mailsift::pattern::count_candidates;
use mailsift::{EmailAddress, ExtractionSession, OutputKind, Separator, is_valid_email};

const SAMPLE_TEXT: &str = r#"From: Alice Example <Alice@Example.com>
To: bob@mail.example.org, "Carol Q." <carol.q+news@lists.example.net>
Cc: ops@[192.168.0.1], billing@shop.co.uk
Subject: Quarterly numbers

Hi all, please reply to reports@corp.example.com or REPORTS@corp.example.com.
Broken ones like bad@@example.com and trailing@example.com. should be handled.
"#;

/// Text with `n` lines, each holding two addresses across a spread of domains.
fn generate_text(n: usize) -> String {
    let mut text = String::with_capacity(n * 80);
    for i in 0..n {
        text.push_str(&format!(
            "line {i}: contact user{i}@host{}.example{}.com or Admin{}@Site{}.org today\n",
            i % 7,
            i % 13,
            i % 50,
            i % 11
        ));
    }
    text
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    group.bench_function("sample_text", |b| {
        b.iter(|| count_candidates(black_box(SAMPLE_TEXT)))
    });

    let no_match = "lorem ipsum dolor sit amet ".repeat(2_000);
    group.bench_function("no_candidates_54k", |b| {
        b.iter(|| count_candidates(black_box(&no_match)))
    });

    group.bench_function("validate_address", |b| {
        b.iter(|| is_valid_email(black_box("first.last+tag@mail.example.co.uk")))
    });

    group.finish();
}

fn bench_ingest(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");

    for &lines in &[10usize, 100, 1_000] {
        let text = generate_text(lines);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("lines", lines), &text, |b, text| {
            b.iter(|| ExtractionSession::new().ingest_text(black_box(text)))
        });
    }

    group.finish();
}

fn bench_domain_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("domains");
    let addresses: Vec<EmailAddress> = (0..2_000)
        .filter_map(|i| EmailAddress::parse(&format!("u{i}@h{}.d{}.example.com", i % 5, i % 40)))
        .collect();

    group.bench_function("build_index_2000", |b| {
        b.iter(|| black_box(addresses.iter().cloned().collect::<DomainIndex>()))
    });

    let index: DomainIndex = addresses.iter().cloned().collect();
    group.bench_function("sorted_by_size", |b| {
        b.iter(|| black_box(index.sorted_by_size().len()))
    });
    group.bench_function("narrow", |b| {
        b.iter(|| {
            let mut narrowed = index.clone();
            black_box(narrowed.narrow("example"))
        })
    });

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let list = ExtractionSession::new()
        .ingest_text(&generate_text(500))
        .addresses()
        .to_strings();

    for kind in [
        OutputKind::Text,
        OutputKind::Csv,
        OutputKind::Json,
        OutputKind::Pdf,
        OutputKind::Docx,
    ] {
        group.bench_with_input(BenchmarkId::new("format", kind.name()), &list, |b, list| {
            b.iter(|| render(kind, black_box(list), &Separator::Newline, "bench"))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_matching,
    bench_ingest,
    bench_domain_operations,
    bench_rendering
);

criterion_main!(benches);
