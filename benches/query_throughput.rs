//! Query throughput benchmarks
//!
//! Measures path parsing and evaluation over generated documents of
//! increasing size.
//!
//! Run benchmarks: `cargo bench --bench query_throughput`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use xp_path::parse_path;
use xp_source::XmlDocument;

/// Generate a document with `lists` lists of ten items each.
fn generate_document(lists: usize) -> String {
    let mut xml = String::from("<html><body>");
    for i in 0..lists {
        xml.push_str(&format!("<ul id=\"u{}\">", i));
        for j in 0..10 {
            let class = if j % 2 == 0 { "even" } else { "odd" };
            xml.push_str(&format!(
                "<li class=\"{}\"><a href=\"/{}/{}\">item</a></li>",
                class, i, j
            ));
        }
        xml.push_str("</ul>");
    }
    xml.push_str("</body></html>");
    xml
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_path");
    for path in ["//li", "/html/body/ul/li[3]", "//ul[@id='u7']//a[@href='/7/3']"] {
        group.bench_with_input(BenchmarkId::from_parameter(path), path, |b, path| {
            b.iter(|| parse_path(black_box(path)))
        });
    }
    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    for lists in [10, 100, 1000] {
        let xml = generate_document(lists);
        let doc = XmlDocument::parse(&xml).expect("generated document is well-formed");
        group.throughput(Throughput::Elements((lists * 10) as u64));

        for path in ["//li", "//ul/li[1]", "//li[@class='odd']/a"] {
            let location_path = parse_path(path).expect("valid path");
            group.bench_with_input(BenchmarkId::new(path, lists), &location_path, |b, p| {
                b.iter(|| p.select(black_box(doc.root_node())).len())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_select);
criterion_main!(benches);
