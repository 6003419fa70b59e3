use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use markup_grader::{scan_tags, validate_document};
use std::hint::black_box;

/// Generate HTML with specific validation scenarios
fn generate_validation_content(elements: usize, scenario: &str) -> String {
    let mut content = String::from("<!DOCTYPE html>\n<html>\n<body>\n");

    match scenario {
        "all_valid" => {
            for i in 0..elements {
                content.push_str(&format!(
                    "<div class=\"row\" id=\"row-{}\"><p>Item {}</p><img src=\"{}.png\" alt=\"\"></div>\n",
                    i, i, i
                ));
            }
        }
        "duplicate_ids" => {
            for i in 0..elements {
                content.push_str(&format!("<section id=\"s{}\"><p>x</p></section>\n", i % 10));
            }
        }
        "mismatched" => {
            for i in 0..elements {
                if i % 3 == 0 {
                    content.push_str("<div><span>oops</div>\n"); // Cascades into unclosed tags
                } else {
                    content.push_str("<div><span>ok</span></div>\n");
                }
            }
        }
        "beginner_mess" => {
            for i in 0..elements {
                match i % 6 {
                    0 => content.push_str("<img src=\"cat.png\">\n"), // Missing alt
                    1 => content.push_str("<a>click</a>\n"),           // Missing href
                    2 => content.push_str("<p>a < b and 3<4</p>\n"),  // Stray brackets
                    3 => content.push_str("</li>\n"),                  // Unexpected closer
                    4 => content.push_str("<!-- <p> commented -->\n"),
                    5 => content.push_str("<ul><li>one<li>two</ul>\n"),
                    _ => unreachable!(),
                }
            }
        }
        _ => {
            for i in 0..elements {
                content.push_str(&format!("<p>{}</p>\n", i));
            }
        }
    }

    content.push_str("</body>\n</html>\n");
    content
}

/// Benchmark validation with different error densities
fn bench_validation_error_density(c: &mut Criterion) {
    let scenarios = vec![
        ("all_valid", "Well-formed markup"),
        ("duplicate_ids", "90% duplicate ids"),
        ("mismatched", "33% mismatched closers"),
        ("beginner_mess", "Assorted beginner mistakes"),
    ];

    let mut group = c.benchmark_group("validation_error_density");

    for (scenario, _description) in scenarios {
        let content = generate_validation_content(2000, scenario);

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("scenario", scenario),
            &content,
            |b, content| {
                b.iter(|| {
                    let result = validate_document(black_box(content));
                    black_box(result)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark validation scalability with different document sizes
fn bench_validation_scalability(c: &mut Criterion) {
    let sizes = vec![100, 1_000, 10_000];

    let mut group = c.benchmark_group("validation_scalability");

    for &size in &sizes {
        let content = generate_validation_content(size, "beginner_mess");

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("size", size), &content, |b, content| {
            b.iter(|| black_box(validate_document(black_box(content))))
        });
    }

    group.finish();
}

/// Benchmark the tag scanner on its own
fn bench_tag_scanning(c: &mut Criterion) {
    let content = generate_validation_content(5000, "all_valid");

    let mut group = c.benchmark_group("tag_scanning");
    group.throughput(Throughput::Bytes(content.len() as u64));
    group.bench_function("scan_all_valid", |b| {
        b.iter(|| black_box(scan_tags(black_box(&content)).count()))
    });
    group.finish();
}

criterion_group!(
    validation_benches,
    bench_validation_error_density,
    bench_validation_scalability,
    bench_tag_scanning
);

criterion_main!(validation_benches);
