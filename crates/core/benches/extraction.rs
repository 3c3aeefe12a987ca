use criterion::{Criterion, black_box, criterion_group, criterion_main};
use doclens_core::{HtmlPage, TextStats, extract_document, extract_suggestions, locate_region};

const URL: &str = "https://help.example.com/hc/en-us/articles/1";

fn fixture() -> String {
    std::fs::read_to_string("../../tests/fixtures/help_center_article.html").unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let html = fixture();

    c.bench_function("parse", |b| b.iter(|| HtmlPage::parse(black_box(&html))));
}

fn bench_region(c: &mut Criterion) {
    let html = fixture();
    let page = HtmlPage::parse(&html);

    c.bench_function("locate_region", |b| b.iter(|| locate_region(black_box(&page)).is_ok()));
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = fixture();

    c.bench_function("full_extraction", |b| b.iter(|| extract_document(black_box(&html), URL)));
}

fn bench_textstats(c: &mut Criterion) {
    let doc = extract_document(&fixture(), URL).unwrap();
    let text = doc.excerpt(2000).to_string();

    let mut group = c.benchmark_group("textstats");
    group.bench_function("from_text", |b| b.iter(|| TextStats::from_text(black_box(&text))));
    group.bench_function("grades", |b| {
        b.iter(|| {
            let stats = TextStats::from_text(black_box(&text));
            (stats.flesch_kincaid_grade(), stats.gunning_fog())
        })
    });
    group.finish();
}

fn bench_suggestions(c: &mut Criterion) {
    let assessment = "Overall the article reads well.\n".repeat(20)
        + "1. Consider adding a troubleshooting section for common errors.\n\
           2. Add a code sample for the iOS variant of this flow.\n\
           3. Replace passive voice in the prerequisites list.\n";

    c.bench_function("extract_suggestions", |b| b.iter(|| extract_suggestions(black_box(&assessment))));
}

criterion_group!(
    benches,
    bench_parse,
    bench_region,
    bench_full_extraction,
    bench_textstats,
    bench_suggestions
);
criterion_main!(benches);
