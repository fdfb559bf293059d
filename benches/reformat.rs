//! Benchmarks for the reformatting pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use instant_markup::{Gallery, GalleryImage, MediaLibrary, Reformatter, ResolvedImage};

/// Build an article body with quotes, images and shortcodes.
fn sample_article(sections: usize) -> String {
    let mut html = String::new();
    for i in 0..sections {
        html.push_str(&format!(
            "<h2>Section {i}</h2><p>Lead paragraph with <em>emphasis</em> and <a href=\"/p/{i}\">a link</a>.</p>"
        ));
        html.push_str(&format!(
            "<blockquote><p>Quoted <span>text</span> number {i}.</p><cite>Speaker {i}</cite></blockquote>"
        ));
        html.push_str(&format!("<div><img src=\"/img/{i}.jpg\" alt=\"{i}\"></div>"));
        html.push_str(&format!("[caption id=\"attachment_{}\"]<img src=\"old.jpg\"> Old[/caption]", i % 10));
        if i % 5 == 0 {
            html.push_str("[gallery ids=\"1,2,3,4\"][custom-gallery id=\"g\" title=\"Photos\"]");
        }
    }
    html
}

fn sample_library() -> MediaLibrary {
    let mut library = MediaLibrary::new();
    for id in 0..10 {
        library.insert_image(
            id,
            ResolvedImage::new(format!("https://cdn.example.com/{id}.jpg"))
                .with_caption(format!("<figcaption>Image {id}</figcaption>")),
        );
    }
    library.insert_gallery(
        "g",
        Gallery::new(
            (0..8)
                .map(|i| GalleryImage::new(format!("https://img.example.com/{i}.jpg")).with_caption("Caption"))
                .collect(),
        ),
    );
    library
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_expand_shortcodes(c: &mut Criterion) {
    let reformatter = Reformatter::from_library(sample_library());
    let article = sample_article(50);
    c.bench_function("expand_shortcodes", |b| {
        b.iter(|| reformatter.expand_shortcodes(&article));
    });
}

fn bench_reformat(c: &mut Criterion) {
    let reformatter = Reformatter::from_library(sample_library());
    let article = sample_article(50);
    c.bench_function("reformat", |b| {
        b.iter(|| reformatter.reformat(&article));
    });
}

fn bench_reformat_plain(c: &mut Criterion) {
    let reformatter = Reformatter::default();
    let article = "<p>Plain paragraph without any markup of interest.</p>".repeat(500);
    c.bench_function("reformat_plain", |b| {
        b.iter(|| reformatter.reformat(&article));
    });
}

criterion_group!(
    benches,
    bench_expand_shortcodes,
    bench_reformat,
    bench_reformat_plain,
);
criterion_main!(benches);
