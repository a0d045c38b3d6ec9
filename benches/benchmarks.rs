use criterion::{black_box, criterion_group, criterion_main, Criterion};
use webpage_mirror::{filename_for_url, rewrite_css, rewrite_document};

fn bench_filename_generation(c: &mut Criterion) {
    let urls = [
        "https://example.com/style.min.css?ver=1.0.0",
        "https://cdn.example.org/fonts/roboto-v20-latin-regular.woff2",
        "https://example.com/images/hero-banner@2x.jpg",
        "https://example.com/api/resource",
    ];

    c.bench_function("filename_for_url", |b| {
        b.iter(|| {
            for url in &urls {
                black_box(filename_for_url(black_box(url)));
            }
        });
    });
}

fn bench_css_rewrite(c: &mut Criterion) {
    let css = concat!(
        "@import url(\"reset.css\");\n",
        "@import 'theme.css?v=2';\n",
        "body { background: url('bg.jpg') no-repeat fixed; }\n",
        ".icon { cursor: url(pointer.cur); }\n",
        "@font-face { src: url(fonts/roboto.woff2) format('woff2'); }\n",
        ".inline { background: url(data:image/gif;base64,R0lGODlh); }\n",
    );

    c.bench_function("rewrite_css", |b| {
        b.iter(|| rewrite_css(black_box(css), "https://example.com/index.html"));
    });
}

fn bench_document_rewrite(c: &mut Criterion) {
    let html = concat!(
        "<html><head>",
        "<link rel=\"stylesheet\" href=\"/style.css\">",
        "<link rel=\"stylesheet\" href=\"/theme.css\">",
        "<script src=\"/script.js\"></script>",
        "<script src=\"/utils.js\"></script>",
        "</head><body>",
        "<img src=\"/logo.png\" alt=\"Logo\">",
        "<img src=\"/banner.jpg\" alt=\"Banner\">",
        "<div style=\"background-image:url('/hero.jpg')\"></div>",
        "<a href=\"/about\">About</a>",
        "<a href=\"/contact\">Contact</a>",
        "</body></html>",
    );

    c.bench_function("rewrite_document", |b| {
        b.iter(|| rewrite_document(black_box(html), "https://example.com/"));
    });
}

criterion_group!(
    benches,
    bench_filename_generation,
    bench_css_rewrite,
    bench_document_rewrite
);
criterion_main!(benches);
