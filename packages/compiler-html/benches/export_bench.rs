use blockforge_compiler_html::{compile_to_html, ExportOptions};
use blockforge_document::{create_element, Document, IdGenerator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn landing_page(sections: usize) -> Document {
    let mut ids = IdGenerator::from_seed("bench");
    let mut doc = Document::new(&mut ids);

    for _ in 0..sections {
        let mut row = create_element("row", &mut ids);
        let mut column = create_element("column", &mut ids);
        for kind in ["heading", "text", "image", "button"] {
            column.children.push(create_element(kind, &mut ids));
        }
        row.children.push(column);
        row.children.push(create_element("repeater", &mut ids));
        doc.root.children.push(row);
    }

    doc
}

fn export_small_document(c: &mut Criterion) {
    let doc = landing_page(3);
    let options = ExportOptions::default();

    c.bench_function("export_small_document", |b| {
        b.iter(|| compile_to_html(black_box(&doc), &options))
    });
}

fn export_large_document(c: &mut Criterion) {
    let doc = landing_page(50);
    let options = ExportOptions::default();

    c.bench_function("export_large_document", |b| {
        b.iter(|| compile_to_html(black_box(&doc), &options))
    });
}

fn export_minified(c: &mut Criterion) {
    let doc = landing_page(50);
    let options = ExportOptions {
        minify: true,
        inline_styles: false,
        ..Default::default()
    };

    c.bench_function("export_minified", |b| {
        b.iter(|| compile_to_html(black_box(&doc), &options))
    });
}

criterion_group!(
    benches,
    export_small_document,
    export_large_document,
    export_minified
);
criterion_main!(benches);
