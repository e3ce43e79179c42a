// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for review rendering in the braillight-document crate.
// Renders a long braille page with many protected spans, pristine and edited.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use braillight_document::{EditableDocument, ProtectedSpan};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Build a ~30 KB braille page with a protected phrase every few hundred cells.
fn long_page() -> (String, Vec<ProtectedSpan>) {
    let block = "⠼⠚⠉⠦⠄⠫⠠⠴⠺⠀⠉⠗⠬⠶⠮⠀⠔⠔⠘⠥⠈⠕⠢⠢⠧⠀⠠⠕⠂⠮⠀⠊⠪⠐⠎⠉⠀";
    let text = block.repeat(300);
    let spans = ProtectedSpan::find_all(&text, "⠠⠕⠂⠮⠀⠊⠪⠐⠎⠉");
    (text, spans)
}

fn bench_render_view(c: &mut Criterion) {
    let (text, spans) = long_page();
    let pristine = EditableDocument::new(text.clone(), spans.clone()).expect("valid spans");
    let mut edited = EditableDocument::new(text, spans).expect("valid spans");
    edited.commit_edit("⠿");

    c.bench_function("render_view pristine (300 blocks)", |b| {
        b.iter(|| black_box(pristine.render_view()));
    });

    c.bench_function("render_view edited (300 blocks)", |b| {
        b.iter(|| black_box(edited.render_view()));
    });
}

criterion_group!(benches, bench_render_view);
criterion_main!(benches);
