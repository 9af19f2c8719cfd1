//! Benchmarks for the brush editor.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};

use cutout::editor::DEFAULT_MAX_DIMENSION;
use cutout::{BrushMode, History, Point, RasterBrushEditor};

fn loaded_editor(width: u32, height: u32) -> RasterBrushEditor {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([90, 120, 150, 255])));
    let mut editor = RasterBrushEditor::new();
    editor.load_image(&image, DEFAULT_MAX_DIMENSION).unwrap();
    editor
}

// -- Loading --

fn bench_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("loading");
    group.sample_size(20);

    let large = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4000, 2000, Rgba([1, 2, 3, 255])));
    group.bench_function("load_downscale_4000x2000", |b| {
        b.iter(|| {
            let mut editor = RasterBrushEditor::new();
            editor.load_image(black_box(&large), DEFAULT_MAX_DIMENSION).unwrap();
            editor
        })
    });

    group.finish();
}

// -- Strokes --

fn bench_strokes(c: &mut Criterion) {
    let mut group = c.benchmark_group("strokes");

    let mut editor = loaded_editor(2000, 1000);
    editor.set_brush_size(30.0).unwrap();

    group.bench_function("erase_stroke_20_segments", |b| {
        b.iter(|| {
            editor.set_mode(BrushMode::Erase);
            editor.begin_stroke(Point::new(100.0, 500.0));
            for i in 1..=20 {
                editor.continue_stroke(black_box(Point::new(100.0 + i as f32 * 80.0, 500.0)));
            }
            editor.end_stroke();
        })
    });

    group.bench_function("restore_stroke_20_segments", |b| {
        b.iter(|| {
            editor.set_mode(BrushMode::Restore);
            editor.begin_stroke(Point::new(100.0, 500.0));
            for i in 1..=20 {
                editor.continue_stroke(black_box(Point::new(100.0 + i as f32 * 80.0, 500.0)));
            }
            editor.end_stroke();
        })
    });

    group.finish();
}

// -- History --

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    let snapshot = RgbaImage::new(2000, 1000);
    group.bench_function("commit_full_window", |b| {
        let mut history = History::new(10);
        b.iter(|| history.commit(black_box(snapshot.clone())))
    });

    let mut editor = loaded_editor(2000, 1000);
    for i in 0..9 {
        editor.begin_stroke(Point::new(i as f32 * 100.0, 10.0));
        editor.end_stroke();
    }
    group.bench_function("undo_redo", |b| {
        b.iter(|| {
            editor.undo();
            editor.redo();
        })
    });

    group.finish();
}

// -- Export --

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    group.sample_size(20);

    let editor = loaded_editor(1000, 500);
    group.bench_function("export_png_1000x500", |b| b.iter(|| editor.export_png().unwrap()));

    group.finish();
}

criterion_group!(benches, bench_loading, bench_strokes, bench_history, bench_export);
criterion_main!(benches);
