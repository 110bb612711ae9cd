use criterion::{Criterion, black_box, criterion_group, criterion_main};
use bar_label::render_code;
use bar_label::utils::binarization::{adaptive_binarize, otsu_binarize, threshold_binarize};

fn bench_otsu_binarize_small(c: &mut Criterion) {
    let gray = vec![128u8; 100 * 100];
    c.bench_function("otsu_binarize_100x100", |b| {
        b.iter(|| otsu_binarize(black_box(&gray), black_box(100), black_box(100)))
    });
}

fn bench_otsu_binarize_medium(c: &mut Criterion) {
    let gray = vec![128u8; 640 * 480];
    c.bench_function("otsu_binarize_640x480", |b| {
        b.iter(|| otsu_binarize(black_box(&gray), black_box(640), black_box(480)))
    });
}

fn bench_adaptive_binarize_medium(c: &mut Criterion) {
    let gray = vec![128u8; 640 * 480];
    c.bench_function("adaptive_binarize_640x480", |b| {
        b.iter(|| {
            adaptive_binarize(
                black_box(&gray),
                black_box(640),
                black_box(480),
                black_box(11),
                black_box(2),
            )
        })
    });
}

fn bench_adaptive_binarize_label(c: &mut Criterion) {
    let Ok(img) = render_code("LC254HkQw9+/") else {
        return;
    };
    let (w, h) = (img.width() as usize, img.height() as usize);
    c.bench_function("adaptive_binarize_rendered_label", |b| {
        b.iter(|| {
            adaptive_binarize(
                black_box(img.as_raw()),
                black_box(w),
                black_box(h),
                black_box(11),
                black_box(2),
            )
        })
    });
}

fn bench_threshold_binarize_medium(c: &mut Criterion) {
    let gray = vec![128u8; 640 * 480];
    c.bench_function("threshold_binarize_640x480", |b| {
        b.iter(|| {
            threshold_binarize(
                black_box(&gray),
                black_box(640),
                black_box(480),
                black_box(128),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_otsu_binarize_small,
    bench_otsu_binarize_medium,
    bench_adaptive_binarize_medium,
    bench_adaptive_binarize_label,
    bench_threshold_binarize_medium
);
criterion_main!(benches);
