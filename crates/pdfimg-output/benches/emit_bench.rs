//! Benchmarks for image object emission.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfimg_core::counter::ObjectCounter;
use pdfimg_core::image::{ColorSpace, ImageRecord, ImageVariant};
use pdfimg_core::options::EmitOptions;
use pdfimg_core::plugin::NoEncryption;
use pdfimg_output::{ImageObjectEmitter, ImageRegistry, SourceImage, XObjectMap};

fn fake_icc(len: usize) -> Vec<u8> {
    let mut p: Vec<u8> = (0..len).map(|i| (i % 97) as u8).collect();
    p[36..40].copy_from_slice(b"acsp");
    p
}

fn bench_single_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("Emit");
    let emitter = ImageObjectEmitter::new(&NoEncryption, EmitOptions::default());

    let plain = ImageRecord::new(1024, 768, 8, ColorSpace::DeviceRGB, vec![0x5A; 200_000])
        .with_filter("DCTDecode");
    group.bench_function("rgb_200k", |b| {
        b.iter(|| {
            let mut counter = ObjectCounter::new(0);
            black_box(
                emitter
                    .emit(1, &plain, ImageVariant::Main, &mut counter, &XObjectMap::new())
                    .unwrap(),
            )
        })
    });

    let with_icc = plain.clone().with_icc(fake_icc(500_000));
    group.bench_function("rgb_200k_icc_500k", |b| {
        b.iter(|| {
            let mut counter = ObjectCounter::new(0);
            black_box(
                emitter
                    .emit(1, &with_icc, ImageVariant::Main, &mut counter, &XObjectMap::new())
                    .unwrap(),
            )
        })
    });

    let indexed = ImageRecord::new(256, 256, 8, ColorSpace::Indexed, vec![3; 65_536])
        .with_palette((0..768).map(|i| i as u8).collect())
        .with_transparency(vec![(0, 255), (1, 0), (2, 255)]);
    group.bench_function("indexed_palette_256", |b| {
        b.iter(|| {
            let mut counter = ObjectCounter::new(0);
            black_box(
                emitter
                    .emit(1, &indexed, ImageVariant::Main, &mut counter, &XObjectMap::new())
                    .unwrap(),
            )
        })
    });

    group.finish();
}

fn bench_registry(c: &mut Criterion) {
    let mut reg = ImageRegistry::new();
    for i in 0..100 {
        let record = ImageRecord::new(64, 64, 8, ColorSpace::DeviceGray, vec![i as u8; 4096]);
        reg.add(format!("img{}.jpg", i), SourceImage::new(record));
    }
    let emitter = ImageObjectEmitter::new(&NoEncryption, EmitOptions::default());

    c.bench_function("Registry/emit_all_100", |b| {
        b.iter(|| {
            let mut counter = ObjectCounter::new(10);
            black_box(reg.emit_all(&emitter, &mut counter).unwrap())
        })
    });
}

criterion_group!(benches, bench_single_image, bench_registry);
criterion_main!(benches);
