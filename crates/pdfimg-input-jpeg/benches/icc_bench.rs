//! Benchmarks for ICC profile reassembly and JPEG header import.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfimg_core::plugin::ImageImport;
use pdfimg_input_jpeg::{extract_icc_profile, JpegImport};

/// Build a JPEG-like buffer with `chunks` ICC segments of `chunk_len` bytes each,
/// followed by `filler` bytes of entropy-coded noise.
fn make_jpeg(chunks: u8, chunk_len: usize, filler: usize) -> Vec<u8> {
    let mut profile: Vec<u8> = (0..chunks as usize * chunk_len).map(|i| i as u8).collect();
    if profile.len() >= 40 {
        profile[36..40].copy_from_slice(b"acsp");
    }

    let mut out = vec![0xFF, 0xD8];
    for (i, part) in profile.chunks(chunk_len).enumerate() {
        out.extend_from_slice(&[0xFF, 0xE2]);
        out.extend_from_slice(&((part.len() + 16) as u16).to_be_bytes());
        out.extend_from_slice(b"ICC_PROFILE\0");
        out.push(i as u8 + 1);
        out.push(chunks);
        out.extend_from_slice(part);
    }
    out.extend_from_slice(&[
        0xFF, 0xC0, 0x00, 0x11, 0x08, 0x04, 0x00, 0x03, 0x00, 0x03, 0x01, 0x22, 0x00, 0x02,
        0x11, 0x01, 0x03, 0x11, 0x01,
    ]);
    out.extend((0..filler).map(|i| (i * 7 % 255) as u8));
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

fn bench_extract_icc(c: &mut Criterion) {
    let mut group = c.benchmark_group("IccExtract");

    let small = make_jpeg(1, 3_000, 50_000);
    group.bench_function("one_chunk_50k", |b| {
        b.iter(|| black_box(extract_icc_profile(black_box(&small))))
    });

    let large = make_jpeg(8, 65_000, 2_000_000);
    group.bench_function("eight_chunks_2m", |b| {
        b.iter(|| black_box(extract_icc_profile(black_box(&large))))
    });

    let none = make_jpeg(0, 1, 2_000_000);
    group.bench_function("no_profile_2m", |b| {
        b.iter(|| black_box(extract_icc_profile(black_box(&none))))
    });

    group.finish();
}

fn bench_import(c: &mut Criterion) {
    let jpeg = make_jpeg(2, 4_000, 500_000);
    c.bench_function("JpegImport/import_500k", |b| {
        b.iter(|| black_box(JpegImport.import(black_box(jpeg.clone())).unwrap()))
    });
}

criterion_group!(benches, bench_extract_icc, bench_import);
criterion_main!(benches);
