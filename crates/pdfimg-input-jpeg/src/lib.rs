//! JPEG importer: passes the DCT stream through untouched and reads only the
//! header fields a PDF image dictionary needs.
//!
//! Pixel data is never decoded: the JPEG file itself becomes the `/DCTDecode`
//! stream. The frame header supplies width, height, precision and component
//! count, and an embedded ICC profile is reassembled from its `APP2` chunks.

pub mod icc;

use pdfimg_core::error::{ImageError, Result};
use pdfimg_core::image::{ColorSpace, ImageRecord};
use pdfimg_core::plugin::ImageImport;
use pdfimg_utils::bytes;

pub use icc::extract_icc_profile;

/// Stream filter for baseline and progressive JPEG data.
pub const DCT_FILTER: &str = "DCTDecode";

pub struct JpegImport;

impl ImageImport for JpegImport {
    fn name(&self) -> &str {
        "JPEG Import"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["jpg", "jpeg", "jpe", "jfif"]
    }

    fn import(&self, raw: Vec<u8>) -> Result<ImageRecord> {
        let frame = read_frame_header(&raw)?;
        let color_space = ColorSpace::from_channels(frame.components).ok_or_else(|| {
            ImageError::Jpeg(format!(
                "unsupported number of components: {}",
                frame.components
            ))
        })?;
        log::debug!(
            "JPEG frame: {}x{}, {} bit, {} component(s)",
            frame.width,
            frame.height,
            frame.precision,
            frame.components
        );

        let icc = extract_icc_profile(&raw);
        let mut record = ImageRecord::new(
            u32::from(frame.width),
            u32::from(frame.height),
            frame.precision,
            color_space,
            raw,
        )
        .with_filter(DCT_FILTER);
        if let Some(profile) = icc {
            log::debug!("Embedded ICC profile: {} bytes", profile.len());
            record = record.with_icc(profile);
        }
        Ok(record)
    }
}

/// Fields of a JPEG start-of-frame segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub precision: u8,
    pub height: u16,
    pub width: u16,
    pub components: u8,
}

/// Walk the marker segments up to the first start-of-frame and parse it.
pub fn read_frame_header(data: &[u8]) -> Result<FrameHeader> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return Err(ImageError::Jpeg("missing SOI marker".into()));
    }

    let mut pos = 2;
    loop {
        // Skip to the next marker, tolerating fill bytes.
        while data.get(pos) == Some(&0xFF) && data.get(pos + 1) == Some(&0xFF) {
            pos += 1;
        }
        if data.get(pos) != Some(&0xFF) {
            return Err(ImageError::Jpeg(format!("expected marker at offset {}", pos)));
        }
        let marker = *data
            .get(pos + 1)
            .ok_or_else(|| ImageError::Jpeg("truncated before start of frame".into()))?;
        pos += 2;

        match marker {
            // Standalone markers carry no length field.
            0x01 | 0xD0..=0xD7 => continue,
            0xD9 | 0xDA => {
                return Err(ImageError::Jpeg("no start-of-frame marker before scan data".into()));
            }
            _ => {}
        }

        let seg_len = bytes::be_u16(data, pos)
            .ok_or_else(|| ImageError::Jpeg("truncated segment length".into()))?;
        let seg_len = usize::from(seg_len);
        if seg_len < 2 {
            return Err(ImageError::Jpeg(format!("invalid segment length {}", seg_len)));
        }

        if is_start_of_frame(marker) {
            let seg = data
                .get(pos + 2..pos + seg_len)
                .filter(|s| s.len() >= 6)
                .ok_or_else(|| ImageError::Jpeg("truncated start-of-frame segment".into()))?;
            return Ok(FrameHeader {
                precision: seg[0],
                height: u16::from_be_bytes([seg[1], seg[2]]),
                width: u16::from_be_bytes([seg[3], seg[4]]),
                components: seg[5],
            });
        }

        pos += seg_len;
    }
}

/// SOF0-SOF15, excluding DHT (C4), JPG (C8) and DAC (CC).
fn is_start_of_frame(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::tests::{app2_chunk, fake_profile};

    use image::codecs::jpeg::JpegEncoder;
    use image::ExtendedColorType;

    fn encode_jpeg(width: u32, height: u32, color: ExtendedColorType) -> Vec<u8> {
        let channels = match color {
            ExtendedColorType::L8 => 1,
            _ => 3,
        };
        let pixels = vec![128u8; (width * height) as usize * channels];
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, 85)
            .encode(&pixels, width, height, color)
            .unwrap();
        buf
    }

    /// Insert `segment` right after the SOI marker.
    fn splice_after_soi(jpeg: &[u8], segment: &[u8]) -> Vec<u8> {
        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(segment);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_import_rgb_jpeg() {
        let jpeg = encode_jpeg(40, 30, ExtendedColorType::Rgb8);
        let record = JpegImport.import(jpeg.clone()).unwrap();

        assert_eq!(record.width, 40);
        assert_eq!(record.height, 30);
        assert_eq!(record.bits_per_component, 8);
        assert_eq!(record.color_space, ColorSpace::DeviceRGB);
        assert_eq!(record.channels, 3);
        assert_eq!(record.filter.as_deref(), Some("DCTDecode"));
        assert_eq!(record.data, jpeg);
        assert!(record.icc.is_none());
    }

    #[test]
    fn test_import_gray_jpeg() {
        let jpeg = encode_jpeg(8, 8, ExtendedColorType::L8);
        let record = JpegImport.import(jpeg).unwrap();
        assert_eq!(record.color_space, ColorSpace::DeviceGray);
        assert_eq!(record.channels, 1);
    }

    #[test]
    fn test_import_with_icc_profile() {
        let profile = fake_profile(200);
        let (a, b) = profile.split_at(120);
        let jpeg = encode_jpeg(16, 16, ExtendedColorType::Rgb8);
        let jpeg = splice_after_soi(&jpeg, &app2_chunk(2, 2, b));
        let jpeg = splice_after_soi(&jpeg, &app2_chunk(1, 2, a));

        let record = JpegImport.import(jpeg).unwrap();
        assert_eq!(record.icc, Some(profile));
        assert_eq!(record.width, 16);
    }

    #[test]
    fn test_read_frame_header_synthetic_cmyk() {
        let data = [
            0xFF, 0xD8, // SOI
            0xFF, 0xE0, 0x00, 0x04, 0xAA, 0xBB, // APP0, 2 payload bytes
            0xFF, 0xFF, // fill byte
            0xC2, 0x00, 0x0B, 0x08, 0x00, 0x20, 0x00, 0x10, 0x04, 0x00, 0x00, 0x00, // SOF2
        ];
        let frame = read_frame_header(&data).unwrap();
        assert_eq!(
            frame,
            FrameHeader {
                precision: 8,
                height: 32,
                width: 16,
                components: 4,
            }
        );
    }

    #[test]
    fn test_dht_is_not_a_frame() {
        assert!(is_start_of_frame(0xC0));
        assert!(is_start_of_frame(0xC2));
        assert!(!is_start_of_frame(0xC4));
        assert!(!is_start_of_frame(0xCC));
        assert!(!is_start_of_frame(0xDB));
    }

    #[test]
    fn test_rejects_non_jpeg() {
        let err = JpegImport.import(b"\x89PNG\r\n".to_vec()).unwrap_err();
        assert!(err.to_string().contains("SOI"));
    }

    #[test]
    fn test_rejects_scan_before_frame() {
        let data = [0xFF, 0xD8, 0xFF, 0xDA, 0x00, 0x02];
        assert!(read_frame_header(&data).is_err());
    }

    #[test]
    fn test_rejects_truncated_frame() {
        let data = [0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08];
        assert!(read_frame_header(&data).is_err());
    }

    #[test]
    fn test_handles_extension() {
        assert!(JpegImport.handles_extension("JPG"));
        assert!(JpegImport.handles_extension("jpeg"));
        assert!(!JpegImport.handles_extension("png"));
    }
}
