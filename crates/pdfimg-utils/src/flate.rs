//! zlib compression for `/FlateDecode` streams.

use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Default zlib level, matching the reference encoder default.
pub const DEFAULT_LEVEL: u32 = 6;

/// Compress `data` into a zlib stream at the given level (clamped to 0-9).
pub fn compress(data: &[u8], level: u32) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level.min(9)));
    encoder.write_all(data)?;
    let out = encoder.finish()?;
    log::trace!("Compressed {} -> {} bytes", data.len(), out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    #[test]
    fn test_compress_is_zlib() {
        let input = b"0123456789".repeat(20);
        let packed = compress(&input, DEFAULT_LEVEL).unwrap();
        // zlib header, deflate with 32K window
        assert_eq!(packed[0], 0x78);
        assert!(packed.len() < input.len());

        let mut unpacked = Vec::new();
        ZlibDecoder::new(&packed[..]).read_to_end(&mut unpacked).unwrap();
        assert_eq!(unpacked, input);
    }

    #[test]
    fn test_level_clamped() {
        let packed = compress(b"abc", 42).unwrap();
        assert!(!packed.is_empty());
    }
}
