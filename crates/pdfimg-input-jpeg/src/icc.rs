//! Reassembly of ICC profiles embedded in JPEG `APP2` segments.
//!
//! A profile larger than one marker segment is split into chunks. Each chunk
//! starts with the 12-byte identifier `ICC_PROFILE` plus a terminator byte
//! (a space, or NUL as most encoders write it), a 1-based sequence number and
//! the total chunk count, followed by the profile bytes.

use std::collections::BTreeMap;

use pdfimg_utils::bytes;

/// Identifier at the start of every ICC `APP2` payload, minus its terminator.
pub const ICC_PREFIX: &[u8; 11] = b"ICC_PROFILE";

/// Canonical identifier: prefix and space terminator.
pub const ICC_MARKER: &[u8; 12] = b"ICC_PROFILE ";

/// Identifier as written by libjpeg and most other encoders.
pub const ICC_MARKER_NUL: &[u8; 12] = b"ICC_PROFILE\0";

/// Identifier plus the sequence number and chunk count bytes.
const CHUNK_HEADER_LEN: usize = 14;

/// Bytes counted by the segment length field besides the payload: the length
/// field itself and the chunk header.
const SEGMENT_OVERHEAD: usize = 16;

/// Offset of the `acsp` profile file signature in the ICC header.
const SIGNATURE_OFFSET: usize = 36;

/// Scan `jpeg` for ICC chunks and return the reassembled profile.
///
/// Chunks are ordered by their sequence number, not by their position in the
/// file. A later chunk with the same sequence number replaces an earlier one.
/// Returns `None` when there are no chunks or the result is not a valid
/// profile; malformed length fields never cause out-of-bounds reads.
pub fn extract_icc_profile(jpeg: &[u8]) -> Option<Vec<u8>> {
    let mut chunks: BTreeMap<u8, &[u8]> = BTreeMap::new();
    let mut offset = 0;

    while let Some(pos) = bytes::find(jpeg, ICC_PREFIX, offset) {
        if !matches!(jpeg.get(pos + ICC_PREFIX.len()).copied(), Some(b' ' | b'\0')) {
            offset = pos + 1;
            continue;
        }
        let len = pos
            .checked_sub(2)
            .and_then(|p| bytes::be_u16(jpeg, p))
            .map_or(0, |seg| usize::from(seg).saturating_sub(SEGMENT_OVERHEAD));
        let seq = jpeg.get(pos + 12).copied().unwrap_or(0).max(1);
        let start = pos + CHUNK_HEADER_LEN;

        chunks.insert(seq - 1, bytes::slice_clamped(jpeg, start, len));
        offset = start + len;
    }

    if chunks.is_empty() {
        return None;
    }
    log::debug!("Found {} ICC_PROFILE chunk(s)", chunks.len());

    let profile: Vec<u8> = chunks.into_values().flatten().copied().collect();
    if !has_profile_signature(&profile) {
        log::warn!(
            "Discarding embedded ICC profile ({} bytes): missing 'acsp' signature",
            profile.len()
        );
        return None;
    }

    Some(profile)
}

/// Whether `profile` carries the `acsp` file signature at its fixed offset.
pub fn has_profile_signature(profile: &[u8]) -> bool {
    profile.get(SIGNATURE_OFFSET..SIGNATURE_OFFSET + 4) == Some(b"acsp".as_slice())
}
