//! Colour-key masking (`/Mask [ min max ... ]`).

use pdfimg_core::image::{ColorSpace, ImageRecord};

/// Build the contents of the `/Mask` array for a record's colour key.
///
/// Device colour spaces mark every fully transparent component index.
/// Indexed images can only express a binary key: if any entry is partially
/// transparent the key is dropped entirely, otherwise only the first fully
/// transparent index is kept. An empty string means no `/Mask` entry.
pub fn color_key_ranges(record: &ImageRecord) -> String {
    let key = match record.transparency.as_deref() {
        Some(key) if !key.is_empty() => key,
        _ => return String::new(),
    };

    let mut ranges = String::new();
    if record.color_space != ColorSpace::Indexed {
        for &(idx, val) in key {
            if val == 0 {
                ranges.push_str(&format!("{idx} {idx} "));
            }
        }
        return ranges;
    }

    let max_val = record.max_sample_value();
    for &(idx, val) in key {
        if val != 0 && val != max_val {
            log::debug!(
                "Dropping colour key: index {} has partial alpha {} (max {})",
                idx,
                val,
                max_val
            );
            return String::new();
        }
        if ranges.is_empty() && val == 0 {
            ranges.push_str(&format!("{idx} {idx} "));
        }
    }
    ranges
}
