//! Colour and mask entries of the image dictionary.

use pdfimg_core::image::{ColorSpace, ImageRecord};

use crate::emitter::EmittedObjects;

/// Dictionary entries from `/ColorSpace` through `/Alternates`, each with a
/// leading space.
///
/// The colour space is taken from the first of: the ICC profile object, the
/// palette object, the record's device colour space.
pub fn color_info(record: &ImageRecord, objects: &EmittedObjects, soft_mask: Option<u64>) -> String {
    let mut out = String::new();

    if let Some(icc) = objects.icc {
        out.push_str(&format!(" /ColorSpace [/ICCBased {icc} 0 R]"));
    } else if let Some(pal) = objects.palette {
        // hival: highest valid palette index
        let hival = record.palette_entries() as i64 - 1;
        out.push_str(&format!(" /ColorSpace [/Indexed /DeviceRGB {hival} {pal} 0 R]"));
    } else {
        out.push_str(&format!(" /ColorSpace /{}", record.color_space));
    }

    if record.color_space == ColorSpace::DeviceCMYK {
        out.push_str(" /Decode [1 0 1 0 1 0 1 0]");
    }
    out.push_str(&format!(" /BitsPerComponent {}", record.bits_per_component));

    if let Some(mask) = soft_mask {
        out.push_str(&format!(" /SMask {mask} 0 R"));
    }
    if let Some(alt) = objects.alternates {
        out.push_str(&format!(" /Alternates {alt} 0 R"));
    }
    out
}
