//! Image XObject emission.
//!
//! One call writes up to four indirect objects for a single image rendition,
//! in this order:
//!   1. ICC profile stream     (record has a profile)
//!   2. Indexed palette stream (Indexed colour space)
//!   3. Alternates array       (alternates present, not PDF/A)
//!   4. The image XObject itself
//! Each object takes the next number from the shared counter immediately
//! before its header is written, so numbers follow output order.

use pdfimg_core::counter::ObjectCounter;
use pdfimg_core::error::{ImageError, Result};
use pdfimg_core::image::{ColorSpace, ImageId, ImageRecord, ImageVariant};
use pdfimg_core::options::EmitOptions;
use pdfimg_core::plugin::Encryptor;
use pdfimg_utils::flate;

use crate::color::color_info;
use crate::transparency::color_key_ranges;
use crate::xobject::{xobject_name, XObjectMap};

/// Object numbers assigned during one emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmittedObjects {
    pub icc: Option<u64>,
    pub palette: Option<u64>,
    pub alternates: Option<u64>,
    pub image: u64,
}

/// Result of emitting one image rendition.
#[derive(Debug, Clone)]
pub struct Emission {
    /// XObject resource name of the image object.
    pub name: String,
    pub objects: EmittedObjects,
    /// Complete indirect objects, auxiliary objects first.
    pub blocks: Vec<Vec<u8>>,
}

impl Emission {
    /// All objects concatenated in emission order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.blocks.concat()
    }
}

pub struct ImageObjectEmitter<'a> {
    encryptor: &'a dyn Encryptor,
    options: EmitOptions,
}

impl<'a> ImageObjectEmitter<'a> {
    pub fn new(encryptor: &'a dyn Encryptor, options: EmitOptions) -> Self {
        Self { encryptor, options }
    }

    /// Emit `record` as rendition `variant` of image `id`.
    ///
    /// Alternates are resolved through `assigned`; an alternate that has no
    /// object number yet for the same variant is left out. Contract
    /// violations are reported before any object number is taken.
    pub fn emit(
        &self,
        id: ImageId,
        record: &ImageRecord,
        variant: ImageVariant,
        counter: &mut ObjectCounter,
        assigned: &XObjectMap,
    ) -> Result<Emission> {
        self.emit_with_soft_mask(id, record, variant, record.mask_object, counter, assigned)
    }

    /// Like [`emit`](Self::emit), with `soft_mask` used for `/SMask` instead of
    /// the record's own mask object.
    pub fn emit_with_soft_mask(
        &self,
        id: ImageId,
        record: &ImageRecord,
        variant: ImageVariant,
        soft_mask: Option<u64>,
        counter: &mut ObjectCounter,
        assigned: &XObjectMap,
    ) -> Result<Emission> {
        record.validate(id)?;

        // Compression is the only fallible step; finish it before numbering.
        let icc_stream = match record.icc.as_deref() {
            Some(icc) if !icc.is_empty() => Some(self.compress(id, icc)?),
            _ => None,
        };
        let palette_stream = match (record.color_space, record.palette.as_deref()) {
            (ColorSpace::Indexed, Some(pal)) => Some(self.compress(id, pal)?),
            _ => None,
        };

        let mut objects = EmittedObjects::default();
        let mut blocks = Vec::with_capacity(4);

        if let Some(stream) = icc_stream {
            let obj = counter.allocate();
            objects.icc = Some(obj);
            blocks.push(self.icc_object(obj, record, &stream));
        }

        if let Some(stream) = palette_stream {
            let obj = counter.allocate();
            objects.palette = Some(obj);
            blocks.push(self.flate_object(obj, "", &stream));
        }

        if !self.options.pdfa && !record.alternates.is_empty() {
            let obj = counter.allocate();
            objects.alternates = Some(obj);
            blocks.push(alternates_object(obj, record, variant, assigned));
        }

        let obj = counter.allocate();
        objects.image = obj;
        blocks.push(self.image_object(obj, record, &objects, soft_mask));

        let name = xobject_name(id, variant);
        log::debug!(
            "Emitted {} as object {} ({} object(s))",
            name,
            obj,
            blocks.len()
        );

        Ok(Emission {
            name,
            objects,
            blocks,
        })
    }

    fn compress(&self, id: ImageId, data: &[u8]) -> Result<Vec<u8>> {
        flate::compress(data, self.options.compression_level)
            .map_err(|e| ImageError::Compression(format!("image {}: {}", id, e)))
    }

    fn icc_object(&self, obj: u64, record: &ImageRecord, compressed: &[u8]) -> Vec<u8> {
        let prefix = format!(
            "/N {} /Alternate /{} ",
            record.channels, record.color_space
        );
        self.flate_object(obj, &prefix, compressed)
    }

    /// A `/FlateDecode` stream object; `prefix` holds any entries before `/Filter`.
    fn flate_object(&self, obj: u64, prefix: &str, compressed: &[u8]) -> Vec<u8> {
        let stream = self.encryptor.encrypt_string(compressed, obj);
        let dict = format!("{}/Filter /FlateDecode /Length {}", prefix, stream.len());
        stream_object(obj, &dict, &stream)
    }

    fn image_object(
        &self,
        obj: u64,
        record: &ImageRecord,
        objects: &EmittedObjects,
        soft_mask: Option<u64>,
    ) -> Vec<u8> {
        let filter = non_empty(record.filter.as_deref());

        let mut dict = format!(
            "<</Type /XObject /Subtype /Image /Width {} /Height {}",
            record.width, record.height
        );
        dict.push_str(&color_info(record, objects, soft_mask));

        let mut out = format!("{obj} 0 obj\n").into_bytes();

        if let Some(url) = non_empty(record.external_url.as_deref()) {
            dict.push_str(&format!(
                " /Length 0 /F << /FS /URL /F {} >>",
                self.encryptor.escape_data_string(url, obj)
            ));
            if let Some(f) = filter {
                dict.push_str(&format!(" /FFilter /{f}"));
            }
            dict.push_str(" >> stream\nendstream\n");
            out.extend_from_slice(dict.as_bytes());
        } else {
            if let Some(f) = filter {
                dict.push_str(&format!(" /Filter /{f}"));
            }
            if let Some(parms) = non_empty(record.parms.as_deref()) {
                dict.push(' ');
                dict.push_str(parms);
            }
            let ranges = color_key_ranges(record);
            if !ranges.is_empty() {
                dict.push_str(&format!(" /Mask [ {ranges}]"));
            }

            let stream = self.encryptor.encrypt_string(&record.data, obj);
            dict.push_str(&format!(" /Length {}>> stream\n", stream.len()));
            out.extend_from_slice(dict.as_bytes());
            out.extend_from_slice(&stream);
            out.extend_from_slice(b"\nendstream\n");
        }

        out.extend_from_slice(b"endobj\n");
        out
    }
}

/// `[ << /Image n 0 R /DefaultForPrinting b >> ... ]` for the alternates that
/// already have an object number for `variant`.
fn alternates_object(
    obj: u64,
    record: &ImageRecord,
    variant: ImageVariant,
    assigned: &XObjectMap,
) -> Vec<u8> {
    let mut out = format!("{obj} 0 obj\n[");
    for alt in &record.alternates {
        match assigned.get(alt.image, variant) {
            Some(image_obj) => out.push_str(&format!(
                " << /Image {} 0 R /DefaultForPrinting {} >>",
                image_obj, alt.default_for_printing
            )),
            None => log::debug!(
                "Alternate image {} not emitted yet, skipping",
                xobject_name(alt.image, variant)
            ),
        }
    }
    out.push_str(" ]\nendobj\n");
    out.into_bytes()
}

fn stream_object(obj: u64, dict: &str, stream: &[u8]) -> Vec<u8> {
    let mut out = format!("{obj} 0 obj\n<<{dict}>> stream\n").into_bytes();
    out.extend_from_slice(stream);
    out.extend_from_slice(b"\nendstream\nendobj\n");
    out
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
