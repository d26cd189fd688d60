//! Image registry: owns the distinct source images of a document and emits
//! each of them once.

use std::collections::HashMap;

use pdfimg_core::counter::ObjectCounter;
use pdfimg_core::error::Result;
use pdfimg_core::image::{ImageId, ImageRecord, ImageVariant};

use crate::emitter::ImageObjectEmitter;
use crate::xobject::XObjectMap;

/// A source image and the renditions derived from it.
///
/// Images with an alpha channel carry a `mask` (the alpha samples as a
/// DeviceGray image) and a `plain` rendition (colour samples only). The plain
/// rendition, when present, is written instead of the main record.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub main: ImageRecord,
    pub mask: Option<ImageRecord>,
    pub plain: Option<ImageRecord>,
}

impl SourceImage {
    pub fn new(main: ImageRecord) -> Self {
        Self {
            main,
            mask: None,
            plain: None,
        }
    }

    pub fn with_mask(mut self, mask: ImageRecord) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_plain(mut self, plain: ImageRecord) -> Self {
        self.plain = Some(plain);
        self
    }

    fn validate(&self, id: ImageId) -> Result<()> {
        self.main.validate(id)?;
        if let Some(mask) = &self.mask {
            mask.validate(id)?;
        }
        if let Some(plain) = &self.plain {
            plain.validate(id)?;
        }
        Ok(())
    }
}

/// The emitted image objects of a document.
#[derive(Debug, Clone, Default)]
pub struct ImagesBlock {
    /// All image-related indirect objects, ready to be appended to the file body.
    pub bytes: Vec<u8>,
    pub xobjects: XObjectMap,
}

/// Distinct images keyed by a caller-chosen source key (e.g. file path).
#[derive(Debug, Default)]
pub struct ImageRegistry {
    images: Vec<SourceImage>,
    by_key: HashMap<String, ImageId>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image under `key`. Adding a key that is already registered
    /// returns the existing id and drops `source`.
    pub fn add(&mut self, key: impl Into<String>, source: SourceImage) -> ImageId {
        let key = key.into();
        if let Some(&id) = self.by_key.get(&key) {
            log::debug!("Reusing image {} for repeated source {}", id, key);
            return id;
        }
        self.images.push(source);
        let id = self.images.len() as ImageId;
        self.by_key.insert(key, id);
        id
    }

    pub fn id_for(&self, key: &str) -> Option<ImageId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: ImageId) -> Option<&SourceImage> {
        let idx = (id as usize).checked_sub(1)?;
        self.images.get(idx)
    }

    pub fn get_mut(&mut self, id: ImageId) -> Option<&mut SourceImage> {
        let idx = (id as usize).checked_sub(1)?;
        self.images.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Iterate `(id, image)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ImageId, &SourceImage)> {
        self.images
            .iter()
            .enumerate()
            .map(|(i, img)| (i as ImageId + 1, img))
    }

    /// Emit every registered image in registration order.
    ///
    /// For each image the mask rendition is written first and becomes the
    /// `/SMask` of the rendition that follows it. Alternates can only point at
    /// images registered earlier. All records are validated before the first
    /// object number is taken, so a bad image yields an error and no output.
    pub fn emit_all(
        &self,
        emitter: &ImageObjectEmitter<'_>,
        counter: &mut ObjectCounter,
    ) -> Result<ImagesBlock> {
        for (id, image) in self.iter() {
            image.validate(id)?;
        }

        let mut block = ImagesBlock::default();
        for (id, image) in self.iter() {
            let mut soft_mask = None;

            if let Some(mask) = &image.mask {
                let e = emitter.emit(id, mask, ImageVariant::Mask, counter, &block.xobjects)?;
                block.xobjects.insert(id, ImageVariant::Mask, e.objects.image);
                block.bytes.extend_from_slice(&e.to_bytes());
                soft_mask = Some(e.objects.image);
            }

            let (record, variant) = match &image.plain {
                Some(plain) => (plain, ImageVariant::Plain),
                None => (&image.main, ImageVariant::Main),
            };
            let soft_mask = soft_mask.or(record.mask_object);
            let e = emitter.emit_with_soft_mask(
                id,
                record,
                variant,
                soft_mask,
                counter,
                &block.xobjects,
            )?;
            block.xobjects.insert(id, variant, e.objects.image);
            block.bytes.extend_from_slice(&e.to_bytes());
        }

        log::info!(
            "Emitted {} image(s) as {} XObject(s); last object number {}",
            self.len(),
            block.xobjects.len(),
            counter.current()
        );
        Ok(block)
    }
}
