//! Image records: everything the emitter needs to know about one source image.

use std::fmt;

use crate::error::{ImageError, Result};

/// Identifier of an image inside a registry. Also the numeric suffix of its
/// XObject name.
pub type ImageId = u32;

/// Colour space of the stored samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRGB,
    DeviceCMYK,
    Indexed,
}

impl ColorSpace {
    /// The PDF name, without the leading slash.
    pub fn pdf_name(self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
            ColorSpace::Indexed => "Indexed",
        }
    }

    /// Number of components per sample.
    pub fn channels(self) -> u8 {
        match self {
            ColorSpace::DeviceGray | ColorSpace::Indexed => 1,
            ColorSpace::DeviceRGB => 3,
            ColorSpace::DeviceCMYK => 4,
        }
    }

    /// Device colour space for a component count (1, 3 or 4).
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(ColorSpace::DeviceGray),
            3 => Some(ColorSpace::DeviceRGB),
            4 => Some(ColorSpace::DeviceCMYK),
            _ => None,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pdf_name())
    }
}

/// Which rendition of a source image is being written.
///
/// A source with an alpha channel is split into a `Mask` (the alpha samples)
/// and a `Plain` rendition (the colour samples); everything else is `Main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageVariant {
    Main,
    Mask,
    Plain,
}

impl ImageVariant {
    /// Tag inserted into the XObject name between `IMG` and the image id.
    pub fn tag(self) -> &'static str {
        match self {
            ImageVariant::Main => "",
            ImageVariant::Mask => "mask",
            ImageVariant::Plain => "plain",
        }
    }
}

/// Reference to an alternate rendition of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternate {
    pub image: ImageId,
    pub default_for_printing: bool,
}

/// One source image, ready to be written as a PDF image XObject.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub width: u32,
    pub height: u32,
    pub bits_per_component: u8,
    pub color_space: ColorSpace,
    pub channels: u8,
    /// Stream payload, already encoded with `filter` (if any).
    pub data: Vec<u8>,
    /// Filter name without the leading slash, e.g. `DCTDecode`.
    pub filter: Option<String>,
    /// Extra dictionary entries appended verbatim, e.g. `/DecodeParms <<...>>`.
    pub parms: Option<String>,
    pub icc: Option<Vec<u8>>,
    /// Packed RGB triplets for `Indexed` images.
    pub palette: Option<Vec<u8>>,
    /// Colour key: (component index, value) pairs in source order.
    pub transparency: Option<Vec<(u32, u32)>>,
    pub external_url: Option<String>,
    pub alternates: Vec<Alternate>,
    /// Soft mask object number, assigned by the registry.
    pub mask_object: Option<u64>,
}

impl ImageRecord {
    pub fn new(
        width: u32,
        height: u32,
        bits_per_component: u8,
        color_space: ColorSpace,
        data: Vec<u8>,
    ) -> Self {
        Self {
            width,
            height,
            bits_per_component,
            color_space,
            channels: color_space.channels(),
            data,
            filter: None,
            parms: None,
            icc: None,
            palette: None,
            transparency: None,
            external_url: None,
            alternates: Vec::new(),
            mask_object: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_parms(mut self, parms: impl Into<String>) -> Self {
        self.parms = Some(parms.into());
        self
    }

    pub fn with_channels(mut self, channels: u8) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_icc(mut self, icc: Vec<u8>) -> Self {
        self.icc = Some(icc);
        self
    }

    pub fn with_palette(mut self, palette: Vec<u8>) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn with_transparency(mut self, key: Vec<(u32, u32)>) -> Self {
        self.transparency = Some(key);
        self
    }

    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.external_url = Some(url.into());
        self
    }

    pub fn with_alternate(mut self, image: ImageId, default_for_printing: bool) -> Self {
        self.alternates.push(Alternate {
            image,
            default_for_printing,
        });
        self
    }

    pub fn with_mask_object(mut self, object: u64) -> Self {
        self.mask_object = Some(object);
        self
    }

    /// Number of palette entries (0 when there is no palette).
    pub fn palette_entries(&self) -> usize {
        self.palette.as_ref().map_or(0, |p| p.len() / 3)
    }

    /// Largest sample value representable with `bits_per_component`.
    pub fn max_sample_value(&self) -> u32 {
        (1u32 << self.bits_per_component.min(31)) - 1
    }

    /// Check the caller contract. `id` is only used to label the error.
    pub fn validate(&self, id: ImageId) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::invalid(
                id,
                format!("dimensions must be positive, got {}x{}", self.width, self.height),
            ));
        }
        if self.bits_per_component == 0 || self.bits_per_component > 16 {
            return Err(ImageError::invalid(
                id,
                format!(
                    "bits per component must be in 1..=16, got {}",
                    self.bits_per_component
                ),
            ));
        }
        if self.channels == 0 {
            return Err(ImageError::invalid(id, "channel count must be at least 1"));
        }
        if self.color_space == ColorSpace::Indexed {
            match self.palette.as_deref() {
                None | Some([]) => {
                    return Err(ImageError::invalid(id, "indexed image without a palette"));
                }
                Some(pal) if pal.len() % 3 != 0 => {
                    return Err(ImageError::invalid(
                        id,
                        format!("palette length {} is not a multiple of 3", pal.len()),
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
