//! XObject names and the object numbers behind them.

use std::collections::BTreeMap;

use pdfimg_core::image::{ImageId, ImageVariant};

/// Resource name of an image rendition: `IMG<variant><id>`.
pub fn xobject_name(id: ImageId, variant: ImageVariant) -> String {
    format!("IMG{}{}", variant.tag(), id)
}

/// Object numbers assigned to emitted image renditions.
///
/// Consumed by the page content writer (`/IMG1 Do`) and the resources
/// dictionary writer (`/IMG1 12 0 R`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XObjectMap {
    objects: BTreeMap<(ImageId, ImageVariant), u64>,
}

impl XObjectMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ImageId, variant: ImageVariant, object: u64) {
        self.objects.insert((id, variant), object);
    }

    /// Object number of a rendition, if it has been emitted.
    pub fn get(&self, id: ImageId, variant: ImageVariant) -> Option<u64> {
        self.objects.get(&(id, variant)).copied()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// `(name, object number)` pairs ordered by image id, then variant.
    pub fn iter(&self) -> impl Iterator<Item = (String, u64)> + '_ {
        self.objects
            .iter()
            .map(|(&(id, variant), &obj)| (xobject_name(id, variant), obj))
    }

    /// Entries for an `/XObject` resources dictionary, one per line.
    pub fn resource_entries(&self) -> String {
        self.iter()
            .map(|(name, obj)| format!(" /{name} {obj} 0 R\n"))
            .collect()
    }

    /// Content stream operator painting a rendition.
    pub fn draw_operator(id: ImageId, variant: ImageVariant) -> String {
        format!("/{} Do", xobject_name(id, variant))
    }
}
