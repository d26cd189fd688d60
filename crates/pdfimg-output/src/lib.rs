//! PDF image object output: writes image XObjects and their auxiliary
//! objects (ICC profile, palette, alternates) as indirect objects.
//!
//! The surrounding document writer owns the object counter, the cross-reference
//! table and the page content; this crate produces the image objects and the
//! `IMG…` name → object number map those writers need.

pub mod color;
pub mod emitter;
pub mod registry;
pub mod transparency;
pub mod xobject;

pub use emitter::{Emission, EmittedObjects, ImageObjectEmitter};
pub use registry::{ImageRegistry, ImagesBlock, SourceImage};
pub use xobject::{xobject_name, XObjectMap};
