//! Core data model for embedding raster images as PDF image XObjects.
//!
//! Every importer produces an [`image::ImageRecord`]; every emitter consumes one.
//! Object numbers are handed out by an [`counter::ObjectCounter`] owned by the caller.

pub mod counter;
pub mod error;
pub mod image;
pub mod options;
pub mod plugin;
