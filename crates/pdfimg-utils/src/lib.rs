//! Shared low-level helpers: byte access, zlib compression, PDF string escaping.

pub mod bytes;
pub mod flate;
pub mod pdfstr;
