//! Options controlling image object emission.

use serde::{Deserialize, Serialize};

use crate::error::{ImageError, Result};

/// All options controlling how image objects are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    // -- General --
    pub verbose: u8,

    // -- Output --
    /// PDF/A mode: suppresses constructs the archival profile forbids.
    pub pdfa: bool,
    /// zlib level (0-9) for ICC profile and palette streams.
    pub compression_level: u32,
    /// Object number already in use when emission starts.
    pub start_object: u64,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            verbose: 0,
            pdfa: false,
            compression_level: pdfimg_utils::flate::DEFAULT_LEVEL,
            start_object: 0,
        }
    }
}

impl EmitOptions {
    /// Reject values no emitter can honour.
    pub fn validate(&self) -> Result<()> {
        if self.compression_level > 9 {
            return Err(ImageError::Config(format!(
                "compression_level must be 0-9, got {}",
                self.compression_level
            )));
        }
        Ok(())
    }
}
