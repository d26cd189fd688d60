//! Seams to external collaborators: stream encryption and image importers.

use crate::error::Result;
use crate::image::ImageRecord;

/// Per-object stream encryption, supplied by the document writer.
pub trait Encryptor {
    /// Encrypt a stream payload belonging to `object_number`.
    fn encrypt_string(&self, data: &[u8], object_number: u64) -> Vec<u8>;

    /// Encrypt `text` for `object_number` and return it as a complete PDF
    /// literal string, parentheses included.
    fn escape_data_string(&self, text: &str, object_number: u64) -> String;
}

/// Encryptor for unencrypted documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEncryption;

impl Encryptor for NoEncryption {
    fn encrypt_string(&self, data: &[u8], _object_number: u64) -> Vec<u8> {
        data.to_vec()
    }

    fn escape_data_string(&self, text: &str, _object_number: u64) -> String {
        pdfimg_utils::pdfstr::literal_string(text)
    }
}

/// Image importer: turns the raw bytes of a file into an [`ImageRecord`].
pub trait ImageImport: Send + Sync {
    /// Human-readable name of this importer.
    fn name(&self) -> &str;

    /// Lowercase file extensions this importer handles.
    fn supported_extensions(&self) -> &[&str];

    /// Build a record from the raw file contents.
    fn import(&self, raw: Vec<u8>) -> Result<ImageRecord>;

    /// Whether this importer handles files with extension `ext`.
    fn handles_extension(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_encryption_passthrough() {
        let enc = NoEncryption;
        assert_eq!(enc.encrypt_string(b"\x00stream\xff", 4), b"\x00stream\xff".to_vec());
        assert_eq!(
            enc.escape_data_string("http://x/(1).jpg", 4),
            r"(http://x/\(1\).jpg)"
        );
    }
}
