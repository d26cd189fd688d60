use thiserror::Error;

use crate::image::ImageId;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Invalid image {id}: {reason}")]
    InvalidImage { id: ImageId, reason: String },

    #[error("JPEG error: {0}")]
    Jpeg(String),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ImageError {
    /// Contract violation on a specific image record.
    pub fn invalid(id: ImageId, reason: impl Into<String>) -> Self {
        ImageError::InvalidImage {
            id,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ImageError::invalid(3, "palette is empty");
        assert_eq!(err.to_string(), "Invalid image 3: palette is empty");
        assert!(matches!(err, ImageError::InvalidImage { id: 3, .. }));

        let err = ImageError::Compression("image 1: broken pipe".into());
        assert_eq!(err.to_string(), "Compression error: image 1: broken pipe");
    }
}
