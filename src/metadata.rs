//! Texture metadata capability for the metadata generation mode.
//!
//! The metadata mode would build each descriptor from properties read out
//! of the texture itself (alpha channel, dominant colour) instead of from a
//! template. No extractor exists yet; selecting the mode fails up front.

use crate::error::{Result, VmtError};
use std::path::Path;

/// Name reported when the metadata mode is requested
pub const METADATA_MODE: &str = "metadata";

/// Properties a descriptor could be derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureMetadata {
    /// Image format carries an alpha channel (would map to `$translucent`)
    pub has_alpha: bool,
    /// Hue of the reflectivity vector, in `[0, 1]`
    pub dominant_hue: f32,
    /// Average reflectivity stored in the texture header
    pub reflectivity: [f32; 3],
}

/// Reads [`TextureMetadata`] from an image file
pub trait MetadataExtractor {
    /// # Errors
    ///
    /// Returns an error if the texture can't be read or parsed.
    fn extract(&self, path: &Path) -> Result<TextureMetadata>;
}

/// Stand-in extractor that always reports the mode as unimplemented
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingExtractor;

impl MetadataExtractor for PendingExtractor {
    fn extract(&self, _path: &Path) -> Result<TextureMetadata> {
        Err(unimplemented_mode())
    }
}

/// Error raised whenever the metadata mode is selected
#[must_use]
pub fn unimplemented_mode() -> VmtError {
    VmtError::UnimplementedMode {
        mode: METADATA_MODE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExtractor(TextureMetadata);

    impl MetadataExtractor for FixedExtractor {
        fn extract(&self, _path: &Path) -> Result<TextureMetadata> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_pending_extractor_is_unimplemented() {
        let result = PendingExtractor.extract(Path::new("brick.vtf"));
        assert!(matches!(
            result,
            Err(VmtError::UnimplementedMode { ref mode }) if mode == METADATA_MODE
        ));
    }

    #[test]
    fn test_extractor_is_object_safe() {
        let metadata = TextureMetadata {
            has_alpha: true,
            dominant_hue: 0.5,
            reflectivity: [0.2, 0.4, 0.4],
        };
        let extractors: Vec<Box<dyn MetadataExtractor>> = vec![
            Box::new(PendingExtractor),
            Box::new(FixedExtractor(metadata)),
        ];

        assert!(extractors[0].extract(Path::new("glass.vtf")).is_err());
        assert_eq!(
            extractors[1].extract(Path::new("glass.vtf")).unwrap(),
            metadata
        );
    }
}
