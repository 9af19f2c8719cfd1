//! Image byte decoding.

use image::{DynamicImage, ImageFormat};

use crate::error::{CutoutError, Result};

/// Decode image bytes of any supported container format.
///
/// Bytes that are not a recognised image, or that fail to decode, are
/// `InvalidInput`.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let format = sniff_format(bytes)?;

    let image = image::load_from_memory_with_format(bytes, format).map_err(|e| CutoutError::InvalidInput {
        message: format!("Could not decode {:?} image: {}", format, e),
        help: None,
    })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(CutoutError::input(format!(
            "Image has no pixels ({}x{})",
            image.width(),
            image.height()
        )));
    }

    Ok(image)
}

/// Identify the container format from the leading bytes.
pub fn sniff_format(bytes: &[u8]) -> Result<ImageFormat> {
    image::guess_format(bytes).map_err(|_| CutoutError::InvalidInput {
        message: "Not a recognised image file".to_string(),
        help: Some("Please upload a valid image file (PNG, JPG, WebP)".to_string()),
    })
}
