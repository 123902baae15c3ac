use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

/// Fixed recompression policy for uploaded documents.
pub const TARGET_WIDTH: u32 = 400;
pub const TARGET_HEIGHT: u32 = 400;
pub const JPEG_QUALITY: u8 = 70;

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("unable to decode image: {0}")]
    Decode(image::ImageError),

    #[error("unable to encode image: {0}")]
    Encode(image::ImageError),
}

/// Recompress an uploaded image to a 400x400 cover-fit JPEG at quality 70.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, ImagingError> {
    let decoded = image::load_from_memory(data).map_err(ImagingError::Decode)?;
    let resized = decoded
        .resize_to_fill(TARGET_WIDTH, TARGET_HEIGHT, FilterType::Triangle)
        .to_rgb8();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&resized)
        .map_err(ImagingError::Encode)?;
    Ok(out)
}
