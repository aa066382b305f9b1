use std::path::Path;

use crate::foundation::{
    core::RawGrid,
    error::{ArtError, ArtResult},
};

/// Decode an image file and convert it to 8-bit luminance.
pub fn load_luma(path: &Path) -> ArtResult<RawGrid> {
    if !path.exists() {
        return Err(ArtError::input(format!(
            "image file '{}' not found",
            path.display()
        )));
    }
    let img = image::open(path)
        .map_err(|e| ArtError::input(format!("decode image '{}': {e}", path.display())))?;
    decode_luma(img)
}

/// Decode in-memory image bytes and convert them to 8-bit luminance.
pub fn decode_luma_bytes(bytes: &[u8]) -> ArtResult<RawGrid> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ArtError::input(format!("decode image from memory: {e}")))?;
    decode_luma(img)
}

fn decode_luma(img: image::DynamicImage) -> ArtResult<RawGrid> {
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    RawGrid::new(width, height, luma.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/source/raster.rs"]
mod tests;
