use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::{GRID_DAYS, GRID_WEEKS, IntensityGrid, MAX_INTENSITY},
    error::{ArtError, ArtResult},
};

/// Gray level for an intensity: 0 is white, the maximum is black.
pub fn level_to_luminance(level: u8) -> u8 {
    let level = u32::from(level.min(MAX_INTENSITY));
    (255 - level * 255 / u32::from(MAX_INTENSITY)) as u8
}

/// Reconstruct a grayscale picture of the grid, `cell` pixels per grid cell.
pub fn grid_image(grid: &IntensityGrid, cell: u32) -> ArtResult<image::GrayImage> {
    if cell == 0 {
        return Err(ArtError::validation("cell size must be > 0"));
    }
    let width = GRID_WEEKS as u32 * cell;
    let height = GRID_DAYS as u32 * cell;
    Ok(image::GrayImage::from_fn(width, height, |x, y| {
        let level = grid.get((y / cell) as usize, (x / cell) as usize);
        image::Luma([level_to_luminance(level)])
    }))
}

pub fn save_grid_png(grid: &IntensityGrid, cell: u32, path: &Path) -> ArtResult<()> {
    let img = grid_image(grid, cell)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/project/image.rs"]
mod tests;
