use image::imageops::FilterType;

use crate::foundation::{
    core::{GRID_DAYS, GRID_WEEKS, IntensityGrid, MAX_INTENSITY, RawGrid},
    error::{ArtError, ArtResult},
};

/// Map a raw grid onto the 7x52 intensity grid.
///
/// With `is_template` the values are already intensity levels: the grid is zero-padded at the bottom
/// and right and truncated beyond 7 rows / 52 columns, values unchanged. Otherwise the values are
/// luminance: the grid is Lanczos-resampled to 52x7, inverted so dark means busy, and bucketed with
/// `floor(v * 4 / 255)`.
#[tracing::instrument(skip(raw), fields(width = raw.width(), height = raw.height()))]
pub fn quantize(raw: &RawGrid, is_template: bool) -> ArtResult<IntensityGrid> {
    if is_template {
        pad_or_truncate(raw)
    } else {
        resample_luminance(raw)
    }
}

fn pad_or_truncate(raw: &RawGrid) -> ArtResult<IntensityGrid> {
    let mut grid = IntensityGrid::zeroed();
    let rows = (raw.height() as usize).min(GRID_DAYS);
    let cols = (raw.width() as usize).min(GRID_WEEKS);
    for day in 0..rows {
        for week in 0..cols {
            let v = raw.get(week as u32, day as u32).unwrap_or(0);
            grid.set(day, week, v.min(MAX_INTENSITY))?;
        }
    }
    Ok(grid)
}

fn resample_luminance(raw: &RawGrid) -> ArtResult<IntensityGrid> {
    if raw.is_empty() {
        return Ok(IntensityGrid::zeroed());
    }

    let src = image::GrayImage::from_raw(raw.width(), raw.height(), raw.as_slice().to_vec())
        .ok_or_else(|| ArtError::validation("raw grid does not match its dimensions"))?;
    let resized = image::imageops::resize(
        &src,
        GRID_WEEKS as u32,
        GRID_DAYS as u32,
        FilterType::Lanczos3,
    );

    let mut grid = IntensityGrid::zeroed();
    for (week, day, px) in resized.enumerate_pixels() {
        grid.set(day as usize, week as usize, luminance_to_level(px.0[0]))?;
    }
    Ok(grid)
}

/// Inverted luminance bucketed into `0..=MAX_INTENSITY`; 255 (white) is 0, 0 (black) is the max.
pub fn luminance_to_level(luma: u8) -> u8 {
    let inverted = u32::from(255 - luma);
    (inverted * u32::from(MAX_INTENSITY) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/grid/quantize.rs"]
mod tests;
