use crate::foundation::error::{ArtError, ArtResult};

/// Rows of the calendar grid (days of the week, Sunday first).
pub const GRID_DAYS: usize = 7;
/// Columns of the calendar grid (weeks, oldest first).
pub const GRID_WEEKS: usize = 52;
/// Highest intensity level a cell can hold.
pub const MAX_INTENSITY: u8 = 4;
/// Number of cells in an [`IntensityGrid`].
pub const GRID_CELLS: usize = GRID_DAYS * GRID_WEEKS;
/// Largest side, in pixels, of an intermediate raster such as rendered text.
pub const MAX_RASTER_DIM: u32 = 16_384;

/// Row-major 2D grid of raw values produced by a source.
///
/// Luminance sources store 0..=255 (0 is black). Template sources store intensity levels directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RawGrid {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ArtResult<Self> {
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(ArtError::validation(format!(
                "raw grid data has {} values, expected {width}x{height}={expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Build a grid from rows. Every row must have the same length.
    pub fn from_rows(rows: &[Vec<u8>]) -> ArtResult<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((i, _)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ArtError::validation(format!(
                "row {i} has a different length than row 0 ({width})"
            )));
        }
        let width = u32::try_from(width)
            .map_err(|_| ArtError::validation("raw grid is too wide"))?;
        let height = u32::try_from(rows.len())
            .map_err(|_| ArtError::validation("raw grid is too tall"))?;
        Self::new(width, height, rows.concat())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Fixed 7x52 grid of intensity levels in `0..=MAX_INTENSITY`.
///
/// Row `d` is the day of the week (0 = Sunday), column `w` is the week index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntensityGrid {
    cells: Vec<u8>,
}

impl Default for IntensityGrid {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl IntensityGrid {
    pub fn zeroed() -> Self {
        Self {
            cells: vec![0; GRID_CELLS],
        }
    }

    /// Build a grid from exactly 7 rows of exactly 52 values each.
    pub fn from_rows(rows: &[Vec<u8>]) -> ArtResult<Self> {
        if rows.len() != GRID_DAYS {
            return Err(ArtError::validation(format!(
                "intensity grid needs {GRID_DAYS} rows, got {}",
                rows.len()
            )));
        }
        let mut grid = Self::zeroed();
        for (day, row) in rows.iter().enumerate() {
            if row.len() != GRID_WEEKS {
                return Err(ArtError::validation(format!(
                    "intensity grid row {day} needs {GRID_WEEKS} columns, got {}",
                    row.len()
                )));
            }
            for (week, &v) in row.iter().enumerate() {
                grid.set(day, week, v)?;
            }
        }
        Ok(grid)
    }

    pub fn get(&self, day: usize, week: usize) -> u8 {
        if day >= GRID_DAYS || week >= GRID_WEEKS {
            return 0;
        }
        self.cells[day * GRID_WEEKS + week]
    }

    pub fn set(&mut self, day: usize, week: usize, value: u8) -> ArtResult<()> {
        if day >= GRID_DAYS || week >= GRID_WEEKS {
            return Err(ArtError::validation(format!(
                "cell ({day}, {week}) is outside the {GRID_DAYS}x{GRID_WEEKS} grid"
            )));
        }
        if value > MAX_INTENSITY {
            return Err(ArtError::validation(format!(
                "intensity {value} exceeds the maximum of {MAX_INTENSITY}"
            )));
        }
        self.cells[day * GRID_WEEKS + week] = value;
        Ok(())
    }

    /// The 52 levels of one day, or `None` past the last day.
    pub fn row(&self, day: usize) -> Option<&[u8]> {
        if day >= GRID_DAYS {
            return None;
        }
        let start = day * GRID_WEEKS;
        self.cells.get(start..start + GRID_WEEKS)
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks_exact(GRID_WEEKS).map(<[u8]>::to_vec).collect()
    }

    /// Cells in row-major order as `(day, week, intensity)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (i / GRID_WEEKS, i % GRID_WEEKS, v))
    }

    pub fn active_cells(&self) -> usize {
        self.cells.iter().filter(|&&v| v > 0).count()
    }

    pub fn total_intensity(&self) -> u32 {
        self.cells.iter().map(|&v| u32::from(v)).sum()
    }

    pub fn max_intensity(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&v| v == 0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
