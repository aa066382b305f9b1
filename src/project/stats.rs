use crate::foundation::core::{GRID_CELLS, IntensityGrid};

/// Summary numbers shown alongside every preview.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GridStats {
    /// Cells with intensity > 0.
    pub active_days: usize,
    /// Sum of all intensities, equal to the number of scheduled events.
    pub total_events: u32,
    pub max_intensity: u8,
    /// `active_days / 364 * 100`.
    pub coverage_percent: f64,
}

impl GridStats {
    pub fn of(grid: &IntensityGrid) -> Self {
        let active_days = grid.active_cells();
        Self {
            active_days,
            total_events: grid.total_intensity(),
            max_intensity: grid.max_intensity(),
            coverage_percent: active_days as f64 / GRID_CELLS as f64 * 100.0,
        }
    }
}

impl std::fmt::Display for GridStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "   Total contribution days: {}", self.active_days)?;
        writeln!(f, "   Total commits: {}", self.total_events)?;
        writeln!(f, "   Max daily commits: {}", self.max_intensity)?;
        write!(f, "   Coverage: {:.1}%", self.coverage_percent)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/stats.rs"]
mod tests;
