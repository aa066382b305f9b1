//! Read-only views of an [`IntensityGrid`] used for previews and confirmation.

pub mod image;
pub mod stats;
pub mod terminal;

use crate::foundation::{core::IntensityGrid, error::ArtResult};

use self::{
    stats::GridStats,
    terminal::{TerminalOpts, render_terminal},
};

/// Everything a UI needs to show a grid before committing to it.
#[derive(Clone, Debug)]
pub struct Projection {
    pub terminal: String,
    pub image: ::image::GrayImage,
    pub stats: GridStats,
}

/// Terminal view, 1:1 grayscale reconstruction and summary statistics.
pub fn project(grid: &IntensityGrid, opts: &TerminalOpts) -> ArtResult<Projection> {
    Ok(Projection {
        terminal: render_terminal(grid, opts),
        image: image::grid_image(grid, 1)?,
        stats: GridStats::of(grid),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/project/mod.rs"]
mod tests;
