//! Draw pictures on a contribution calendar.
//!
//! The pipeline turns a source (raster image, a line of text, or a named template) into a 7x52 grid
//! of intensity levels and schedules one timestamped event per level, so that replaying the events
//! as commits paints the grid on a Sunday-first, 52-week activity calendar.
//!
//! # Pipeline overview
//!
//! 1. **Render**: `SourceDescriptor -> RawGrid` ([`SourceRenderer`])
//! 2. **Quantize**: `RawGrid -> IntensityGrid` ([`quantize()`])
//! 3. **Schedule**: `IntensityGrid + now + week offset -> Schedule` ([`schedule()`])
//! 4. **Project** (read-only): `IntensityGrid -> terminal view + image + stats` ([`project()`])
//! 5. **Commit** (optional): replay a `Schedule` through the system `git` binary ([`CommitWriter`])
//!
//! Every stage is synchronous and deterministic for a given input and `now`.
#![forbid(unsafe_code)]

pub mod commit;
pub mod foundation;
pub mod grid;
pub mod project;
pub mod schedule;
pub mod source;

pub use commit::git::{Author, CommitConfig, CommitWriter, is_git_on_path};
pub use foundation::core::{
    GRID_CELLS, GRID_DAYS, GRID_WEEKS, IntensityGrid, MAX_INTENSITY, MAX_RASTER_DIM, RawGrid,
};
pub use foundation::error::{ArtError, ArtResult};
pub use foundation::settings::Settings;
pub use grid::quantize::{luminance_to_level, quantize};
pub use project::image::{grid_image, level_to_luminance, save_grid_png};
pub use project::stats::GridStats;
pub use project::terminal::{GlyphStyle, TerminalOpts, cell_glyph, render_terminal};
pub use project::{Projection, project};
pub use schedule::generator::{Schedule, ScheduledEvent, epoch_anchor, event_time, schedule};
pub use source::font::{FontCandidate, LoadedFont, font_candidates, load_first_font};
pub use source::template::{TemplatePattern, TemplateRegistry};
pub use source::{SourceDescriptor, SourceRenderer};

/// Run render and quantize for one source.
pub fn build_grid(
    source: &SourceDescriptor,
    registry: &TemplateRegistry,
    settings: &Settings,
) -> ArtResult<IntensityGrid> {
    let raw = SourceRenderer::new(registry, settings).render(source)?;
    quantize(&raw, source.is_template())
}
