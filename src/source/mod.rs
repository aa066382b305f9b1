//! Turn an image, a line of text, or a named template into a [`RawGrid`].

pub mod font;
pub mod raster;
pub mod template;
pub mod text;

use std::path::PathBuf;

use crate::foundation::{core::RawGrid, error::ArtResult, settings::Settings};

use self::template::TemplateRegistry;

/// Exactly one input source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceDescriptor {
    Image(PathBuf),
    Text(String),
    Template(String),
}

impl SourceDescriptor {
    /// Template values are already intensity levels; everything else is luminance.
    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }

    /// Short human-readable description, e.g. for commit READMEs.
    pub fn describe(&self) -> String {
        match self {
            Self::Image(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Image: {name}")
            }
            Self::Text(text) => format!("Text: '{text}'"),
            Self::Template(name) => format!("Template: {name}"),
        }
    }
}

pub struct SourceRenderer<'a> {
    registry: &'a TemplateRegistry,
    settings: &'a Settings,
}

impl<'a> SourceRenderer<'a> {
    pub fn new(registry: &'a TemplateRegistry, settings: &'a Settings) -> Self {
        Self { registry, settings }
    }

    #[tracing::instrument(skip(self))]
    pub fn render(&self, source: &SourceDescriptor) -> ArtResult<RawGrid> {
        let grid = match source {
            SourceDescriptor::Image(path) => raster::load_luma(path)?,
            SourceDescriptor::Text(s) if s.trim().is_empty() => {
                text::blank_canvas(self.settings.text_margin)?
            }
            SourceDescriptor::Text(s) => {
                let font = font::load_first_font(&font::font_candidates(self.settings))?;
                text::render_text(
                    s,
                    &font,
                    self.settings.font_size,
                    self.settings.text_margin,
                )?
            }
            SourceDescriptor::Template(name) => self.registry.lookup(name)?.to_raw_grid()?,
        };
        tracing::debug!(
            width = grid.width(),
            height = grid.height(),
            "rendered source"
        );
        Ok(grid)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/mod.rs"]
mod tests;
