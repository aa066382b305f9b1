use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    core::MAX_RASTER_DIM,
    error::{ArtError, ArtResult},
};

/// Tunable knobs for rendering, previewing and committing.
///
/// Every field has a default, so a settings document only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Font size in pixels used to rasterize text sources.
    pub font_size: f32,
    /// Blank border, in pixels, around rendered text.
    pub text_margin: u32,
    /// Font files tried in order before falling back to any system monospace face.
    pub font_paths: Vec<PathBuf>,
    /// Whether the degraded system-font fallback may be used at all.
    pub allow_system_font_fallback: bool,
    /// Branch that receives generated commits.
    pub branch: String,
    /// Weeks shown by the short preview shown before committing.
    pub quick_preview_weeks: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 8.0,
            text_margin: 2,
            font_paths: vec![
                PathBuf::from("DejaVuSansMono.ttf"),
                PathBuf::from("Courier.ttf"),
                PathBuf::from("courier.ttf"),
                PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf"),
            ],
            allow_system_font_fallback: true,
            branch: "contribution".to_string(),
            quick_preview_weeks: 20,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> ArtResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ArtError::serde(format!("parse settings '{}': {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ArtResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ArtError::validation("font_size must be a positive number"));
        }
        if self.text_margin > MAX_RASTER_DIM / 2 {
            return Err(ArtError::validation(format!(
                "text_margin must be at most {}",
                MAX_RASTER_DIM / 2
            )));
        }
        if self.branch.trim().is_empty() {
            return Err(ArtError::validation("branch must be non-empty"));
        }
        if self.quick_preview_weeks == 0 {
            return Err(ArtError::validation("quick_preview_weeks must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/settings.rs"]
mod tests;
