use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use usvg::fontdb;

use crate::foundation::{
    error::{ArtError, ArtResult},
    settings::Settings,
};

/// One entry of the font fallback chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontCandidate {
    /// A specific font file.
    File(PathBuf),
    /// Any monospace face installed on the system. Lower quality: glyph metrics vary by host.
    SystemMonospace,
}

/// A font database holding the face chosen for text rendering.
#[derive(Clone)]
pub struct LoadedFont {
    pub db: Arc<fontdb::Database>,
    pub family: String,
    pub degraded: bool,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("faces", &self.db.len())
            .field("family", &self.family)
            .field("degraded", &self.degraded)
            .finish()
    }
}

impl FontCandidate {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::SystemMonospace)
    }

    pub fn load(&self) -> ArtResult<LoadedFont> {
        match self {
            Self::File(path) => load_font_file(path),
            Self::SystemMonospace => load_system_monospace(),
        }
    }
}

/// Candidates in the order they are tried: configured files, then the system fallback if allowed.
pub fn font_candidates(settings: &Settings) -> Vec<FontCandidate> {
    let mut out: Vec<FontCandidate> = settings
        .font_paths
        .iter()
        .cloned()
        .map(FontCandidate::File)
        .collect();
    if settings.allow_system_font_fallback {
        out.push(FontCandidate::SystemMonospace);
    }
    out
}

/// Try each candidate in order and return the first one that loads.
pub fn load_first_font(candidates: &[FontCandidate]) -> ArtResult<LoadedFont> {
    candidates
        .iter()
        .find_map(|candidate| match candidate.load() {
            Ok(font) => {
                if candidate.is_degraded() {
                    tracing::warn!(
                        family = %font.family,
                        "no preferred monospace font found, using a system font; output may look odd \
                         (place DejaVuSansMono.ttf or Courier.ttf next to the working directory)"
                    );
                }
                Some(font)
            }
            Err(e) => {
                tracing::debug!(?candidate, error = %e, "font candidate rejected");
                None
            }
        })
        .ok_or_else(|| {
            ArtError::render(
                "no usable font found; install a monospace font such as DejaVuSansMono.ttf",
            )
        })
}

fn load_font_file(path: &Path) -> ArtResult<LoadedFont> {
    if !path.is_file() {
        return Err(ArtError::render(format!(
            "font file '{}' does not exist",
            path.display()
        )));
    }

    let mut db = fontdb::Database::new();
    db.load_font_file(path)
        .map_err(|e| ArtError::render(format!("load font '{}': {e}", path.display())))?;

    let family = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| {
            ArtError::render(format!("font '{}' contains no usable faces", path.display()))
        })?;

    Ok(LoadedFont {
        db: Arc::new(db),
        family,
        degraded: false,
    })
}

fn load_system_monospace() -> ArtResult<LoadedFont> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let query = fontdb::Query {
        families: &[fontdb::Family::Monospace],
        ..Default::default()
    };
    let id = db
        .query(&query)
        .or_else(|| db.faces().find(|f| f.monospaced).map(|f| f.id))
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| ArtError::render("no system fonts are installed"))?;

    let family = db
        .face(id)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| ArtError::render("system font has no family name"))?;

    Ok(LoadedFont {
        db: Arc::new(db),
        family,
        degraded: true,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/source/font.rs"]
mod tests;
