use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::Context as _;

use crate::foundation::{
    core::{MAX_INTENSITY, RawGrid},
    error::{ArtError, ArtResult},
};

/// Hand-authored intensity pattern.
///
/// Rows are days (Sunday first), columns are weeks. Rows must be equally long and every value must be
/// a valid intensity level. Patterns smaller than the calendar are padded when quantized.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct TemplatePattern {
    rows: Vec<Vec<u8>>,
}

impl TemplatePattern {
    pub fn new(rows: Vec<Vec<u8>>) -> ArtResult<Self> {
        let width = rows.first().map_or(0, Vec::len);
        for (day, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ArtError::validation(format!(
                    "template row {day} has {} values, expected {width}",
                    row.len()
                )));
            }
            if let Some(v) = row.iter().find(|&&v| v > MAX_INTENSITY) {
                return Err(ArtError::validation(format!(
                    "template row {day} contains {v}, values must be in 0..={MAX_INTENSITY}"
                )));
            }
        }
        Ok(Self { rows })
    }

    fn from_wide(rows: Vec<Vec<i64>>) -> ArtResult<Self> {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(day, row)| {
                row.into_iter()
                    .map(|v| {
                        u8::try_from(v)
                            .ok()
                            .filter(|&v| v <= MAX_INTENSITY)
                            .ok_or_else(|| {
                                ArtError::validation(format!(
                                    "template row {day} contains {v}, values must be in 0..={MAX_INTENSITY}"
                                ))
                            })
                    })
                    .collect::<ArtResult<Vec<u8>>>()
            })
            .collect::<ArtResult<Vec<_>>>()?;
        Self::new(rows)
    }

    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn to_raw_grid(&self) -> ArtResult<RawGrid> {
        RawGrid::from_rows(&self.rows)
    }
}

/// Name -> pattern registry used by template sources.
///
/// Starts from the built-ins (or empty) and changes only through [`TemplateRegistry::insert`] and the
/// import methods. Nothing is persisted unless exported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    patterns: BTreeMap<String, TemplatePattern>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in patterns.
    pub fn builtin() -> Self {
        let mut reg = Self::new();
        for (name, rows) in BUILTIN_PATTERNS {
            let rows = rows.iter().map(|r| r.to_vec()).collect();
            reg.patterns
                .insert(name.to_string(), TemplatePattern { rows });
        }
        reg
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplatePattern)> {
        self.patterns.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&TemplatePattern> {
        self.patterns.get(name)
    }

    /// Exact, case-sensitive lookup. The error lists every registered name.
    pub fn lookup(&self, name: &str) -> ArtResult<&TemplatePattern> {
        self.patterns.get(name).ok_or_else(|| {
            let available = self.names().collect::<Vec<_>>().join(", ");
            ArtError::not_found(format!(
                "template '{name}' not found; available templates: [{available}]"
            ))
        })
    }

    pub fn insert(&mut self, name: impl Into<String>, pattern: TemplatePattern) {
        self.patterns.insert(name.into(), pattern);
    }

    /// Merge every template from a JSON document into the registry.
    ///
    /// The whole document is parsed and validated first; on any error the registry is unchanged.
    /// Imported names overwrite existing ones. Returns the number of imported templates.
    pub fn import_reader<R: Read>(&mut self, reader: R) -> ArtResult<usize> {
        let doc: BTreeMap<String, Vec<Vec<i64>>> = serde_json::from_reader(reader).map_err(|e| {
            ArtError::serde(format!(
                "invalid template document (expected an object of name -> 2D integer array): {e}"
            ))
        })?;

        let mut staged = Vec::with_capacity(doc.len());
        for (name, rows) in doc {
            let pattern = TemplatePattern::from_wide(rows).map_err(|e| match e {
                ArtError::Validation(msg) => ArtError::validation(format!("template '{name}': {msg}")),
                other => other,
            })?;
            staged.push((name, pattern));
        }

        let count = staged.len();
        self.patterns.extend(staged);
        tracing::debug!(count, total = self.patterns.len(), "imported templates");
        Ok(count)
    }

    pub fn import_json(&mut self, path: &Path) -> ArtResult<usize> {
        let f = File::open(path)
            .map_err(|e| ArtError::input(format!("open templates '{}': {e}", path.display())))?;
        self.import_reader(BufReader::new(f))
    }

    pub fn export_writer<W: Write>(&self, writer: W) -> ArtResult<()> {
        serde_json::to_writer_pretty(writer, &self.patterns)
            .map_err(|e| ArtError::serde(format!("serialize templates: {e}")))
    }

    pub fn export_json(&self, path: &Path) -> ArtResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = File::create(path)
            .with_context(|| format!("create templates file '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        self.export_writer(&mut w)?;
        w.flush()
            .with_context(|| format!("flush templates file '{}'", path.display()))?;
        tracing::debug!(count = self.len(), path = %path.display(), "exported templates");
        Ok(())
    }
}

const BUILTIN_PATTERNS: &[(&str, &[&[u8]])] = &[
    (
        "skull",
        &[
            &[0, 0, 2, 2, 2, 2, 0, 0],
            &[0, 2, 4, 2, 2, 4, 2, 0],
            &[2, 4, 4, 2, 2, 4, 4, 2],
            &[2, 2, 2, 4, 4, 2, 2, 2],
            &[2, 4, 2, 2, 2, 2, 4, 2],
            &[0, 2, 4, 4, 4, 4, 2, 0],
            &[0, 0, 2, 2, 2, 2, 0, 0],
        ],
    ),
    (
        "heart",
        &[
            &[0, 2, 2, 0, 2, 2, 0],
            &[2, 4, 4, 2, 4, 4, 2],
            &[4, 4, 4, 4, 4, 4, 4],
            &[4, 4, 4, 4, 4, 4, 4],
            &[2, 4, 4, 4, 4, 4, 2],
            &[0, 2, 4, 4, 4, 2, 0],
            &[0, 0, 2, 2, 2, 0, 0],
        ],
    ),
    // Eight rows tall; the last row is dropped when quantized.
    (
        "smile",
        &[
            &[0, 0, 2, 2, 2, 2, 0, 0],
            &[0, 2, 0, 2, 2, 0, 2, 0],
            &[2, 0, 4, 0, 0, 4, 0, 2],
            &[2, 0, 0, 0, 0, 0, 0, 2],
            &[2, 0, 4, 0, 0, 4, 0, 2],
            &[2, 0, 0, 4, 4, 0, 0, 2],
            &[0, 2, 0, 0, 0, 0, 2, 0],
            &[0, 0, 2, 2, 2, 2, 0, 0],
        ],
    ),
    (
        "diamond",
        &[
            &[0, 0, 0, 2, 0, 0, 0],
            &[0, 0, 2, 4, 2, 0, 0],
            &[0, 2, 4, 4, 4, 2, 0],
            &[2, 4, 4, 4, 4, 4, 2],
            &[0, 2, 4, 4, 4, 2, 0],
            &[0, 0, 2, 4, 2, 0, 0],
            &[0, 0, 0, 2, 0, 0, 0],
        ],
    ),
    (
        "checkmark",
        &[
            &[0, 0, 0, 0, 0, 0, 2],
            &[0, 0, 0, 0, 0, 2, 4],
            &[0, 0, 0, 0, 2, 4, 2],
            &[2, 0, 0, 2, 4, 2, 0],
            &[4, 2, 2, 4, 2, 0, 0],
            &[2, 4, 4, 2, 0, 0, 0],
            &[0, 2, 2, 0, 0, 0, 0],
        ],
    ),
];

#[cfg(test)]
#[path = "../../tests/unit/source/template.rs"]
mod tests;
