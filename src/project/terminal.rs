use std::fmt::Write as _;

use crate::foundation::core::{GRID_DAYS, GRID_WEEKS, IntensityGrid, MAX_INTENSITY};

/// How each cell is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GlyphStyle {
    /// 24-bit ANSI background colors from the contribution palette.
    #[default]
    Ansi,
    /// Shade characters, for pipes and terminals without color.
    Plain,
}

#[derive(Clone, Copy, Debug)]
pub struct TerminalOpts {
    pub style: GlyphStyle,
    /// Leading weeks to draw; clamped to the grid width.
    pub weeks: usize,
    /// Month header and day-of-week row labels.
    pub labels: bool,
    pub legend: bool,
}

impl Default for TerminalOpts {
    fn default() -> Self {
        Self {
            style: GlyphStyle::Ansi,
            weeks: GRID_WEEKS,
            labels: true,
            legend: true,
        }
    }
}

impl TerminalOpts {
    /// Short unlabeled preview of the first `weeks` weeks.
    pub fn quick(style: GlyphStyle, weeks: usize) -> Self {
        Self {
            style,
            weeks,
            labels: false,
            legend: false,
        }
    }
}

const PALETTE: [(u8, u8, u8); 5] = [
    (22, 27, 34),
    (14, 68, 41),
    (0, 109, 50),
    (38, 166, 65),
    (57, 211, 83),
];
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];
const DAY_LABELS: [&str; GRID_DAYS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Glyph for one intensity level. ANSI cells are two columns wide, plain cells one.
pub fn cell_glyph(level: u8, style: GlyphStyle) -> String {
    let level = usize::from(level.min(MAX_INTENSITY));
    match style {
        GlyphStyle::Ansi => {
            let (r, g, b) = PALETTE[level];
            format!("\x1b[48;2;{r};{g};{b}m  \x1b[0m")
        }
        GlyphStyle::Plain => SHADES[level].to_string(),
    }
}

/// Render the grid as text, one line per day.
pub fn render_terminal(grid: &IntensityGrid, opts: &TerminalOpts) -> String {
    let weeks = opts.weeks.min(GRID_WEEKS);
    let mut out = String::new();

    if opts.labels {
        // Months are approximate: one label every four weeks.
        out.push_str("    ");
        for week in (0..weeks).step_by(4) {
            let _ = write!(out, "{:<4}", MONTHS[(week / 4) % MONTHS.len()]);
        }
        out.push('\n');
    }

    for (day, label) in DAY_LABELS.iter().enumerate() {
        if opts.labels {
            let _ = write!(out, "{label} ");
        } else {
            out.push_str("   ");
        }
        for &level in grid.row(day).into_iter().flatten().take(weeks) {
            out.push_str(&cell_glyph(level, opts.style));
        }
        out.push('\n');
    }

    if opts.legend {
        out.push_str("\nLess ");
        for level in 0..=MAX_INTENSITY {
            out.push_str(&cell_glyph(level, opts.style));
            out.push(' ');
        }
        out.push_str("More  (0 = no activity, 4 = highest activity)\n");
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/project/terminal.rs"]
mod tests;
