use super::*;

fn sample() -> IntensityGrid {
    let mut g = IntensityGrid::zeroed();
    for level in 0..=4u8 {
        g.set(0, usize::from(level), level).unwrap();
    }
    g
}

#[test]
fn plain_cells_use_shade_characters() {
    let text = render_terminal(
        &sample(),
        &TerminalOpts {
            style: GlyphStyle::Plain,
            weeks: 5,
            labels: false,
            legend: false,
        },
    );
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "    ░▒▓█");
    assert_eq!(lines[1], "        ");
}

#[test]
fn labels_add_month_header_and_day_names() {
    let text = render_terminal(
        &sample(),
        &TerminalOpts {
            style: GlyphStyle::Plain,
            ..TerminalOpts::default()
        },
    );
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("    Jan Feb"));
    assert!(lines[1].starts_with("Sun "));
    assert!(lines[7].starts_with("Sat "));
    assert_eq!(lines[1].chars().count(), 4 + 52);
    assert!(text.contains("Less"));
    assert!(text.contains("More"));
}

#[test]
fn weeks_are_clamped_to_grid_width() {
    let text = render_terminal(
        &sample(),
        &TerminalOpts::quick(GlyphStyle::Plain, 500),
    );
    assert_eq!(text.lines().next().unwrap().chars().count(), 3 + 52);
}

#[test]
fn ansi_glyphs_use_palette_and_reset() {
    let g = cell_glyph(4, GlyphStyle::Ansi);
    assert_eq!(g, "\x1b[48;2;57;211;83m  \x1b[0m");
    assert_eq!(cell_glyph(0, GlyphStyle::Ansi), "\x1b[48;2;22;27;34m  \x1b[0m");
    // Out-of-range levels render as the maximum.
    assert_eq!(cell_glyph(9, GlyphStyle::Plain), "█");
}

#[test]
fn legend_lists_every_level() {
    let text = render_terminal(&IntensityGrid::zeroed(), &TerminalOpts {
        style: GlyphStyle::Ansi,
        ..TerminalOpts::default()
    });
    for (r, g, b) in PALETTE {
        assert!(text.contains(&format!("48;2;{r};{g};{b}m")));
    }
}
