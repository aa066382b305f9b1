use crate::{
    foundation::{
        core::{MAX_RASTER_DIM, RawGrid},
        error::{ArtError, ArtResult},
    },
    source::font::LoadedFont,
};

/// Rasterize `text` as a single line, black on white, cropped to its bounding box plus `margin`.
///
/// Empty or whitespace-only text yields a blank `2*margin` square.
#[tracing::instrument(skip(font), fields(family = %font.family))]
pub fn render_text(text: &str, font: &LoadedFont, font_size: f32, margin: u32) -> ArtResult<RawGrid> {
    if text.trim().is_empty() {
        return blank_canvas(margin);
    }

    let svg = text_svg(text, &font.family, font_size);
    let opts = usvg::Options {
        fontdb: font.db.clone(),
        font_family: font.family.clone(),
        font_size,
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts)
        .map_err(|e| ArtError::render(format!("lay out text: {e}")))?;

    if !tree.root().has_children() {
        return Err(ArtError::render(format!(
            "font '{}' produced no glyphs for the given text",
            font.family
        )));
    }

    let bbox = tree.root().abs_bounding_box();
    if bbox.width() < 0.5 || bbox.height() < 0.5 {
        return blank_canvas(margin);
    }

    let width = padded_side(bbox.width(), margin)?;
    let height = padded_side(bbox.height(), margin)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ArtError::render("failed to allocate text pixmap"))?;
    pixmap.fill(resvg::tiny_skia::Color::WHITE);

    let xform = resvg::tiny_skia::Transform::from_translate(
        margin as f32 - bbox.x(),
        margin as f32 - bbox.y(),
    );
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    // The background is opaque, so premultiplied and straight RGBA agree.
    let rgba = image::RgbaImage::from_raw(width, height, pixmap.data().to_vec())
        .ok_or_else(|| ArtError::render("text pixmap has an unexpected size"))?;
    let luma = image::DynamicImage::ImageRgba8(rgba).to_luma8();
    RawGrid::new(width, height, luma.into_raw())
}

/// All-white square of side `2 * margin`.
pub fn blank_canvas(margin: u32) -> ArtResult<RawGrid> {
    let side = padded_side(0.0, margin)?;
    Ok(RawGrid::filled(side, side, 255))
}

/// `ceil(extent) + 2 * margin`, bounded by [`MAX_RASTER_DIM`].
fn padded_side(extent: f32, margin: u32) -> ArtResult<u32> {
    let too_large = || {
        ArtError::render(format!(
            "text raster too large (max {MAX_RASTER_DIM}x{MAX_RASTER_DIM} including margin {margin})"
        ))
    };
    let extent = extent.ceil();
    if !extent.is_finite() || extent > MAX_RASTER_DIM as f32 {
        return Err(too_large());
    }
    margin
        .checked_mul(2)
        .and_then(|m| m.checked_add(extent.max(0.0) as u32))
        .filter(|&side| side <= MAX_RASTER_DIM)
        .ok_or_else(too_large)
}

fn text_svg(text: &str, family: &str, font_size: f32) -> String {
    let chars = text.chars().count().max(1) as f32;
    let view_w = (chars * font_size * 2.0).ceil().max(1.0);
    let view_h = (font_size * 4.0).ceil().max(1.0);
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{view_w}" height="{view_h}"><text x="0" y="{baseline}" font-family="{family}" font-size="{font_size}" fill="black" xml:space="preserve">{body}</text></svg>"#,
        baseline = font_size * 2.0,
        family = escape_xml(family),
        body = escape_xml(text),
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/source/text.rs"]
mod tests;
