//! Name label rasterization.
//!
//! Lays out one line of text with kerning, aligns it in the label box,
//! and paints a blurred drop shadow followed by the fill. The line box
//! is one font size tall with its middle on the box's first line, so the
//! baseline sits at `top + size / 2 + (ascent + descent) / 2`.
//!
//! Text that is wider than the box overflows it; nothing wraps,
//! truncates, or shrinks. Only the part of the line that can reach the
//! pixmap is rasterized.

use ab_glyph::{Font, FontArc, Glyph, OutlinedGlyph, PxScale, ScaleFont, point};
use image::GrayImage;
use tiny_skia::{Pixmap, PremultipliedColorU8};

use crate::types::{Rect, Rgba8, SceneError, TextAlign, TextStyle};

/// Built-in bold face (DejaVu Sans Condensed Bold, Bitstream Vera license).
pub const DEFAULT_FONT: &[u8] = include_bytes!("../assets/DejaVuSansCondensed-Bold.ttf");

/// The built-in label face.
///
/// # Errors
///
/// Returns [`SceneError::FontParse`] if the embedded file is not a
/// readable font.
pub fn default_font() -> Result<FontArc, SceneError> {
    Ok(FontArc::try_from_slice(DEFAULT_FONT)?)
}

/// A single-channel coverage mask positioned in pixmap coordinates.
#[derive(Debug, Clone)]
pub struct Coverage {
    /// Pixmap x of the mask's left column.
    pub left: i32,
    /// Pixmap y of the mask's top row.
    pub top: i32,
    /// Coverage, 0 (empty) to 255 (full).
    pub mask: GrayImage,
}

/// Horizontal advance of `text` at `font_size`, including kerning.
#[must_use]
pub fn measure(text: &str, font: &FontArc, font_size: f32) -> f32 {
    layout_line(text, font, font_size, 0.0, 0.0).1
}

/// Left edge of a line of width `advance` aligned inside `rect`.
#[must_use]
pub fn line_left(rect: Rect, advance: f32, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => rect.x,
        TextAlign::Center => (rect.width - advance).mul_add(0.5, rect.x),
        TextAlign::Right => rect.right() - advance,
    }
}

/// Baseline for a line box of height `line_height` whose top is `top`,
/// with the em box centered vertically (`descent` is negative).
#[must_use]
pub fn baseline(top: f32, line_height: f32, ascent: f32, descent: f32) -> f32 {
    line_height.mul_add(0.5, top) + (ascent + descent) * 0.5
}

/// Draw `text` into `pixmap`, with every canvas-space measure in `rect`
/// and `style` multiplied by `scale`.
///
/// Empty text draws nothing.
#[allow(clippy::cast_precision_loss)]
pub fn draw_label(
    pixmap: &mut Pixmap,
    text: &str,
    rect: Rect,
    style: &TextStyle,
    font: &FontArc,
    scale: f32,
) {
    if text.is_empty() {
        return;
    }

    let size = style.font_size * scale;
    let scaled_rect = Rect::new(
        rect.x * scale,
        rect.y * scale,
        rect.width * scale,
        rect.height * scale,
    );

    let metrics = font.as_scaled(PxScale::from(size));
    let y = baseline(scaled_rect.y, size, metrics.ascent(), metrics.descent());
    let advance = measure(text, font, size);
    let x = line_left(scaled_rect, advance, style.align);
    let (glyphs, _) = layout_line(text, font, size, x, y);

    #[allow(clippy::cast_possible_truncation)]
    let (dx, dy) = (
        (style.shadow_offset.0 * scale).round() as i32,
        (style.shadow_offset.1 * scale).round() as i32,
    );
    let sigma = style.shadow_blur * scale / 2.0;

    // Ink this far outside the pixmap can still be shifted or blurred
    // into view by the shadow.
    let margin = blur_pad(sigma) as f32 + dx.abs().max(dy.abs()) as f32;
    let clip = ab_glyph::Rect {
        min: point(-margin, -margin),
        max: point(pixmap.width() as f32 + margin, pixmap.height() as f32 + margin),
    };
    let Some(coverage) = rasterize(font, glyphs, sigma, clip) else {
        return;
    };

    if style.shadow_color.a > 0 {
        let shadow_mask = if sigma > 0.0 {
            imageproc::filter::gaussian_blur_f32(&coverage.mask, sigma)
        } else {
            coverage.mask.clone()
        };
        let shadow = Coverage {
            mask: shadow_mask,
            ..coverage.clone()
        };
        composite_coverage(pixmap, &shadow, dx, dy, style.shadow_color);
    }
    composite_coverage(pixmap, &coverage, 0, 0, style.fill);
}

/// Position glyphs along one line starting at `(x, baseline)`.
///
/// Returns the glyphs and the total advance.
fn layout_line(
    text: &str,
    font: &FontArc,
    size: f32,
    x: f32,
    baseline: f32,
) -> (Vec<Glyph>, f32) {
    let px = PxScale::from(size);
    let scaled = font.as_scaled(px);
    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut prev = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev_id) = prev {
            caret += scaled.kern(prev_id, id);
        }
        glyphs.push(id.with_scale_and_position(px, point(x + caret, baseline)));
        caret += scaled.h_advance(id);
        prev = Some(id);
    }

    (glyphs, caret)
}

/// Padding a blur of `sigma` needs around the ink.
#[allow(clippy::cast_possible_truncation)]
fn blur_pad(sigma: f32) -> i32 {
    (sigma * 3.0).ceil() as i32 + 1
}

/// Rasterize glyph outlines into one mask, padded so a blur of `sigma`
/// is not clipped.
///
/// Glyphs entirely outside `clip` are dropped and the mask never
/// extends past it. `None` when nothing visible has an outline (e.g.
/// spaces).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
fn rasterize(
    font: &FontArc,
    glyphs: Vec<Glyph>,
    sigma: f32,
    clip: ab_glyph::Rect,
) -> Option<Coverage> {
    let outlined: Vec<OutlinedGlyph> = glyphs
        .into_iter()
        .filter_map(|g| font.outline_glyph(g))
        .filter(|g| {
            let b = g.px_bounds();
            b.max.x > clip.min.x
                && b.min.x < clip.max.x
                && b.max.y > clip.min.y
                && b.min.y < clip.max.y
        })
        .collect();

    let first = outlined.first()?.px_bounds();
    let ink = outlined.iter().skip(1).fold(first, |acc, g| {
        let b = g.px_bounds();
        ab_glyph::Rect {
            min: point(acc.min.x.min(b.min.x), acc.min.y.min(b.min.y)),
            max: point(acc.max.x.max(b.max.x), acc.max.y.max(b.max.y)),
        }
    });

    let pad = blur_pad(sigma);
    let left = (ink.min.x.floor() as i32 - pad).max(clip.min.x.floor() as i32);
    let top = (ink.min.y.floor() as i32 - pad).max(clip.min.y.floor() as i32);
    let right = (ink.max.x.ceil() as i32 + pad).min(clip.max.x.ceil() as i32);
    let bottom = (ink.max.y.ceil() as i32 + pad).min(clip.max.y.ceil() as i32);
    let width = (right - left).max(1) as u32;
    let height = (bottom - top).max(1) as u32;

    let mut mask = GrayImage::new(width, height);
    for glyph in &outlined {
        let b = glyph.px_bounds();
        let gx0 = b.min.x.floor() as i32 - left;
        let gy0 = b.min.y.floor() as i32 - top;
        glyph.draw(|gx, gy, c| {
            let x = gx0 + gx as i32;
            let y = gy0 + gy as i32;
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                return;
            }
            let v = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
            let p = mask.get_pixel_mut(x as u32, y as u32);
            p.0[0] = p.0[0].max(v);
        });
    }

    Some(Coverage { left, top, mask })
}

/// Source-over `color`, modulated by coverage, onto a premultiplied
/// pixmap. The mask is shifted by `(dx, dy)`; pixels falling outside
/// the pixmap are dropped.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn composite_coverage(
    pixmap: &mut Pixmap,
    coverage: &Coverage,
    dx: i32,
    dy: i32,
    color: Rgba8,
) {
    let pw = pixmap.width() as i32;
    let ph = pixmap.height() as i32;
    let stride = pixmap.width() as usize;
    let pixels = pixmap.pixels_mut();
    let color_alpha = f32::from(color.a) / 255.0;

    for (mx, my, m) in coverage.mask.enumerate_pixels() {
        let cov = m.0[0];
        if cov == 0 {
            continue;
        }
        let x = coverage.left + dx + mx as i32;
        let y = coverage.top + dy + my as i32;
        if x < 0 || y < 0 || x >= pw || y >= ph {
            continue;
        }

        let idx = y as usize * stride + x as usize;
        let dst = pixels[idx];
        let sa = color_alpha * f32::from(cov) / 255.0;
        let inv = 1.0 - sa;
        let over = |s: u8, d: u8| -> u8 {
            f32::from(s)
                .mul_add(sa, f32::from(d) * inv)
                .round()
                .clamp(0.0, 255.0) as u8
        };

        if let Some(out) = PremultipliedColorU8::from_rgba(
            over(color.r, dst.red()),
            over(color.g, dst.green()),
            over(color.b, dst.blue()),
            over(255, dst.alpha()),
        ) {
            pixels[idx] = out;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::FrameGeometry;

    const CLEAR: Rgba8 = Rgba8::new(0, 0, 0, 0);

    fn square_mask(left: i32, top: i32, side: u32, value: u8) -> Coverage {
        Coverage {
            left,
            top,
            mask: GrayImage::from_pixel(side, side, image::Luma([value])),
        }
    }

    /// `text` drawn on a transparent 600x500 pixmap in the default label box.
    fn label(text: &str, style: &TextStyle) -> Pixmap {
        let mut pixmap = Pixmap::new(600, 500).unwrap();
        let font = default_font().unwrap();
        let rect = FrameGeometry::default().text_rect();
        draw_label(&mut pixmap, text, rect, style, &font, 1.0);
        pixmap
    }

    /// Inclusive `(x0, y0, x1, y1)` bounds of every pixel with any alpha.
    fn ink_bounds(pixmap: &Pixmap) -> Option<(u32, u32, u32, u32)> {
        let width = pixmap.width();
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (i, px) in pixmap.pixels().iter().enumerate() {
            if px.alpha() == 0 {
                continue;
            }
            let i = u32::try_from(i).unwrap();
            let (x, y) = (i % width, i / width);
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bounds
    }

    fn fill_only() -> TextStyle {
        TextStyle {
            shadow_color: CLEAR,
            ..TextStyle::default()
        }
    }

    #[test]
    fn default_label_stays_in_its_box() {
        let pixmap = label("POD Software", &TextStyle::default());
        let (x0, y0, x1, y1) = ink_bounds(&pixmap).unwrap();
        assert!(x0 >= 250 && x1 <= 430, "x {x0}..={x1}");
        assert!(y0 >= 380 && y1 <= 420, "y {y0}..={y1}");
        // Cap height at 24 px is well over half the size.
        assert!(y1 - y0 >= 14, "y {y0}..={y1}");
    }

    #[test]
    fn default_label_is_centered_on_the_box() {
        let (x0, _, x1, _) = ink_bounds(&label("POD Software", &fill_only())).unwrap();
        let middle = f64::from(x0 + x1 + 1) / 2.0;
        assert!((middle - 340.0).abs() <= 4.0, "ink {x0}..={x1}, middle {middle}");
    }

    #[test]
    fn default_label_fits_without_truncation() {
        let font = default_font().unwrap();
        let advance = measure("POD Software", &font, 24.0);
        assert!(advance > 120.0 && advance < 180.0, "advance {advance}");

        let (x0, _, x1, _) = ink_bounds(&label("POD Software", &fill_only())).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let inked = (x1 - x0 + 1) as f32;
        // Side bearings are the only gap between advance and ink.
        assert!(inked > advance - 6.0 && inked <= advance + 1.0, "ink {inked}, advance {advance}");

        let left = line_left(FrameGeometry::default().text_rect(), advance, TextAlign::Center);
        #[allow(clippy::cast_precision_loss)]
        let gap = x0 as f32 - left;
        assert!((0.0..4.0).contains(&gap), "first ink {x0}, line starts at {left}");
    }

    #[test]
    fn shadow_is_drawn_below_the_fill() {
        let fill = ink_bounds(&label("POD Software", &fill_only())).unwrap();
        let shadow_only = TextStyle {
            fill: CLEAR,
            shadow_color: Rgba8::new(0, 0, 0, 255),
            shadow_blur: 0.0,
            shadow_offset: (0.0, 5.0),
            ..TextStyle::default()
        };
        let shadow = ink_bounds(&label("POD Software", &shadow_only)).unwrap();
        assert_eq!(shadow, (fill.0, fill.1 + 5, fill.2, fill.3 + 5));
    }

    #[test]
    fn fill_is_painted_over_the_shadow() {
        let red = Rgba8::new(255, 0, 0, 255);
        let fill = label(
            "POD Software",
            &TextStyle {
                fill: red,
                ..fill_only()
            },
        );
        let both = label(
            "POD Software",
            &TextStyle {
                fill: red,
                shadow_color: Rgba8::new(0, 0, 255, 255),
                shadow_blur: 0.0,
                shadow_offset: (0.0, 1.0),
                ..TextStyle::default()
            },
        );
        let mut solid = 0;
        for (f, b) in fill.pixels().iter().zip(both.pixels()) {
            if f.alpha() == 255 {
                solid += 1;
                assert_eq!((b.red(), b.blue(), b.alpha()), (255, 0, 255));
            }
        }
        assert!(solid > 100);
    }

    #[test]
    fn vietnamese_name_renders_ink() {
        let name = "Nguyễn Văn Ánh";
        let font = default_font().unwrap();
        for ch in name.chars().filter(|c| !c.is_whitespace()) {
            assert_ne!(font.glyph_id(ch).0, 0, "no glyph for {ch:?}");
        }
        let (x0, y0, x1, _) = ink_bounds(&label(name, &fill_only())).unwrap();
        let (_, latin_top, _, _) = ink_bounds(&label("Nguyen Van Anh", &fill_only())).unwrap();
        assert!(x1 - x0 > 100);
        // Stacked diacritics reach above the plain capitals.
        assert!(y0 < latin_top, "accented top {y0}, plain top {latin_top}");
    }

    #[test]
    fn blank_and_empty_names_draw_nothing() {
        assert!(ink_bounds(&label("", &TextStyle::default())).is_none());
        assert!(ink_bounds(&label("   ", &TextStyle::default())).is_none());
    }

    #[test]
    fn long_name_mask_is_limited_to_the_pixmap() {
        let font = default_font().unwrap();
        let name = "M".repeat(2000);
        let size = 72.0;
        let (glyphs, advance) = layout_line(&name, &font, size, -1000.0, 1200.0);
        assert!(advance > 50_000.0);

        let margin = 10.0;
        let clip = ab_glyph::Rect {
            min: point(-margin, -margin),
            max: point(1800.0 + margin, 1500.0 + margin),
        };
        let coverage = rasterize(&font, glyphs, 3.0, clip).unwrap();
        assert!(coverage.mask.width() <= 1820, "mask {}", coverage.mask.width());
        assert!(coverage.left >= -10);
    }

    #[test]
    fn glyphs_outside_the_clip_are_skipped() {
        let font = default_font().unwrap();
        let (glyphs, _) = layout_line("POD Software", &font, 24.0, 5000.0, 400.0);
        let clip = ab_glyph::Rect {
            min: point(0.0, 0.0),
            max: point(600.0, 500.0),
        };
        assert!(rasterize(&font, glyphs, 1.0, clip).is_none());
    }

    #[test]
    fn long_name_still_covers_the_visible_width() {
        let pixmap = label(&"M".repeat(2000), &fill_only());
        let (x0, y0, x1, y1) = ink_bounds(&pixmap).unwrap();
        assert!(x0 <= 20 && x1 >= 580, "x {x0}..={x1}");
        assert!(y0 >= 380 && y1 <= 420, "y {y0}..={y1}");
    }

    #[test]
    fn center_alignment_splits_leftover_space() {
        let rect = Rect::new(250.0, 380.0, 180.0, 40.0);
        assert!((line_left(rect, 100.0, TextAlign::Center) - 290.0).abs() < 1e-4);
        assert!((line_left(rect, 100.0, TextAlign::Left) - 250.0).abs() < 1e-4);
        assert!((line_left(rect, 100.0, TextAlign::Right) - 330.0).abs() < 1e-4);
    }

    #[test]
    fn overflowing_line_extends_both_sides() {
        let rect = Rect::new(250.0, 380.0, 180.0, 40.0);
        let left = line_left(rect, 300.0, TextAlign::Center);
        assert!((left - 190.0).abs() < 1e-4);
        assert!(left + 300.0 > rect.right());
    }

    #[test]
    fn baseline_centers_em_box() {
        // ascent 20, descent -4: em box is 24 tall, middle at top + 12.
        let y = baseline(380.0, 24.0, 20.0, -4.0);
        assert!((y - 400.0).abs() < 1e-4);
        // The em box [y - ascent, y - descent] is centered on top + 12.
        let middle = ((y - 20.0) + (y + 4.0)) / 2.0;
        assert!((middle - 392.0).abs() < 1e-4);
    }

    #[test]
    fn full_coverage_replaces_pixel_with_opaque_color() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        let cov = square_mask(1, 1, 2, 255);
        composite_coverage(&mut pixmap, &cov, 0, 0, Rgba8::new(0x33, 0x33, 0x33, 255));
        let px = pixmap.pixel(1, 1).unwrap();
        assert_eq!((px.red(), px.alpha()), (0x33, 255));
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(3, 3).unwrap().alpha(), 0);
    }

    #[test]
    fn translucent_color_blends_over_white() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        let cov = square_mask(0, 0, 1, 255);
        composite_coverage(&mut pixmap, &cov, 0, 0, Rgba8::new(0, 0, 0, 26));
        let px = pixmap.pixel(0, 0).unwrap();
        // 255 * (1 - 26/255) = 229
        assert_eq!(px.red(), 229);
        assert_eq!(px.alpha(), 255);
    }

    #[test]
    fn offset_mask_is_clipped_to_pixmap() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        let cov = square_mask(0, 0, 2, 255);
        composite_coverage(&mut pixmap, &cov, 1, 1, Rgba8::new(255, 0, 0, 255));
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(1, 1).unwrap().red(), 255);
    }

    #[test]
    fn zero_coverage_leaves_pixmap_untouched() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        let before = pixmap.data().to_vec();
        composite_coverage(&mut pixmap, &square_mask(0, 0, 2, 0), 0, 0, Rgba8::new(0, 0, 0, 255));
        assert_eq!(pixmap.data(), before.as_slice());
    }
}
