//! CPU compositor: rasterize a [`Scene`] into a [`Pixmap`].
//!
//! Rendering is a pure function of the scene and the assets resolved at
//! call time. Any layer whose asset is not ready is skipped for this
//! pass and listed in [`Frame::omitted`]; the other layers still draw.

use std::rc::Rc;

use tiny_skia::{FilterQuality, PixmapPaint, Transform};

use crate::assets::Assets;
use crate::scene::{Layer, LayerKind, Scene};
use crate::text;
use crate::types::{Dimensions, Pixmap, Rect, SceneError};

/// A scene together with the pixels it was rasterized to.
///
/// This is what is on screen, and what the exporter reads.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The scene that was drawn.
    pub scene: Scene,
    /// Premultiplied RGBA pixels, `canvas × scale`.
    pub pixmap: Pixmap,
    /// Render scale relative to the canvas.
    pub scale: f32,
    /// Layers skipped because their asset was not ready.
    pub omitted: Vec<LayerKind>,
}

impl Frame {
    /// Pixel dimensions of this frame.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.pixmap.width(),
            height: self.pixmap.height(),
        }
    }

    /// Re-rasterize this frame's scene at another scale.
    ///
    /// Layers omitted from this frame stay omitted, even if their asset
    /// has resolved since, so the result matches what was painted.
    ///
    /// # Errors
    ///
    /// See [`render`].
    pub fn rerender(&self, assets: &Assets<'_>, scale: f32) -> Result<Self, SceneError> {
        render_skipping(&self.scene, assets, scale, &self.omitted)
    }
}

/// Rasterize `scene` at `scale` (1.0 = on-screen size).
///
/// # Errors
///
/// Returns [`SceneError::InvalidScale`] if `scale` is not finite and
/// positive, and [`SceneError::InvalidDimensions`] if the scaled canvas
/// is empty or too large to allocate.
pub fn render(scene: &Scene, assets: &Assets<'_>, scale: f32) -> Result<Frame, SceneError> {
    render_skipping(scene, assets, scale, &[])
}

/// Like [`render`], but never draws the layers listed in `skip`.
///
/// # Errors
///
/// See [`render`].
pub fn render_skipping(
    scene: &Scene,
    assets: &Assets<'_>,
    scale: f32,
    skip: &[LayerKind],
) -> Result<Frame, SceneError> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(SceneError::InvalidScale(scale));
    }

    let (width, height) = scaled_size(scene.canvas, scale);
    let mut pixmap =
        Pixmap::new(width, height).ok_or(SceneError::InvalidDimensions { width, height })?;
    let mut omitted = Vec::new();

    for layer in &scene.layers {
        let kind = layer.kind();
        if skip.contains(&kind) {
            omitted.push(kind);
            continue;
        }

        match layer {
            Layer::Image { url, rect, .. } => match assets.images.get(url) {
                Some(image) => draw_stretched(&mut pixmap, &image, *rect, scale),
                None => omitted.push(kind),
            },
            Layer::Text { text, rect, style } => {
                if text.is_empty() {
                    continue;
                }
                let font = match &style.font_url {
                    None => Rc::new(text::default_font()?),
                    Some(url) => match assets.fonts.get(url) {
                        Some(font) => font,
                        None => {
                            omitted.push(kind);
                            continue;
                        }
                    },
                };
                text::draw_label(&mut pixmap, text, *rect, style, &font, scale);
            }
        }
    }

    Ok(Frame {
        scene: scene.clone(),
        pixmap,
        scale,
        omitted,
    })
}

/// Canvas size multiplied by `scale`, rounded to whole pixels.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn scaled_size(canvas: Dimensions, scale: f32) -> (u32, u32) {
    let w = (f64::from(canvas.width) * f64::from(scale)).round();
    let h = (f64::from(canvas.height) * f64::from(scale)).round();
    (w as u32, h as u32)
}

/// Draw `image` stretched to exactly fill `rect` (canvas coordinates),
/// with independent horizontal and vertical scale.
#[allow(clippy::cast_precision_loss)]
fn draw_stretched(target: &mut Pixmap, image: &Pixmap, rect: Rect, scale: f32) {
    let sx = rect.width * scale / image.width() as f32;
    let sy = rect.height * scale / image.height() as f32;
    let transform = Transform::from_row(sx, 0.0, 0.0, sy, rect.x * scale, rect.y * scale);
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    target.draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
}
