//! PNG serialization of composited frames.
//!
//! The exporter reads the frame that was painted, not the live
//! selection, and re-rasterizes its scene at the oversampling factor.
//! Output is deterministic: the same frame and assets always encode to
//! the same bytes.

use image::ImageEncoder;
use mugprint_scene::{Assets, Dimensions, Frame, Pixmap, SceneError};

/// Download filename for the exported design.
pub const EXPORT_FILENAME: &str = "custom-mug-design.png";

/// MIME type of the exported file.
pub const PNG_MIME: &str = "image/png";

/// Pixel-density multiplier applied at export time.
pub const OVERSAMPLING: u32 = 3;

/// Errors that can occur while exporting a frame.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The oversampling factor must be at least 1.
    #[error("invalid oversampling factor: {0}")]
    InvalidFactor(u32),

    /// Re-rasterizing the frame failed.
    #[error("failed to render frame: {0}")]
    Render(#[from] SceneError),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] image::ImageError),
}

/// An encoded export, ready to hand to a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// PNG file contents.
    pub png: Vec<u8>,
    /// Pixel dimensions of the encoded image.
    pub dimensions: Dimensions,
    /// Suggested filename.
    pub filename: &'static str,
}

/// Demultiply a pixmap into straight (non-premultiplied) RGBA8 bytes,
/// the layout PNG and canvas `ImageData` both expect.
#[must_use]
pub fn straight_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    rgba
}

/// Encode a premultiplied pixmap as an RGBA8 PNG.
///
/// # Errors
///
/// Returns [`ExportError::PngEncode`] if encoding fails.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let rgba = straight_rgba(pixmap);
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder.write_image(
        &rgba,
        pixmap.width(),
        pixmap.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(png_bytes)
}

/// Export `frame` at `factor` times its canvas size.
///
/// Layers that were omitted when the frame was painted stay omitted.
///
/// # Errors
///
/// Returns [`ExportError::InvalidFactor`] for a zero factor, and
/// [`ExportError::Render`] / [`ExportError::PngEncode`] if rasterizing
/// or encoding fails.
pub fn export_frame(
    frame: &Frame,
    assets: &Assets<'_>,
    factor: u32,
) -> Result<Export, ExportError> {
    if factor == 0 {
        return Err(ExportError::InvalidFactor(factor));
    }

    #[allow(clippy::cast_precision_loss)]
    let oversampled = frame.rerender(assets, factor as f32)?;
    let png = encode_png(&oversampled.pixmap)?;

    Ok(Export {
        png,
        dimensions: oversampled.dimensions(),
        filename: EXPORT_FILENAME,
    })
}

/// Export the latest painted frame, if there is one.
///
/// Exporting before anything was painted is a no-op and returns
/// `Ok(None)`.
///
/// # Errors
///
/// See [`export_frame`].
pub fn export_latest(
    frame: Option<&Frame>,
    assets: &Assets<'_>,
    factor: u32,
) -> Result<Option<Export>, ExportError> {
    frame
        .map(|frame| export_frame(frame, assets, factor))
        .transpose()
}
