//! Asset decoding: raw bytes in, drawable values out.
//!
//! Images become premultiplied [`Pixmap`]s ready for compositing;
//! fonts become [`FontArc`]s for the label rasterizer.

use tiny_skia::IntSize;

use crate::types::{FontArc, Pixmap, SceneError};

/// Decode image bytes (PNG, JPEG, BMP, WebP) into a premultiplied pixmap.
///
/// # Errors
///
/// Returns [`SceneError::EmptyInput`] if `bytes` is empty.
/// Returns [`SceneError::ImageDecode`] if the format is unrecognized or
/// the data is corrupt.
/// Returns [`SceneError::InvalidDimensions`] for a zero-sized image.
pub fn decode_image(bytes: &[u8]) -> Result<Pixmap, SceneError> {
    if bytes.is_empty() {
        return Err(SceneError::EmptyInput);
    }

    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let size =
        IntSize::from_wh(width, height).ok_or(SceneError::InvalidDimensions { width, height })?;

    let mut data = rgba.into_raw();
    premultiply(&mut data);

    Pixmap::from_vec(data, size).ok_or(SceneError::InvalidDimensions { width, height })
}

/// Parse a TrueType/OpenType font.
///
/// # Errors
///
/// Returns [`SceneError::EmptyInput`] if `bytes` is empty.
/// Returns [`SceneError::FontParse`] if the data is not a font.
pub fn decode_font(bytes: Vec<u8>) -> Result<FontArc, SceneError> {
    if bytes.is_empty() {
        return Err(SceneError::EmptyInput);
    }
    Ok(FontArc::try_from_vec(bytes)?)
}

/// Convert straight RGBA8 to premultiplied RGBA8 in place.
fn premultiply(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            // Rounded c * a / 255; never exceeds a.
            #[expect(clippy::cast_possible_truncation)]
            {
                *c = ((u16::from(*c) * a + 127) / 255) as u8;
            }
        }
    }
}
