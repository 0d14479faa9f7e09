//! Putting composited pixels on a `<canvas>`.
//!
//! The compositor works in premultiplied RGBA; `ImageData` expects
//! straight RGBA, so pixels are demultiplied on the way out, exactly as
//! for PNG export.

use std::rc::Rc;

use mugprint_scene::{Frame, Pixmap};
use wasm_bindgen::{Clamped, JsCast, JsValue};

/// Errors that can occur while blitting to a canvas.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// No element with the requested id exists, or it is not a canvas.
    #[error("canvas #{0} not found")]
    MissingCanvas(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for RasterError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Copy `pixmap` onto the canvas with id `canvas_id`, replacing every
/// pixel. The canvas is resized to the pixmap if they differ.
///
/// # Errors
///
/// Returns [`RasterError::MissingCanvas`] if the canvas is not in the
/// document, and [`RasterError::JsError`] if the 2D context or
/// `ImageData` cannot be created.
pub fn blit_to_canvas(canvas_id: &str, pixmap: &Pixmap) -> Result<(), RasterError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RasterError::JsError("no document".into()))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .ok_or_else(|| RasterError::MissingCanvas(canvas_id.to_owned()))?;

    if canvas.width() != pixmap.width() || canvas.height() != pixmap.height() {
        canvas.set_width(pixmap.width());
        canvas.set_height(pixmap.height());
    }

    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| RasterError::JsError("2d context unavailable".into()))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|e| RasterError::JsError(format!("not a 2d context: {e:?}")))?;

    let straight = mugprint_export::straight_rgba(pixmap);
    let image_data = web_sys::ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(&straight),
        pixmap.width(),
        pixmap.height(),
    )?;
    ctx.put_image_data(&image_data, 0.0, 0.0)?;
    Ok(())
}

/// Hand `frame` to `paint`; only a frame that was painted comes back.
///
/// # Errors
///
/// Returns the error from `paint`; the frame is dropped with it so the
/// previously shown frame stays current.
pub fn present<E>(
    frame: Frame,
    paint: impl FnOnce(&Pixmap) -> Result<(), E>,
) -> Result<Rc<Frame>, E> {
    paint(&frame.pixmap)?;
    Ok(Rc::new(frame))
}
