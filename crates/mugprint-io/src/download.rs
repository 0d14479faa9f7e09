//! Client-side file download via Blob URLs.
//!
//! The browser has no "save these bytes" call, so a download is a
//! `Blob`, an object URL, and a click on a temporary `<a download>`.
//!
//! Requires a browser environment (`wasm32-unknown-unknown` target).

use wasm_bindgen::{JsCast, JsValue};
use web_sys::BlobPropertyBag;

/// Errors that can occur when triggering a file download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Offer `bytes` to the user as a file named `filename`.
///
/// The temporary anchor is removed and the object URL revoked right
/// after the click; the browser has already taken its own reference.
/// The URL is revoked on failure too.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if `Blob` creation,
/// `URL.createObjectURL`, or any DOM call fails.
pub fn trigger_download_bytes(
    bytes: &[u8],
    filename: &str,
    mime_type: &str,
) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;
    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    with_object_url(
        &url,
        |url| {
            anchor.set_href(url);
            anchor.set_download(filename);
            body.append_child(&anchor)?;
            anchor.click();
            // The download has started; cleanup failures are not download failures.
            let _ = body.remove_child(&anchor);
            Ok(())
        },
        |url| {
            let _ = web_sys::Url::revoke_object_url(url);
        },
    )
}

/// Run `use_url`, then `revoke` the URL whatever the outcome.
fn with_object_url<T>(
    url: &str,
    use_url: impl FnOnce(&str) -> Result<T, DownloadError>,
    revoke: impl FnOnce(&str),
) -> Result<T, DownloadError> {
    let result = use_url(url);
    revoke(url);
    result
}
