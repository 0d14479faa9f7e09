//! Asset fetching with the browser `fetch()` API.
//!
//! Pixels of every catalog image end up in the exported PNG, so remote
//! assets must be fetched with CORS rather than as opaque responses.

use std::fmt;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{RequestCredentials, RequestMode};

/// Cross-origin mode for an asset request, mirroring the HTML
/// `crossorigin` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossOrigin {
    /// CORS request without credentials for other origins.
    #[default]
    Anonymous,
    /// CORS request that always sends credentials.
    UseCredentials,
}

impl CrossOrigin {
    const fn credentials(self) -> RequestCredentials {
        match self {
            Self::Anonymous => RequestCredentials::SameOrigin,
            Self::UseCredentials => RequestCredentials::Include,
        }
    }
}

impl fmt::Display for CrossOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Anonymous => "anonymous",
            Self::UseCredentials => "use-credentials",
        })
    }
}

/// Errors that can occur while fetching an asset.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("GET {url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// A browser API call returned an error (network failure, CORS
    /// rejection, ...).
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Fetch `url` and return the response body.
///
/// # Errors
///
/// Returns [`FetchError::Status`] for a non-2xx response and
/// [`FetchError::JsError`] if the request cannot be built or the
/// network/CORS layer rejects it.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn fetch_bytes(url: &str, cross_origin: CrossOrigin) -> Result<Vec<u8>, FetchError> {
    let window =
        web_sys::window().ok_or_else(|| FetchError::JsError("no global window".into()))?;

    let init = web_sys::RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::Cors);
    init.set_credentials(cross_origin.credentials());
    let request = web_sys::Request::new_with_str_and_init(url, &init)?;

    let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()
        .map_err(|e| FetchError::JsError(format!("not a Response: {e:?}")))?;

    if !response.ok() {
        return Err(FetchError::Status {
            url: url.to_owned(),
            status: response.status(),
        });
    }

    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
