//! Reactive asset loading for Dioxus.
//!
//! [`AssetLoader`] keeps one [`AssetCache`] per asset type in a signal.
//! `ensure_*` starts at most one fetch per URL; when it completes, the
//! decoded result (or the failure) is written back, which re-runs every
//! effect that reads the cache. A render always reads whatever is in the
//! cache at that moment, so a slow fetch for a URL that is no longer
//! selected is stored but never drawn.

use dioxus::prelude::*;
use mugprint_scene::{
    AssetCache, Assets, FontArc, Pixmap, SceneError, decode_font, decode_image,
};

use crate::fetch::{CrossOrigin, FetchError, fetch_bytes};

/// Errors from a fetch + decode round trip.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] SceneError),
}

/// Signal-backed image and font caches.
#[derive(Clone, Copy, PartialEq)]
pub struct AssetLoader {
    /// Decoded images keyed by URL.
    pub images: Signal<AssetCache<Pixmap>>,
    /// Parsed fonts keyed by URL.
    pub fonts: Signal<AssetCache<FontArc>>,
    cross_origin: CrossOrigin,
}

/// Create the asset caches for a component tree.
///
/// Call once at the root and pass the returned (copyable) handle down.
pub fn use_asset_loader(cross_origin: CrossOrigin) -> AssetLoader {
    let images = use_signal(AssetCache::new);
    let fonts = use_signal(AssetCache::new);
    AssetLoader {
        images,
        fonts,
        cross_origin,
    }
}

impl AssetLoader {
    /// Start loading the image at `url` unless it is already known.
    pub fn ensure_image(self, url: &str) {
        let mut images = self.images;
        // Peek first: a write would notify subscribers even for known URLs.
        let known = images.peek().state(url).is_some();
        if known || !images.write().request(url) {
            return;
        }
        let url = url.to_owned();
        let cross_origin = self.cross_origin;
        spawn(async move {
            let result = load(&url, cross_origin, |bytes| decode_image(&bytes)).await;
            images.write().resolve(&url, result);
        });
    }

    /// Start loading the font at `url` unless it is already known.
    pub fn ensure_font(self, url: &str) {
        let mut fonts = self.fonts;
        let known = fonts.peek().state(url).is_some();
        if known || !fonts.write().request(url) {
            return;
        }
        let url = url.to_owned();
        let cross_origin = self.cross_origin;
        spawn(async move {
            let result = load(&url, cross_origin, decode_font).await;
            fonts.write().resolve(&url, result);
        });
    }

    /// Run `f` with a read-only view of both caches, subscribing the
    /// current reactive scope to them.
    pub fn with_assets<R>(self, f: impl FnOnce(&Assets<'_>) -> R) -> R {
        let images = self.images.read();
        let fonts = self.fonts.read();
        f(&Assets::new(&images, &fonts))
    }

    /// Like [`with_assets`](Self::with_assets), without subscribing.
    /// For event handlers.
    pub fn peek_assets<R>(self, f: impl FnOnce(&Assets<'_>) -> R) -> R {
        let images = self.images.peek();
        let fonts = self.fonts.peek();
        f(&Assets::new(&images, &fonts))
    }
}

/// Fetch and decode one asset, logging failures to the console.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
async fn load<T>(
    url: &str,
    cross_origin: CrossOrigin,
    decode: impl FnOnce(Vec<u8>) -> Result<T, SceneError>,
) -> Result<T, LoadError> {
    let result = match fetch_bytes(url, cross_origin).await {
        Ok(bytes) => decode(bytes).map_err(LoadError::from),
        Err(e) => Err(LoadError::from(e)),
    };
    if let Err(ref e) = result {
        web_sys::console::warn_1(
            &format!("asset {url} (crossorigin={cross_origin}) unavailable: {e}").into(),
        );
    }
    result
}
