//! URL-keyed cache of decoded assets (sans-IO).
//!
//! The cache only tracks state; fetching is the caller's job.
//! [`AssetCache::request`] answers "should I start a fetch for this URL?"
//! exactly once per URL, which gives at most one in-flight fetch per URL
//! and reuse of the decoded result for every later render.
//!
//! A failed URL stays [`AssetState::Failed`] and is never re-requested;
//! consumers treat it like a pending one and draw nothing.

use std::collections::HashMap;
use std::rc::Rc;

use crate::types::{FontArc, Pixmap};

/// Load state of one URL.
#[derive(Debug)]
pub enum AssetState<T> {
    /// A fetch was issued and has not resolved yet.
    Pending,
    /// Decoded and drawable.
    Ready(Rc<T>),
    /// Fetch or decode failed.
    Failed,
}

// Manual impl: `Rc<T>` is `Clone` for any `T`, a derive would demand `T: Clone`.
impl<T> Clone for AssetState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Pending => Self::Pending,
            Self::Ready(v) => Self::Ready(Rc::clone(v)),
            Self::Failed => Self::Failed,
        }
    }
}

/// Decoded assets keyed by URL.
#[derive(Debug)]
pub struct AssetCache<T> {
    entries: HashMap<String, AssetState<T>>,
}

impl<T> AssetCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Mark `url` as wanted.
    ///
    /// Returns `true` the first time a URL is seen, meaning the caller
    /// must fetch it and later call [`resolve`](Self::resolve). Every
    /// later call returns `false`, whatever the URL's state.
    pub fn request(&mut self, url: &str) -> bool {
        if self.entries.contains_key(url) {
            return false;
        }
        self.entries.insert(url.to_owned(), AssetState::Pending);
        true
    }

    /// Record the outcome of a fetch + decode for `url`.
    ///
    /// Results for URLs that are no longer displayed are kept; they are
    /// simply not drawn until a scene references them again.
    pub fn resolve<E>(&mut self, url: &str, result: Result<T, E>) {
        let state = match result {
            Ok(value) => AssetState::Ready(Rc::new(value)),
            Err(_) => AssetState::Failed,
        };
        self.entries.insert(url.to_owned(), state);
    }

    /// The decoded asset, if `url` is ready.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<Rc<T>> {
        match self.entries.get(url) {
            Some(AssetState::Ready(v)) => Some(Rc::clone(v)),
            _ => None,
        }
    }

    /// Current state of `url`, `None` if it was never requested.
    #[must_use]
    pub fn state(&self, url: &str) -> Option<&AssetState<T>> {
        self.entries.get(url)
    }

    /// Returns `true` if `url` was requested and has not resolved yet.
    #[must_use]
    pub fn is_pending(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(AssetState::Pending))
    }

    /// Number of known URLs in any state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no URL was ever requested or resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for AssetCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of everything one rasterization may draw.
#[derive(Debug, Clone, Copy)]
pub struct Assets<'a> {
    /// Decoded images keyed by URL.
    pub images: &'a AssetCache<Pixmap>,
    /// Parsed fonts keyed by URL.
    pub fonts: &'a AssetCache<FontArc>,
}

impl<'a> Assets<'a> {
    /// Bundle an image cache and a font cache.
    #[must_use]
    pub const fn new(images: &'a AssetCache<Pixmap>, fonts: &'a AssetCache<FontArc>) -> Self {
        Self { images, fonts }
    }
}
