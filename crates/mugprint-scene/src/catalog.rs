//! Static catalogs of selectable designs and mug colors.
//!
//! Entries are compiled into the binary and never change at runtime, so
//! the rest of the crate refers to them by `&'static` reference.

use serde::Serialize;

/// One selectable option: a printed design or a mug color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogEntry {
    /// Unique identifier within its catalog.
    pub id: &'static str,
    /// Image URL (site-relative path or absolute URL).
    pub image_url: &'static str,
    /// Display label shown in the control panel.
    pub label: &'static str,
}

/// A printed design option.
pub type DesignOption = CatalogEntry;

/// A mug color option; its image is the full mug background.
pub type MugOption = CatalogEntry;

/// A non-empty, ordered list of catalog entries.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [CatalogEntry],
}

impl Catalog {
    /// Wrap a static entry list.
    ///
    /// Evaluated at compile time for the built-in catalogs; an empty
    /// list fails the build.
    #[must_use]
    pub const fn new(entries: &'static [CatalogEntry]) -> Self {
        assert!(!entries.is_empty(), "a catalog needs at least one entry");
        Self { entries }
    }

    /// The default entry.
    #[must_use]
    pub const fn first(&self) -> &'static CatalogEntry {
        let entries = self.entries;
        &entries[0]
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'static CatalogEntry> {
        let entries = self.entries;
        entries.iter().find(|e| e.id == id)
    }

    /// All entries in display order.
    #[must_use]
    pub const fn entries(&self) -> &'static [CatalogEntry] {
        self.entries
    }

    /// Returns `true` if `entry` is one of this catalog's entries.
    #[must_use]
    pub fn contains(&self, entry: &CatalogEntry) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Comma-separated list of ids, for error messages.
    #[must_use]
    pub fn ids(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.id)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Printed designs, in grid order.
pub static DESIGNS: Catalog = Catalog::new(&[
    CatalogEntry {
        id: "d1",
        image_url: "/252.WZ8NN690c239fdfb87.preview.webp",
        label: "🎨 Design 1",
    },
    CatalogEntry {
        id: "d2",
        image_url: "/252.JTV2F690c23aac3f28.preview.webp",
        label: "🎨 Design 2",
    },
    CatalogEntry {
        id: "d3",
        image_url: "/252.U08VQ690c23ae2b567.preview.webp",
        label: "🎨 Design 3",
    },
]);

/// Mug colors, in grid order.
pub static MUGS: Catalog = Catalog::new(&[
    CatalogEntry {
        id: "white",
        image_url: "/front.png",
        label: "⚪ Trắng",
    },
    CatalogEntry {
        id: "black",
        image_url: "/mug-black.png",
        label: "⚫ Đen",
    },
]);
