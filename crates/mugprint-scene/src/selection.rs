//! The user's current choices as an immutable snapshot.
//!
//! Every interaction produces one [`Action`]; [`SelectionState::apply`]
//! returns the next snapshot with exactly that one field replaced, or an
//! error if the action names an entry from the wrong catalog.
//! Nothing is mutated in place, so a snapshot handed to the compositor
//! can never change underneath it.

use crate::catalog::{CatalogEntry, DESIGNS, MUGS};

/// Name shown on a freshly mounted widget.
pub const DEFAULT_DISPLAY_NAME: &str = "POD Software";

/// A single state replacement emitted by one control interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the display name (any string, including empty).
    SetDisplayName(String),
    /// Replace the selected design.
    SelectDesign(&'static CatalogEntry),
    /// Replace the selected mug color.
    SelectMug(&'static CatalogEntry),
}

/// Errors from id-based selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// No design with this id exists.
    #[error("unknown design {id:?} (expected one of: {known})")]
    UnknownDesign {
        /// The rejected id.
        id: String,
        /// Valid ids.
        known: String,
    },

    /// No mug color with this id exists.
    #[error("unknown mug {id:?} (expected one of: {known})")]
    UnknownMug {
        /// The rejected id.
        id: String,
        /// Valid ids.
        known: String,
    },
}

/// The current design, mug color and display name.
///
/// `design` and `mug` are references into the static catalogs, so they
/// always name an existing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Selected printed design.
    pub design: &'static CatalogEntry,
    /// Selected mug color.
    pub mug: &'static CatalogEntry,
    /// Typed display name, unvalidated.
    pub display_name: String,
}

impl SelectionState {
    /// Return the snapshot that results from `action`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownDesign`] or
    /// [`SelectionError::UnknownMug`] if the entry is not in [`DESIGNS`]
    /// or [`MUGS`] respectively, such as a mug passed as a design.
    pub fn apply(&self, action: Action) -> Result<Self, SelectionError> {
        match action {
            Action::SetDisplayName(display_name) => Ok(Self {
                display_name,
                ..self.clone()
            }),
            Action::SelectDesign(design) if DESIGNS.contains(design) => Ok(Self {
                design,
                ..self.clone()
            }),
            Action::SelectDesign(other) => Err(SelectionError::UnknownDesign {
                id: other.id.to_owned(),
                known: DESIGNS.ids(),
            }),
            Action::SelectMug(mug) if MUGS.contains(mug) => Ok(Self { mug, ..self.clone() }),
            Action::SelectMug(other) => Err(SelectionError::UnknownMug {
                id: other.id.to_owned(),
                known: MUGS.ids(),
            }),
        }
    }

    /// Select a design by catalog id.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownDesign`] if `id` is not in
    /// [`DESIGNS`]; the current snapshot is left untouched.
    pub fn select_design_by_id(&self, id: &str) -> Result<Self, SelectionError> {
        let entry = DESIGNS
            .get(id)
            .ok_or_else(|| SelectionError::UnknownDesign {
                id: id.to_owned(),
                known: DESIGNS.ids(),
            })?;
        self.apply(Action::SelectDesign(entry))
    }

    /// Select a mug color by catalog id.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownMug`] if `id` is not in [`MUGS`].
    pub fn select_mug_by_id(&self, id: &str) -> Result<Self, SelectionError> {
        let entry = MUGS.get(id).ok_or_else(|| SelectionError::UnknownMug {
            id: id.to_owned(),
            known: MUGS.ids(),
        })?;
        self.apply(Action::SelectMug(entry))
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            design: DESIGNS.first(),
            mug: MUGS.first(),
            display_name: DEFAULT_DISPLAY_NAME.to_owned(),
        }
    }
}
