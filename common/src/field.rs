//! Field kinds understood by the advanced search form.

use serde::{Deserialize, Serialize};

use crate::suggest_option::SuggestOption;

/// Choices of a single-select field share the option shape.
pub type FieldChoice = SuggestOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    #[default]
    FreeText,
    SingleSelect,
    Date,
    DateRange,
    /// Row action column (edit/delete buttons); never searchable.
    Action,
    /// Anything a page declares that this form does not know; rendered as free text.
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    pub fn is_searchable(self) -> bool {
        !matches!(self, FieldKind::Action)
    }
}
