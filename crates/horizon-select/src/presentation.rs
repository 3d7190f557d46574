//! What the popover and the chip row show.
//!
//! The combobox does not draw. It describes rows and chips so that a
//! renderer can paint them; custom labels come from [`RenderFn`] overrides.

use std::sync::Arc;

use crate::option::SelectOption;

/// Produces the display label of an option.
pub type RenderFn = Arc<dyn Fn(&SelectOption) -> String + Send + Sync>;

/// Label used when no override is installed.
pub fn default_label(option: &SelectOption) -> String {
    match &option.detail {
        Some(detail) => format!("{}\n{}", option.name, detail),
        None => option.name.clone(),
    }
}

/// One candidate in the popover.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    /// Position in the filtered candidate list.
    pub index: usize,
    pub option: SelectOption,
    pub label: String,
    /// The row holds the keyboard highlight.
    pub highlighted: bool,
    /// Check mark; only shown in multiple mode.
    pub checked: bool,
    /// Paused rows are drawn but inert.
    pub disabled: bool,
}

/// A row in the popover.
#[derive(Debug, Clone, PartialEq)]
pub enum PopoverRow {
    Candidate(CandidateRow),
    /// Offer to create an option named `text`.
    Create { text: String },
}

/// A committed option shown in the chip row (multiple mode).
#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    pub option: SelectOption,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label() {
        assert_eq!(default_label(&SelectOption::new(1, "Alice")), "Alice");
        let with_detail = SelectOption::new(1, "Alice").with_detail("alice@example.com");
        assert_eq!(default_label(&with_detail), "Alice\nalice@example.com");
    }
}
