//! Events delivered to the combobox by its host.

use crate::option::OptionId;

/// Navigation keys the combobox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Escape,
}

/// A discrete user interaction.
///
/// Indices refer to positions in the currently filtered candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectEvent {
    /// The text field now holds this text.
    InputChanged(String),
    /// The trigger region was activated.
    TriggerClicked,
    /// The pointer entered a candidate row.
    OptionHovered(usize),
    /// A candidate row was clicked.
    OptionClicked(usize),
    /// The "create" row was clicked.
    CreateClicked,
    /// The clear button next to the text field was clicked.
    ClearClicked,
    /// The remove button on a committed chip was clicked.
    ChipRemoveClicked(OptionId),
    /// A key was pressed while the widget had focus.
    KeyPressed(Key),
    /// A pointer-down landed outside the widget.
    OutsidePointerDown,
}
