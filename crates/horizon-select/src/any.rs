//! Mode-erased combobox.
//!
//! [`Select`] fixes its mode at compile time. When the mode comes from data,
//! as with [`SelectConfig::build`](crate::SelectConfig::build), [`AnySelect`]
//! holds either variant and forwards the mode-independent API.

use horizon_select_core::Signal;

use crate::event::SelectEvent;
use crate::mode::{Multiple, SelectionMode, Single};
use crate::monitor::{OutsideInteractionMonitor, Region};
use crate::option::{OptionId, SelectOption};
use crate::presentation::{Chip, PopoverRow};
use crate::select::Select;

/// A combobox in either selection mode.
pub enum AnySelect {
    Single(Select<Single>),
    Multiple(Select<Multiple>),
}

macro_rules! dispatch {
    ($self:expr, $select:ident => $body:expr) => {
        match $self {
            AnySelect::Single($select) => $body,
            AnySelect::Multiple($select) => $body,
        }
    };
}

impl AnySelect {
    pub fn is_multiple(&self) -> bool {
        matches!(self, AnySelect::Multiple(_))
    }

    pub fn as_single(&self) -> Option<&Select<Single>> {
        match self {
            AnySelect::Single(select) => Some(select),
            AnySelect::Multiple(_) => None,
        }
    }

    pub fn as_single_mut(&mut self) -> Option<&mut Select<Single>> {
        match self {
            AnySelect::Single(select) => Some(select),
            AnySelect::Multiple(_) => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&Select<Multiple>> {
        match self {
            AnySelect::Multiple(select) => Some(select),
            AnySelect::Single(_) => None,
        }
    }

    pub fn as_multiple_mut(&mut self) -> Option<&mut Select<Multiple>> {
        match self {
            AnySelect::Multiple(select) => Some(select),
            AnySelect::Single(_) => None,
        }
    }

    pub fn handle_event(&mut self, event: SelectEvent) -> bool {
        dispatch!(self, select => select.handle_event(event))
    }

    pub fn process_pending(&mut self) -> bool {
        dispatch!(self, select => select.process_pending())
    }

    pub fn input_text(&self) -> &str {
        dispatch!(self, select => select.input_text())
    }

    pub fn is_open(&self) -> bool {
        dispatch!(self, select => select.is_open())
    }

    pub fn highlighted_index(&self) -> usize {
        dispatch!(self, select => select.highlighted_index())
    }

    pub fn filtered(&self) -> Vec<&SelectOption> {
        dispatch!(self, select => select.filtered())
    }

    pub fn options(&self) -> &[SelectOption] {
        dispatch!(self, select => select.options())
    }

    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        dispatch!(self, select => select.set_options(options))
    }

    pub fn selected(&self) -> Vec<&SelectOption> {
        dispatch!(self, select => select.selected())
    }

    /// Supply the selection snapshot as a list of ids.
    ///
    /// Ids missing from the option set are skipped.
    pub fn set_selected_ids(&mut self, ids: &[OptionId]) {
        dispatch!(self, select => {
            let selected = resolve_ids(select.options(), ids);
            set_from_selected(select, selected);
        })
    }

    pub fn rows(&self) -> Vec<PopoverRow> {
        dispatch!(self, select => select.rows())
    }

    pub fn chips(&self) -> Vec<Chip> {
        dispatch!(self, select => select.chips())
    }

    pub fn popover_visible(&self) -> bool {
        dispatch!(self, select => select.popover_visible())
    }

    pub fn clear_visible(&self) -> bool {
        dispatch!(self, select => select.clear_visible())
    }

    pub fn can_create(&self) -> bool {
        dispatch!(self, select => select.can_create())
    }

    pub fn placeholder(&self) -> &str {
        dispatch!(self, select => select.placeholder())
    }

    pub fn has_error(&self) -> bool {
        dispatch!(self, select => select.has_error())
    }

    pub fn set_error(&mut self, error: bool) {
        dispatch!(self, select => select.set_error(error))
    }

    pub fn region(&self) -> &Region {
        dispatch!(self, select => select.region())
    }

    pub fn attach_monitor(&mut self, monitor: &dyn OutsideInteractionMonitor) {
        dispatch!(self, select => select.attach_monitor(monitor))
    }

    pub fn detach_monitor(&mut self) {
        dispatch!(self, select => select.detach_monitor())
    }

    /// The `option_added` signal of the wrapped widget.
    pub fn option_added(&self) -> &Signal<SelectOption> {
        dispatch!(self, select => &select.option_added)
    }

    /// The `popup_toggled` signal of the wrapped widget.
    pub fn popup_toggled(&self) -> &Signal<bool> {
        dispatch!(self, select => &select.popup_toggled)
    }

    /// The `focus_requested` signal of the wrapped widget.
    pub fn focus_requested(&self) -> &Signal<()> {
        dispatch!(self, select => &select.focus_requested)
    }
}

fn resolve_ids(options: &[SelectOption], ids: &[OptionId]) -> Vec<SelectOption> {
    ids.iter()
        .filter_map(|id| options.iter().find(|option| option.id == *id))
        .cloned()
        .collect()
}

fn set_from_selected<M: SelectionMode>(select: &mut Select<M>, selected: Vec<SelectOption>) {
    select.set_value(M::from_selected(selected));
}

impl From<Select<Single>> for AnySelect {
    fn from(select: Select<Single>) -> Self {
        AnySelect::Single(select)
    }
}

impl From<Select<Multiple>> for AnySelect {
    fn from(select: Select<Multiple>) -> Self {
        AnySelect::Multiple(select)
    }
}

static_assertions::assert_impl_all!(AnySelect: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Key;

    fn people() -> Vec<SelectOption> {
        vec![SelectOption::new(1, "Alice"), SelectOption::new(2, "Bob")]
    }

    #[test]
    fn test_variant_access() {
        let single: AnySelect = Select::<Single>::new(people()).into();
        assert!(!single.is_multiple());
        assert!(single.as_single().is_some());
        assert!(single.as_multiple().is_none());

        let multiple: AnySelect = Select::<Multiple>::new(people()).into();
        assert!(multiple.is_multiple());
        assert!(multiple.as_multiple().is_some());
    }

    #[test]
    fn test_forwarded_events() {
        let mut select: AnySelect = Select::<Single>::new(people()).into();
        assert!(select.handle_event(SelectEvent::InputChanged("bo".to_string())));
        assert!(select.is_open());
        assert_eq!(select.filtered().len(), 1);

        select.handle_event(SelectEvent::KeyPressed(Key::Escape));
        assert!(!select.is_open());
    }

    #[test]
    fn test_set_selected_ids() {
        let mut multiple: AnySelect = Select::<Multiple>::new(people()).into();
        multiple.set_selected_ids(&[OptionId(2), OptionId(9), OptionId(1)]);
        let names: Vec<&str> = multiple.selected().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);

        let mut single: AnySelect = Select::<Single>::new(people()).into();
        single.set_selected_ids(&[OptionId(2)]);
        assert_eq!(single.input_text(), "Bob");
    }
}
