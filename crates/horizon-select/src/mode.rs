//! Selection strategies.
//!
//! The shape of the committed value and the commit rules differ between
//! single and multiple selection. Each mode is a zero-sized type
//! implementing [`SelectionMode`], and [`Select`](crate::Select) is generic
//! over it, so the mode is fixed when the widget is constructed.

use std::fmt;

use crate::option::SelectOption;

/// The outcome of a commit that changes the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit<V> {
    /// The proposed new selection, sent to the host.
    pub value: V,
    /// Whether the popover closes after the commit.
    pub close: bool,
    /// Text the input buffer takes after the commit, if it changes.
    pub input_text: Option<String>,
}

/// A selection strategy.
pub trait SelectionMode: Send + Sync + 'static {
    /// The committed value as seen by the host.
    type Value: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Whether the mode holds a set of options.
    const MULTIPLE: bool;

    /// Whether `option` is part of `value`, by identity.
    fn is_selected(value: &Self::Value, option: &SelectOption) -> bool;

    /// Compute the commit of `option` against `value`.
    ///
    /// Returns `None` when the commit would not change anything and no
    /// notification must be sent.
    fn commit(value: &Self::Value, option: &SelectOption) -> Option<Commit<Self::Value>>;

    /// The committed options, in order.
    fn selected(value: &Self::Value) -> Vec<&SelectOption>;

    /// Build a value from a list of committed options.
    fn from_selected(options: Vec<SelectOption>) -> Self::Value;

    /// Text the input buffer takes when the host supplies a new value.
    fn text_for_new_value(value: &Self::Value) -> Option<String>;

    /// Text the input buffer must show while the popover is closed.
    fn text_while_closed(value: &Self::Value) -> Option<&str>;
}

/// Zero-or-one selected option.
#[derive(Debug, Clone, Copy, Default)]
pub struct Single;

impl SelectionMode for Single {
    type Value = Option<SelectOption>;

    const MULTIPLE: bool = false;

    fn is_selected(value: &Self::Value, option: &SelectOption) -> bool {
        value.as_ref().is_some_and(|current| current.same_as(option))
    }

    fn commit(value: &Self::Value, option: &SelectOption) -> Option<Commit<Self::Value>> {
        if Self::is_selected(value, option) {
            return None;
        }
        Some(Commit {
            value: Some(option.clone()),
            close: true,
            input_text: Some(option.name.clone()),
        })
    }

    fn selected(value: &Self::Value) -> Vec<&SelectOption> {
        value.iter().collect()
    }

    fn from_selected(options: Vec<SelectOption>) -> Self::Value {
        options.into_iter().next()
    }

    fn text_for_new_value(value: &Self::Value) -> Option<String> {
        value.as_ref().map(|option| option.name.clone())
    }

    fn text_while_closed(value: &Self::Value) -> Option<&str> {
        value.as_ref().map(|option| option.name.as_str())
    }
}

/// An ordered set of selected options with toggle semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Multiple;

impl SelectionMode for Multiple {
    type Value = Vec<SelectOption>;

    const MULTIPLE: bool = true;

    fn is_selected(value: &Self::Value, option: &SelectOption) -> bool {
        value.iter().any(|current| current.same_as(option))
    }

    fn commit(value: &Self::Value, option: &SelectOption) -> Option<Commit<Self::Value>> {
        let next = if Self::is_selected(value, option) {
            value
                .iter()
                .filter(|current| !current.same_as(option))
                .cloned()
                .collect()
        } else {
            let mut next = value.clone();
            next.push(option.clone());
            next
        };

        Some(Commit {
            value: next,
            close: false,
            input_text: None,
        })
    }

    fn selected(value: &Self::Value) -> Vec<&SelectOption> {
        value.iter().collect()
    }

    fn from_selected(options: Vec<SelectOption>) -> Self::Value {
        options
    }

    fn text_for_new_value(_value: &Self::Value) -> Option<String> {
        Some(String::new())
    }

    fn text_while_closed(_value: &Self::Value) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> SelectOption {
        SelectOption::new(1, "Alice")
    }

    fn bob() -> SelectOption {
        SelectOption::new(2, "Bob")
    }

    #[test]
    fn test_single_commit_distinct_closes() {
        let commit = Single::commit(&None, &alice()).unwrap();
        assert_eq!(commit.value, Some(alice()));
        assert!(commit.close);
        assert_eq!(commit.input_text.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_single_recommit_is_noop() {
        assert!(Single::commit(&Some(alice()), &alice()).is_none());
        // Identity, not name, decides.
        let renamed = SelectOption::new(1, "Alicia");
        assert!(Single::commit(&Some(alice()), &renamed).is_none());
    }

    #[test]
    fn test_single_replaces_selection() {
        let commit = Single::commit(&Some(alice()), &bob()).unwrap();
        assert_eq!(commit.value, Some(bob()));
    }

    #[test]
    fn test_multiple_toggle_appends_then_removes() {
        let added = Multiple::commit(&vec![alice()], &bob()).unwrap();
        assert_eq!(added.value, vec![alice(), bob()]);
        assert!(!added.close);
        assert!(added.input_text.is_none());

        let removed = Multiple::commit(&added.value, &alice()).unwrap();
        assert_eq!(removed.value, vec![bob()]);
    }

    #[test]
    fn test_multiple_toggle_is_involution() {
        let start = vec![alice(), bob()];
        let carol = SelectOption::new(3, "Carol");
        for option in [alice(), bob(), carol] {
            let once = Multiple::commit(&start, &option).unwrap().value;
            let twice = Multiple::commit(&once, &option).unwrap().value;
            let mut sorted_start: Vec<_> = start.iter().map(|o| o.id).collect();
            let mut sorted_twice: Vec<_> = twice.iter().map(|o| o.id).collect();
            sorted_start.sort();
            sorted_twice.sort();
            assert_eq!(sorted_start, sorted_twice);
        }
    }

    #[test]
    fn test_text_rules() {
        assert_eq!(Single::text_for_new_value(&Some(bob())), Some("Bob".to_string()));
        assert_eq!(Single::text_for_new_value(&None), None);
        assert_eq!(Single::text_while_closed(&Some(bob())), Some("Bob"));

        assert_eq!(Multiple::text_for_new_value(&vec![bob()]), Some(String::new()));
        assert_eq!(Multiple::text_while_closed(&vec![bob()]), None);
    }

    #[test]
    fn test_from_selected() {
        assert_eq!(Single::from_selected(vec![alice(), bob()]), Some(alice()));
        assert_eq!(Single::from_selected(Vec::new()), None);
        assert_eq!(Multiple::from_selected(vec![alice()]), vec![alice()]);
    }
}
