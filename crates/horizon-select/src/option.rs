//! Option data model.
//!
//! A [`SelectOption`] is a candidate item supplied by the host. Identity is
//! carried by [`OptionId`] alone; two options with equal ids are the same
//! option even if their display names differ.

use std::collections::HashSet;
use std::fmt;

use chrono::Utc;
use horizon_select_core::logging::targets;
use serde::{Deserialize, Serialize};

/// Stable identity of a [`SelectOption`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(pub u64);

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OptionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Availability of an option.
///
/// Paused options stay visible in the candidate list but can never be
/// committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionStatus {
    #[default]
    Active,
    Paused,
}

/// A candidate item with a stable identity and a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stable identity.
    pub id: OptionId,
    /// Display name, also the text the candidate filter matches against.
    pub name: String,
    /// Whether the option may be committed.
    #[serde(default)]
    pub status: OptionStatus,
    /// Secondary text shown under the name by the default row rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Avatar image reference for hosts that draw one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl SelectOption {
    /// Create an active option.
    pub fn new(id: impl Into<OptionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: OptionStatus::Active,
            detail: None,
            avatar: None,
        }
    }

    /// Set the status using builder pattern.
    pub fn with_status(mut self, status: OptionStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark the option as paused.
    pub fn paused(self) -> Self {
        self.with_status(OptionStatus::Paused)
    }

    /// Set the secondary text using builder pattern.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the avatar reference using builder pattern.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn is_paused(&self) -> bool {
        self.status == OptionStatus::Paused
    }

    /// Identity comparison.
    pub fn same_as(&self, other: &SelectOption) -> bool {
        self.id == other.id
    }
}

/// Generates ids for options created from typed text.
///
/// Ids are derived from the wall clock in epoch milliseconds, but are
/// strictly increasing per generator and greater than every id in the option
/// set passed to [`next_id`](Self::next_id). Once the id space above the
/// existing ids is exhausted, the highest unused id is handed out instead.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce an id distinct from every id in `existing` and from the id
    /// this generator handed out last.
    pub fn next_id(&mut self, existing: &[SelectOption]) -> OptionId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let above_existing = match existing.iter().map(|option| option.id.0).max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        };

        let id = match (above_existing, self.last.checked_add(1)) {
            (Some(above_existing), Some(after_last)) => now.max(after_last).max(above_existing),
            _ => {
                let taken: HashSet<u64> = existing.iter().map(|option| option.id.0).collect();
                let id = (0..=u64::MAX)
                    .rev()
                    .find(|id| *id != self.last && !taken.contains(id))
                    .unwrap_or_default();
                tracing::debug!(target: targets::SELECT, id, "id space exhausted, reusing a gap");
                id
            }
        };
        self.last = id;
        OptionId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_builder() {
        let option = SelectOption::new(1, "Alice")
            .with_detail("alice@example.com")
            .paused();

        assert_eq!(option.id, OptionId(1));
        assert_eq!(option.name, "Alice");
        assert!(option.is_paused());
        assert_eq!(option.detail.as_deref(), Some("alice@example.com"));
        assert!(option.avatar.is_none());
    }

    #[test]
    fn test_identity_ignores_name() {
        let a = SelectOption::new(7, "Alice");
        let renamed = SelectOption::new(7, "Alicia");
        let other = SelectOption::new(8, "Alice");

        assert!(a.same_as(&renamed));
        assert!(!a.same_as(&other));
    }

    #[test]
    fn test_id_generator_is_strictly_increasing() {
        let mut generator = IdGenerator::new();
        let first = generator.next_id(&[]);
        let second = generator.next_id(&[]);
        let third = generator.next_id(&[]);

        assert!(second > first);
        assert!(third > second);
    }

    #[test]
    fn test_id_generator_skips_existing_ids() {
        let far_future = u64::MAX / 2;
        let existing = vec![SelectOption::new(far_future, "Later")];

        let mut generator = IdGenerator::new();
        let id = generator.next_id(&existing);
        assert_eq!(id, OptionId(far_future + 1));
    }

    #[test]
    fn test_id_generator_at_max_id() {
        let existing = vec![
            SelectOption::new(u64::MAX, "Max"),
            SelectOption::new(u64::MAX - 1, "Almost"),
        ];

        let mut generator = IdGenerator::new();
        let first = generator.next_id(&existing);
        assert_eq!(first, OptionId(u64::MAX - 2));
        assert!(existing.iter().all(|option| option.id != first));

        let second = generator.next_id(&existing);
        assert_ne!(second, first);
        assert!(existing.iter().all(|option| option.id != second));
    }

    #[test]
    fn test_status_serde_lowercase() {
        let toml_text = "id = 3\nname = \"Carol\"\nstatus = \"paused\"\n";
        let option: SelectOption = toml::from_str(toml_text).unwrap();
        assert_eq!(option.status, OptionStatus::Paused);

        let default_status: SelectOption = toml::from_str("id = 4\nname = \"Dan\"\n").unwrap();
        assert_eq!(default_status.status, OptionStatus::Active);
    }
}
