//! Candidate filtering.
//!
//! The visible candidate list is a pure function of the typed text and the
//! full option set: every option whose name contains the text as a
//! case-insensitive substring, in list order.

use horizon_select_core::logging::targets;

use crate::option::SelectOption;

/// Whether `name` contains `query`, ignoring case.
///
/// An empty query matches everything.
pub fn matches(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Return the options whose name matches `query`, preserving their order.
pub fn filter_candidates<'a>(query: &str, options: &'a [SelectOption]) -> Vec<&'a SelectOption> {
    let filtered: Vec<&SelectOption> = options
        .iter()
        .filter(|option| matches(&option.name, query))
        .collect();

    tracing::trace!(
        target: targets::FILTER,
        query,
        total = options.len(),
        matched = filtered.len(),
        "filtered candidates"
    );
    filtered
}
