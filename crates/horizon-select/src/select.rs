//! The combobox state machine.
//!
//! [`Select`] owns the transient view state of a combobox: the typed text,
//! whether the popover is open and which candidate holds the keyboard
//! highlight. The committed selection belongs to the host. The widget reads
//! the last snapshot the host supplied and proposes changes through
//! [`Select::selection_proposed`]; the host answers, if it wants to, with
//! [`Select::set_value`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use horizon_select::{Select, SelectOption, Single};
//!
//! let mut select = Select::<Single>::new(vec![
//!     SelectOption::new(1, "Alice"),
//!     SelectOption::new(2, "Bob"),
//! ]);
//!
//! let proposals = Arc::new(Mutex::new(Vec::new()));
//! let sink = proposals.clone();
//! select.selection_proposed.connect(move |value| sink.lock().push(value.clone()));
//!
//! select.set_input_text("ali");
//! assert!(select.is_open());
//! assert_eq!(select.filtered().len(), 1);
//!
//! select.commit_index(0);
//! assert_eq!(select.input_text(), "Alice");
//! assert!(!select.is_open());
//!
//! // The host applies the proposal.
//! let accepted = proposals.lock().pop().unwrap();
//! select.set_value(accepted);
//! ```

use std::marker::PhantomData;
use std::ops::Range;

use crossbeam_channel::{Receiver, Sender};
use horizon_select_core::logging::targets;
use horizon_select_core::{Property, Rect, Signal};

use crate::event::{Key, SelectEvent};
use crate::filter::filter_candidates;
use crate::mode::SelectionMode;
use crate::monitor::{OutsideInteractionMonitor, Region, WatchGuard};
use crate::option::{IdGenerator, OptionId, SelectOption};
use crate::presentation::{default_label, CandidateRow, Chip, PopoverRow, RenderFn};
use crate::sizing;

/// Default number of rows shown before the popover scrolls.
pub const DEFAULT_MAX_VISIBLE_ITEMS: usize = 10;

/// A combobox with free-text filtering.
///
/// The selection mode `M` is fixed at construction: [`Single`](crate::Single)
/// or [`Multiple`](crate::Multiple).
///
/// # Signals
///
/// - `selection_proposed(M::Value)`: a commit asks the host to adopt this selection
/// - `option_added(SelectOption)`: a typed-in option should join the host's option set
/// - `popup_toggled(bool)`: the popover opened or closed
/// - `focus_requested(())`: the host should keep keyboard focus in the text field
pub struct Select<M: SelectionMode> {
    /// Candidate options, as last supplied by the host.
    options: Vec<SelectOption>,
    /// Selection snapshot, as last supplied by the host.
    value: M::Value,

    /// Text in the search field.
    input_text: String,
    /// Whether the popover is open.
    open: Property<bool>,
    /// Cursor into the filtered candidate list.
    highlighted_index: usize,
    /// First row of the scroll window.
    scroll_offset: usize,
    /// Rows shown before the popover scrolls.
    max_visible_items: usize,

    placeholder: String,
    error: bool,
    render_option: Option<RenderFn>,
    render_value: Option<RenderFn>,

    id_generator: IdGenerator,

    /// Bounds handed to the outside-interaction monitor.
    region: Region,
    outside_tx: Sender<()>,
    outside_rx: Receiver<()>,
    watch: Option<WatchGuard>,

    // Signals
    /// Signal emitted with the proposed new selection.
    pub selection_proposed: Signal<M::Value>,
    /// Signal emitted with an option created from typed text, before it is committed.
    pub option_added: Signal<SelectOption>,
    /// Signal emitted when the popover opens (`true`) or closes (`false`).
    pub popup_toggled: Signal<bool>,
    /// Signal emitted when the text field should keep focus.
    pub focus_requested: Signal<()>,

    _mode: PhantomData<fn() -> M>,
}

impl<M: SelectionMode> Select<M> {
    /// Create a combobox over `options` with an empty selection.
    pub fn new(options: Vec<SelectOption>) -> Self {
        let (outside_tx, outside_rx) = crossbeam_channel::bounded(1);
        Self {
            options,
            value: M::Value::default(),
            input_text: String::new(),
            open: Property::new(false),
            highlighted_index: 0,
            scroll_offset: 0,
            max_visible_items: DEFAULT_MAX_VISIBLE_ITEMS,
            placeholder: String::new(),
            error: false,
            render_option: None,
            render_value: None,
            id_generator: IdGenerator::new(),
            region: Region::default(),
            outside_tx,
            outside_rx,
            watch: None,
            selection_proposed: Signal::new(),
            option_added: Signal::new(),
            popup_toggled: Signal::new(),
            focus_requested: Signal::new(),
            _mode: PhantomData,
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Set the initial selection using builder pattern.
    pub fn with_value(mut self, value: M::Value) -> Self {
        self.set_value(value);
        self
    }

    /// Set placeholder text using builder pattern.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Set the error flag using builder pattern.
    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    /// Set max visible items using builder pattern.
    pub fn with_max_visible_items(mut self, count: usize) -> Self {
        self.max_visible_items = count.max(1);
        self
    }

    /// Override the label of candidate rows.
    pub fn with_render_option<F>(mut self, render: F) -> Self
    where
        F: Fn(&SelectOption) -> String + Send + Sync + 'static,
    {
        self.render_option = Some(std::sync::Arc::new(render));
        self
    }

    /// Override the label of committed chips.
    pub fn with_render_value<F>(mut self, render: F) -> Self
    where
        F: Fn(&SelectOption) -> String + Send + Sync + 'static,
    {
        self.render_value = Some(std::sync::Arc::new(render));
        self
    }

    /// Set the widget bounds using builder pattern.
    pub fn with_bounds(self, bounds: Rect) -> Self {
        self.region.set_bounds(bounds);
        self
    }

    // =========================================================================
    // Host data
    // =========================================================================

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replace the candidate options.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.settle();
    }

    /// The selection snapshot last supplied by the host.
    pub fn value(&self) -> &M::Value {
        &self.value
    }

    /// Supply a new selection snapshot.
    ///
    /// When the snapshot differs from the previous one, the search field is
    /// resynchronized: single mode shows the selected name, multiple mode
    /// clears the search text.
    pub fn set_value(&mut self, value: M::Value) {
        if self.value == value {
            return;
        }
        self.value = value;

        if let Some(text) = M::text_for_new_value(&self.value)
            && text != self.input_text
        {
            self.input_text = text;
            self.reset_highlight();
        }
        self.settle();
    }

    /// The committed options, in order.
    pub fn selected(&self) -> Vec<&SelectOption> {
        M::selected(&self.value)
    }

    pub fn is_selected(&self, option: &SelectOption) -> bool {
        M::is_selected(&self.value, option)
    }

    pub fn is_multiple(&self) -> bool {
        M::MULTIPLE
    }

    // =========================================================================
    // View state
    // =========================================================================

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted_index
    }

    /// The highlighted candidate, if the filtered list is not empty.
    pub fn highlighted(&self) -> Option<&SelectOption> {
        self.filtered().get(self.highlighted_index).copied()
    }

    /// Candidates matching the current text.
    pub fn filtered(&self) -> Vec<&SelectOption> {
        filter_candidates(&self.input_text, &self.options)
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    pub fn max_visible_items(&self) -> usize {
        self.max_visible_items
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Whether typed text can be turned into a new option right now.
    ///
    /// Requires a connected `option_added` slot, non-empty text and no
    /// matching candidate.
    pub fn can_create(&self) -> bool {
        self.option_added.is_connected()
            && !self.input_text.is_empty()
            && self.filtered().is_empty()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// The user edited the search field.
    ///
    /// Non-empty text opens the popover. The highlight returns to the first
    /// candidate because the candidate list changed.
    pub fn set_input_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.input_text {
            return false;
        }

        self.input_text = text;
        self.reset_highlight();
        if !self.input_text.is_empty() {
            self.set_open(true);
        }
        self.settle();
        true
    }

    /// The trigger region was activated: toggle the popover.
    pub fn activate_trigger(&mut self) {
        self.toggle_popup();
        if M::MULTIPLE {
            self.focus_requested.emit(());
        }
    }

    pub fn show_popup(&mut self) {
        self.set_open(true);
        self.settle();
    }

    pub fn hide_popup(&mut self) {
        self.set_open(false);
        self.settle();
    }

    pub fn toggle_popup(&mut self) {
        if self.is_open() {
            self.hide_popup();
        } else {
            self.show_popup();
        }
    }

    /// The pointer entered the candidate at `index`.
    pub fn hover(&mut self, index: usize) -> bool {
        if index >= self.filtered().len() {
            return false;
        }
        self.highlighted_index = index;
        self.ensure_highlighted_visible();
        true
    }

    /// Commit `option` according to the selection mode.
    ///
    /// Paused options are rejected. A commit that would not change the
    /// selection sends no notification. Returns whether a change was proposed.
    pub fn commit(&mut self, option: &SelectOption) -> bool {
        if option.is_paused() {
            tracing::trace!(target: targets::SELECT, id = %option.id, "rejected commit of paused option");
            return false;
        }

        let Some(commit) = M::commit(&self.value, option) else {
            tracing::trace!(target: targets::SELECT, id = %option.id, "option already selected");
            return false;
        };

        tracing::debug!(
            target: targets::SELECT,
            id = %option.id,
            close = commit.close,
            "proposing selection"
        );
        self.selection_proposed.emit(commit.value);

        if let Some(text) = commit.input_text
            && text != self.input_text
        {
            self.input_text = text;
            self.reset_highlight();
        }
        if commit.close {
            self.set_open(false);
        } else {
            self.focus_requested.emit(());
        }
        self.settle();
        true
    }

    /// Commit the candidate at `index` in the filtered list.
    pub fn commit_index(&mut self, index: usize) -> bool {
        let Some(option) = self.filtered().get(index).map(|option| (*option).clone()) else {
            return false;
        };
        self.commit(&option)
    }

    /// Turn the typed text into a new option.
    ///
    /// The option is announced through `option_added`, committed like any
    /// other option, and the search field is cleared and closed. Returns
    /// `None` when [`can_create`](Self::can_create) is false.
    pub fn create_option(&mut self) -> Option<SelectOption> {
        if !self.can_create() {
            return None;
        }

        let id = self.id_generator.next_id(&self.options);
        let option = SelectOption::new(id, self.input_text.clone());
        tracing::debug!(target: targets::SELECT, id = %option.id, name = %option.name, "creating option");

        self.option_added.emit(option.clone());
        self.commit(&option);

        self.input_text.clear();
        self.reset_highlight();
        self.set_open(false);
        self.settle();
        Some(option)
    }

    /// Empty the search field and open the popover.
    pub fn clear_input(&mut self) {
        self.input_text.clear();
        self.reset_highlight();
        self.set_open(true);
        self.settle();
    }

    /// Remove a committed option through its chip.
    ///
    /// Goes through [`commit`](Self::commit), so a paused chip stays.
    pub fn remove_chip(&mut self, id: OptionId) -> bool {
        let Some(option) = M::selected(&self.value)
            .into_iter()
            .find(|option| option.id == id)
            .cloned()
        else {
            return false;
        };
        self.commit(&option)
    }

    /// Handle a navigation key. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        let count = self.filtered().len();

        let handled = match key {
            Key::ArrowDown => {
                if !self.is_open() {
                    self.set_open(true);
                } else if self.highlighted_index + 1 < count {
                    self.highlighted_index += 1;
                    self.ensure_highlighted_visible();
                }
                true
            }
            Key::ArrowUp => {
                if self.is_open() && self.highlighted_index > 0 {
                    self.highlighted_index -= 1;
                    self.ensure_highlighted_visible();
                }
                self.is_open()
            }
            Key::Home => {
                if self.is_open() && count > 0 {
                    self.highlighted_index = 0;
                    self.scroll_offset = 0;
                    true
                } else {
                    false
                }
            }
            Key::End => {
                if self.is_open() && count > 0 {
                    self.highlighted_index = count - 1;
                    self.ensure_highlighted_visible();
                    true
                } else {
                    false
                }
            }
            Key::Enter => {
                if !self.is_open() {
                    self.set_open(true);
                    true
                } else if count > 0 {
                    self.commit_index(self.highlighted_index)
                } else {
                    self.create_option().is_some()
                }
            }
            Key::Escape => {
                if self.is_open() {
                    self.set_open(false);
                    true
                } else {
                    false
                }
            }
        };

        self.settle();
        handled
    }

    /// Dispatch a user interaction. Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: SelectEvent) -> bool {
        self.process_pending();

        let handled = match event {
            SelectEvent::InputChanged(text) => self.set_input_text(text),
            SelectEvent::TriggerClicked => {
                self.activate_trigger();
                true
            }
            SelectEvent::OptionHovered(index) => self.hover(index),
            SelectEvent::OptionClicked(index) => self.commit_index(index),
            SelectEvent::CreateClicked => self.create_option().is_some(),
            SelectEvent::ClearClicked => {
                self.clear_input();
                true
            }
            SelectEvent::ChipRemoveClicked(id) => self.remove_chip(id),
            SelectEvent::KeyPressed(key) => self.handle_key(key),
            SelectEvent::OutsidePointerDown => self.close_from_outside(),
        };

        self.settle();
        handled
    }

    // =========================================================================
    // Outside interaction
    // =========================================================================

    /// Register this widget's region with `monitor`.
    ///
    /// Notifications are queued and applied by [`process_pending`](Self::process_pending),
    /// which [`handle_event`](Self::handle_event) calls first. At most one
    /// notification is queued; further ones merge into it. Any previous
    /// registration is dropped.
    pub fn attach_monitor(&mut self, monitor: &dyn OutsideInteractionMonitor) {
        let sender = self.outside_tx.clone();
        let guard = monitor.watch(
            self.region.clone(),
            Box::new(move || {
                let _ = sender.try_send(());
            }),
        );
        self.watch = Some(guard);
    }

    /// Stop receiving outside-interaction notifications.
    pub fn detach_monitor(&mut self) {
        self.watch = None;
        while self.outside_rx.try_recv().is_ok() {}
    }

    pub fn is_monitored(&self) -> bool {
        self.watch.is_some()
    }

    /// Apply queued outside-interaction notifications.
    ///
    /// Returns whether any were pending.
    pub fn process_pending(&mut self) -> bool {
        let mut pending = false;
        while self.outside_rx.try_recv().is_ok() {
            pending = true;
        }
        if pending {
            self.close_from_outside();
        }
        pending
    }

    fn close_from_outside(&mut self) -> bool {
        let was_open = self.is_open();
        if was_open {
            tracing::debug!(target: targets::SELECT, "closing on outside interaction");
            self.set_open(false);
            self.settle();
        }
        was_open
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// The rows of the popover.
    ///
    /// Either one row per candidate, or a single create row when nothing
    /// matches and creation is possible, or nothing at all.
    pub fn rows(&self) -> Vec<PopoverRow> {
        let filtered = self.filtered();
        if filtered.is_empty() {
            if self.can_create() {
                return vec![PopoverRow::Create {
                    text: self.input_text.clone(),
                }];
            }
            return Vec::new();
        }

        filtered
            .into_iter()
            .enumerate()
            .map(|(index, option)| {
                PopoverRow::Candidate(CandidateRow {
                    index,
                    label: self.option_label(option),
                    highlighted: index == self.highlighted_index,
                    checked: M::MULTIPLE && M::is_selected(&self.value, option),
                    disabled: option.is_paused(),
                    option: option.clone(),
                })
            })
            .collect()
    }

    /// Whether the popover has anything to show.
    pub fn popover_visible(&self) -> bool {
        self.is_open() && !self.rows().is_empty()
    }

    /// Whether the clear button is shown (single mode, non-empty text).
    pub fn clear_visible(&self) -> bool {
        !M::MULTIPLE && !self.input_text.is_empty()
    }

    /// The range of rows inside the scroll window.
    pub fn visible_window(&self) -> Range<usize> {
        let count = self.rows().len();
        let start = self.scroll_offset.min(count);
        let end = (start + self.max_visible_items).min(count);
        start..end
    }

    /// The committed chips (multiple mode only).
    pub fn chips(&self) -> Vec<Chip> {
        if !M::MULTIPLE {
            return Vec::new();
        }
        M::selected(&self.value)
            .into_iter()
            .map(|option| Chip {
                label: match &self.render_value {
                    Some(render) => render(option),
                    None => option.name.clone(),
                },
                option: option.clone(),
            })
            .collect()
    }

    /// Maximum width of the search field given the chip row layout.
    pub fn input_max_width(&self, container_width: f32, chip_widths: &[f32]) -> f32 {
        sizing::input_max_width(container_width, chip_widths, self.input_text.chars().count())
    }

    fn option_label(&self, option: &SelectOption) -> String {
        match &self.render_option {
            Some(render) => render(option),
            None => default_label(option),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn set_open(&mut self, open: bool) {
        if !self.open.set(open) {
            return;
        }
        if open {
            self.reset_highlight();
        }
        tracing::debug!(target: targets::SELECT, open, "popup visibility changed");
        self.popup_toggled.emit(open);
    }

    fn reset_highlight(&mut self) {
        self.highlighted_index = 0;
        self.scroll_offset = 0;
    }

    fn ensure_highlighted_visible(&mut self) {
        let idx = self.highlighted_index;
        if idx < self.scroll_offset {
            self.scroll_offset = idx;
        } else if idx >= self.scroll_offset + self.max_visible_items {
            self.scroll_offset = idx + 1 - self.max_visible_items;
        }
    }

    /// Restore the invariants after any transition: the highlight stays
    /// inside the filtered list, and a closed single-mode widget shows the
    /// selected name.
    fn settle(&mut self) {
        let count = self.filtered().len();
        if count == 0 {
            self.reset_highlight();
        } else if self.highlighted_index >= count {
            self.highlighted_index = count - 1;
            self.ensure_highlighted_visible();
        }

        if !self.is_open()
            && let Some(name) = M::text_while_closed(&self.value)
            && self.input_text != name
        {
            self.input_text = name.to_owned();
            self.reset_highlight();
        }
    }
}

impl<M: SelectionMode> Default for Select<M> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

static_assertions::assert_impl_all!(Select<crate::Single>: Send, Sync);
static_assertions::assert_impl_all!(Select<crate::Multiple>: Send, Sync);

// ============================================================================
// Tests
// ============================================================================
