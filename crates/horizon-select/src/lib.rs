//! Horizon Select - a headless combobox.
//!
//! A [`Select`] is a text field with a filtered popover of candidate options.
//! It supports single and multiple selection, keyboard navigation, inline
//! creation of options from the typed text, and closing when the user
//! interacts outside of it.
//!
//! The widget draws nothing. It exposes [`rows`](Select::rows),
//! [`chips`](Select::chips) and sizing hints for a renderer, and reports to
//! its host through signals. The host owns the options and the committed
//! selection.
//!
//! # Example
//!
//! ```
//! use horizon_select::{Multiple, Select, SelectEvent, SelectOption};
//! use horizon_select::monitor::PointerDownHub;
//! use horizon_select_core::{Point, Rect};
//!
//! let hub = PointerDownHub::new();
//! let mut select = Select::<Multiple>::new(vec![
//!     SelectOption::new(1, "Alice"),
//!     SelectOption::new(2, "Bob"),
//! ])
//! .with_bounds(Rect::new(0.0, 0.0, 200.0, 32.0));
//! select.attach_monitor(&hub);
//!
//! select.handle_event(SelectEvent::TriggerClicked);
//! assert!(select.is_open());
//!
//! hub.pointer_down(Point::new(500.0, 500.0));
//! select.process_pending();
//! assert!(!select.is_open());
//! ```

mod any;
mod config;
mod error;
mod event;
pub mod filter;
mod mode;
pub mod monitor;
mod option;
mod presentation;
mod select;
pub mod sizing;

pub use any::AnySelect;
pub use config::SelectConfig;
pub use error::{ConfigError, ConfigResult};
pub use event::{Key, SelectEvent};
pub use mode::{Commit, Multiple, SelectionMode, Single};
pub use option::{IdGenerator, OptionId, OptionStatus, SelectOption};
pub use presentation::{default_label, CandidateRow, Chip, PopoverRow, RenderFn};
pub use select::{Select, DEFAULT_MAX_VISIBLE_ITEMS};
