//! Core systems for Horizon Select.
//!
//! This crate provides the foundation the combobox widget is built on:
//!
//! - **Signal/Slot System**: Type-safe notification from a widget to its host
//! - **Property System**: Change-detecting value cells
//! - **Geometry**: Points, sizes and rectangles for hit testing
//! - **Logging**: Tracing target names for log filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_select_core::Signal;
//!
//! let selection_changed = Signal::<Vec<u64>>::new();
//!
//! let conn_id = selection_changed.connect(|ids| {
//!     println!("Host received proposal: {:?}", ids);
//! });
//!
//! selection_changed.emit(vec![1, 2]);
//! selection_changed.disconnect(conn_id);
//! ```
//!
//! # Property Example
//!
//! ```
//! use horizon_select_core::{Property, Signal};
//!
//! struct Toggle {
//!     open: Property<bool>,
//!     open_changed: Signal<bool>,
//! }
//!
//! impl Toggle {
//!     fn flip(&self) {
//!         let next = !self.open.get();
//!         if self.open.set(next) {
//!             self.open_changed.emit(next);
//!         }
//!     }
//! }
//! ```

mod error;
pub mod geometry;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{CoreError, Result};
pub use geometry::{Point, Rect, Size};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
