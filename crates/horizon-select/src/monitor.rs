//! Outside-interaction monitoring.
//!
//! A popover must close when the user presses a pointer button anywhere
//! outside the widget. Detecting that is the host's job; the widget only
//! needs to be told. [`OutsideInteractionMonitor`] is the capability the
//! widget consumes, and [`PointerDownHub`] is a ready-made implementation
//! that the host feeds with raw pointer-down positions.
//!
//! # Example
//!
//! ```
//! use horizon_select::monitor::{OutsideInteractionMonitor, PointerDownHub, Region};
//! use horizon_select_core::{Point, Rect};
//!
//! let hub = PointerDownHub::new();
//! let region = Region::new(Rect::new(0.0, 0.0, 200.0, 40.0));
//! let _guard = hub.watch(region, Box::new(|| println!("clicked outside")));
//!
//! hub.pointer_down(Point::new(300.0, 10.0)); // prints
//! hub.pointer_down(Point::new(20.0, 10.0)); // inside, nothing happens
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use horizon_select_core::logging::targets;
use horizon_select_core::{Point, Rect};
use parking_lot::{Mutex, RwLock};
use slotmap::{new_key_type, SlotMap};

/// Callback invoked for a pointer-down outside a watched region.
pub type OutsideCallback = Box<dyn Fn() + Send + Sync>;

/// Shared, host-updatable bounds of a widget.
///
/// Clones share the same bounds, so the host can move or resize the widget
/// after the region was handed to a monitor.
#[derive(Clone, Default)]
pub struct Region {
    bounds: Arc<RwLock<Rect>>,
}

impl Region {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: Arc::new(RwLock::new(bounds)),
        }
    }

    pub fn bounds(&self) -> Rect {
        *self.bounds.read()
    }

    pub fn set_bounds(&self, bounds: Rect) {
        *self.bounds.write() = bounds;
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds.read().contains(point)
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Region").field(&self.bounds()).finish()
    }
}

/// Keeps a watch registration alive; unregisters when dropped.
pub struct WatchGuard {
    unregister: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl WatchGuard {
    /// Create a guard that runs `unregister` when dropped.
    pub fn new<F>(unregister: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            unregister: Some(Box::new(unregister)),
        }
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl fmt::Debug for WatchGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchGuard")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}

/// A capability that reports pointer-down events outside a region.
///
/// Implementations must invoke the callback exactly once per external
/// pointer-down landing outside `region`, for as long as the returned guard
/// lives, and never after it is dropped.
pub trait OutsideInteractionMonitor {
    fn watch(&self, region: Region, callback: OutsideCallback) -> WatchGuard;
}

new_key_type! {
    /// Identifies a registration in a [`PointerDownHub`].
    pub struct WatchId;
}

struct Watcher {
    region: Region,
    callback: Arc<dyn Fn() + Send + Sync>,
}

type WatcherTable = Mutex<SlotMap<WatchId, Watcher>>;

/// A monitor driven by the host's pointer-down stream.
#[derive(Clone, Default)]
pub struct PointerDownHub {
    watchers: Arc<WatcherTable>,
}

impl PointerDownHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    pub fn watcher_count(&self) -> usize {
        self.watchers.lock().len()
    }

    /// Report a pointer-down at `point`.
    ///
    /// Invokes every watcher whose region does not contain `point` and
    /// returns how many were invoked.
    pub fn pointer_down(&self, point: Point) -> usize {
        let outside: Vec<Arc<dyn Fn() + Send + Sync>> = self
            .watchers
            .lock()
            .values()
            .filter(|watcher| !watcher.region.contains(point))
            .map(|watcher| watcher.callback.clone())
            .collect();

        tracing::trace!(
            target: targets::MONITOR,
            x = point.x,
            y = point.y,
            notified = outside.len(),
            "pointer down"
        );

        for callback in &outside {
            callback();
        }
        outside.len()
    }
}

impl OutsideInteractionMonitor for PointerDownHub {
    fn watch(&self, region: Region, callback: OutsideCallback) -> WatchGuard {
        let id = self.watchers.lock().insert(Watcher {
            region,
            callback: Arc::from(callback),
        });
        tracing::debug!(target: targets::MONITOR, ?id, "watching region");

        let watchers: Weak<WatcherTable> = Arc::downgrade(&self.watchers);
        WatchGuard::new(move || {
            if let Some(watchers) = watchers.upgrade() {
                watchers.lock().remove(id);
                tracing::debug!(target: targets::MONITOR, ?id, "stopped watching region");
            }
        })
    }
}

static_assertions::assert_impl_all!(PointerDownHub: Send, Sync);
static_assertions::assert_impl_all!(WatchGuard: Send, Sync);
