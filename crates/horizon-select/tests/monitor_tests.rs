//! Tests for closing the popover on pointer-downs outside the widget.

use horizon_select::monitor::{OutsideInteractionMonitor, PointerDownHub};
use horizon_select::{AnySelect, Select, SelectEvent, SelectOption, Single};
use horizon_select_core::{Point, Rect};

const BOUNDS: Rect = Rect::new(10.0, 10.0, 200.0, 40.0);

fn attached(hub: &PointerDownHub) -> Select<Single> {
    let mut select = Select::<Single>::new(vec![
        SelectOption::new(1, "Alice"),
        SelectOption::new(2, "Bob"),
    ])
    .with_bounds(BOUNDS);
    select.attach_monitor(hub);
    select
}

#[test]
fn test_outside_pointer_closes() {
    let hub = PointerDownHub::new();
    let mut select = attached(&hub);
    assert!(select.is_monitored());
    assert_eq!(hub.watcher_count(), 1);

    select.handle_event(SelectEvent::TriggerClicked);
    assert!(select.is_open());

    assert_eq!(hub.pointer_down(Point::new(400.0, 400.0)), 1);
    assert!(select.process_pending());
    assert!(!select.is_open());
    assert!(!select.process_pending());
}

#[test]
fn test_inside_pointer_ignored() {
    let hub = PointerDownHub::new();
    let mut select = attached(&hub);
    select.show_popup();

    assert_eq!(hub.pointer_down(Point::new(20.0, 20.0)), 0);
    assert!(!select.process_pending());
    assert!(select.is_open());
}

#[test]
fn test_region_tracks_layout() {
    let hub = PointerDownHub::new();
    let mut select = attached(&hub);
    select.show_popup();

    // The popover grew below the field.
    select.region().set_bounds(BOUNDS.union(&Rect::new(10.0, 50.0, 200.0, 300.0)));
    assert_eq!(hub.pointer_down(Point::new(50.0, 200.0)), 0);
    assert!(select.is_open());
}

#[test]
fn test_pending_applied_before_next_event() {
    let hub = PointerDownHub::new();
    let mut select = attached(&hub);
    select.show_popup();

    hub.pointer_down(Point::new(0.0, 0.0));
    // The queued close lands first, so the click reopens the popover.
    select.handle_event(SelectEvent::TriggerClicked);
    assert!(select.is_open());
}

#[test]
fn test_no_action_after_detach() {
    let hub = PointerDownHub::new();
    let mut select = attached(&hub);
    select.show_popup();

    select.detach_monitor();
    assert!(!select.is_monitored());
    assert_eq!(hub.watcher_count(), 0);
    assert_eq!(hub.pointer_down(Point::new(400.0, 400.0)), 0);
    assert!(!select.process_pending());
    assert!(select.is_open());
}

#[test]
fn test_unregisters_on_drop() {
    let hub = PointerDownHub::new();
    {
        let _select = attached(&hub);
        assert_eq!(hub.watcher_count(), 1);
    }
    assert_eq!(hub.watcher_count(), 0);
    assert_eq!(hub.pointer_down(Point::new(400.0, 400.0)), 0);
}

#[test]
fn test_reattach_replaces_registration() {
    let hub = PointerDownHub::new();
    let mut select = attached(&hub);
    select.attach_monitor(&hub);
    assert_eq!(hub.watcher_count(), 1);
}

#[test]
fn test_custom_monitor() {
    use horizon_select::monitor::{OutsideCallback, Region, WatchGuard};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Manual {
        callback: Arc<Mutex<Option<OutsideCallback>>>,
    }

    impl OutsideInteractionMonitor for Manual {
        fn watch(&self, _region: Region, callback: OutsideCallback) -> WatchGuard {
            *self.callback.lock() = Some(callback);
            let slot = self.callback.clone();
            WatchGuard::new(move || *slot.lock() = None)
        }
    }

    let monitor = Manual::default();
    let mut select: AnySelect = Select::<Single>::new(Vec::new()).into();
    select.attach_monitor(&monitor);
    select.handle_event(SelectEvent::TriggerClicked);
    assert!(select.is_open());

    if let Some(fire) = monitor.callback.lock().as_ref() {
        fire();
    }
    assert!(select.process_pending());
    assert!(!select.is_open());

    select.detach_monitor();
    assert!(monitor.callback.lock().is_none());
}
