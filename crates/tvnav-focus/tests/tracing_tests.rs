#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Structured events enabled:
//!   cargo test -p tvnav-focus --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p tvnav-focus --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tvnav_core::geometry::Rect;
use tvnav_focus::layout::MeasureError;
use tvnav_focus::{Direction, FocusableEntry, NavigationRoot};

use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its level and fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    #[allow(dead_code)]
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

/// A tracing Layer that records every event.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

/// Visitor that extracts event fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

/// Run a closure under a capturing subscriber and return what it logged.
fn with_captured_events<F>(f: F) -> Vec<CapturedEvent>
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn grid_root() -> NavigationRoot {
    let root = NavigationRoot::new(true);
    for (id, x, y) in [("a", 0.0, 0.0), ("b", 0.0, 100.0)] {
        root.register_focusable(id, FocusableEntry::new());
        root.report_geometry(id, Rect::new(x, y, 50.0, 50.0));
    }
    root
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn focus_transitions_are_logged_at_debug() {
    let events = with_captured_events(|| {
        let root = grid_root();
        root.focus_element("a");
        root.move_focus(Direction::Down);
    });

    let transitions: Vec<_> = events
        .iter()
        .filter(|e| e.message() == "focus transition")
        .collect();
    assert_eq!(transitions.len(), 2, "events: {events:?}");
    assert!(transitions.iter().all(|e| e.level == tracing::Level::DEBUG));
    assert!(
        transitions[1]
            .fields
            .get("event")
            .is_some_and(|v| v.contains("Moved")),
        "second transition should be a move: {:?}",
        transitions[1]
    );
}

#[test]
#[cfg(feature = "tracing")]
fn registration_is_logged_with_id() {
    let events = with_captured_events(|| {
        let root = NavigationRoot::new(true);
        root.register_focusable("card-7", FocusableEntry::new());
    });

    let register = events
        .iter()
        .find(|e| e.message() == "register focusable")
        .expect("register event");
    assert_eq!(register.fields.get("id").map(String::as_str), Some("card-7"));
}

#[test]
#[cfg(feature = "tracing")]
fn measurement_failure_is_a_warning() {
    let events = with_captured_events(|| {
        let root = NavigationRoot::new(true);
        let probe = || -> Result<Rect, MeasureError> { Err(MeasureError::Detached) };
        root.attach_probe("a", std::rc::Rc::new(probe));
        root.refresh_geometry();
    });

    let warning = events
        .iter()
        .find(|e| e.level == tracing::Level::WARN)
        .expect("warning event");
    assert!(
        warning
            .fields
            .get("error")
            .is_some_and(|v| v.contains("not attached")),
        "warning: {warning:?}"
    );
}

/// Without the `tracing` feature the logging macros expand to nothing.
#[test]
#[cfg(not(feature = "tracing"))]
fn zero_overhead_no_events_without_feature() {
    let events = with_captured_events(|| {
        let root = grid_root();
        root.focus_element("a");
        root.move_focus(Direction::Down);
        let probe = || -> Result<Rect, MeasureError> { Err(MeasureError::Detached) };
        root.attach_probe("a", std::rc::Rc::new(probe));
        root.refresh_geometry();
    });
    assert!(events.is_empty(), "unexpected events: {events:?}");
}
