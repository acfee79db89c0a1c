#![forbid(unsafe_code)]

//! Structured logging integration tests.
//!
//! Events enabled:
//!   cargo test -p dragsort-widgets --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p dragsort-widgets --test tracing_tests -- zero_overhead

use std::sync::{Arc, Mutex};

use dragsort_widgets::adapter::{AdapterConfig, RowTemplate};
#[cfg(feature = "tracing")]
use dragsort_widgets::adapter::FieldBinding;
use dragsort_widgets::collection::OrderedCollection;
use dragsort_widgets::config::DragConfig;
#[cfg(feature = "tracing")]
use dragsort_widgets::config::ConfigError;
use dragsort_widgets::controller::DragController;
use dragsort_widgets::reorder::walk_to;
use dragsort_widgets::RowAdapter;

use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event: level, message, and recorded fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: Vec<(String, String)>,
}

#[cfg(feature = "tracing")]
impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
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

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let message = visitor
            .0
            .iter()
            .find(|(k, _)| k == "message")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields: visitor.0,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: events.clone(),
    });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn letters(s: &str) -> OrderedCollection {
    OrderedCollection::from_records(s.chars().map(|c| [("label", c.to_string())]))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(feature = "tracing")]
#[test]
fn walk_emits_debug_summary_and_trace_steps() {
    let events = capture(|| {
        let mut source = letters("ABCDE");
        let mut hover = 4;
        walk_to(&mut source, &mut hover, 1).unwrap();
    });

    let steps: Vec<_> = events
        .iter()
        .filter(|e| e.message == "adjacent move")
        .collect();
    assert_eq!(steps.len(), 3);
    assert!(steps.iter().all(|e| e.level == tracing::Level::TRACE));

    let summary = events
        .iter()
        .find(|e| e.message == "reorder walk")
        .expect("walk summary event");
    assert_eq!(summary.level, tracing::Level::DEBUG);
    assert_eq!(summary.field("from"), Some("4"));
    assert_eq!(summary.field("to"), Some("1"));
    assert_eq!(summary.field("steps"), Some("3"));
}

#[cfg(feature = "tracing")]
#[test]
fn rejected_configuration_warns() {
    let events = capture(|| {
        let config = AdapterConfig::new(
            RowTemplate::new(1).with_text("label"),
            vec![FieldBinding::new("label", "missing")],
        );
        assert!(RowAdapter::new(letters("A"), config).is_err());
        let drag = DragConfig {
            overlay_opacity: 3.0,
            ..DragConfig::default()
        };
        assert_eq!(
            DragController::new(drag).err(),
            Some(ConfigError::OpacityOutOfRange(3.0))
        );
    });

    let warnings: Vec<_> = events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].message, "row adapter configuration rejected");
    assert_eq!(warnings[1].message, "drag configuration rejected");
}

#[cfg(not(feature = "tracing"))]
#[test]
fn zero_overhead_without_feature() {
    let events = capture(|| {
        let mut source = letters("ABCDE");
        let mut hover = 0;
        walk_to(&mut source, &mut hover, 4).unwrap();
        let config = AdapterConfig::new(RowTemplate::new(1), vec![]);
        assert!(RowAdapter::new(letters("A"), config).is_err());
        assert!(DragController::new(DragConfig::default()).is_ok());
    });
    assert!(events.is_empty(), "events leaked without the tracing feature: {events:?}");
}
