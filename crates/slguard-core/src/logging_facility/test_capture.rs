//! In-memory capture of log events for test assertions
//!
//! The capture handle is itself the subscriber layer, so a test holds the
//! same buffer the layer writes into.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use slguard_core_types::schema::{FIELD_EVENT, FIELD_OP};

/// One recorded event. Every field value is kept as text.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_event(event: &Event<'_>) -> Self {
        let mut text = FieldText::default();
        event.record(&mut text);
        let fields = text.0;
        Self {
            level: *event.metadata().level(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        }
    }

    /// True if this is the given lifecycle event of the given operation
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

#[derive(Default)]
struct FieldText(HashMap<String, String>);

impl Visit for FieldText {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    // Integers and bools land here; their Debug text equals their Display text
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

/// Shared handle to every event recorded since the capture was installed
#[derive(Clone, Default)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// # Panics
    ///
    /// Panics if no event with this `op` and `event` was captured
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no {} event for op {} among {} captured events",
            event,
            op,
            events.len()
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl<S: Subscriber> Layer<S> for TestCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if let Ok(mut events) = self.events.lock() {
            events.push(CapturedEvent::from_event(event));
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture as the global subscriber on first call and return
/// the shared handle.
///
/// All tests in a binary share one buffer, so filter by a unique `op`.
///
/// # Example
///
/// ```
/// use slguard_core::logging_facility::test_capture::init_test_capture;
/// use slguard_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("my_operation");
/// capture.assert_event_exists("my_operation", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let capture = TestCapture::default();
            tracing_subscriber::registry().with(capture.clone()).init();
            capture
        })
        .clone()
}
