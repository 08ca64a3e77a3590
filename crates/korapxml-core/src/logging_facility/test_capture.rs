//! In-memory capture of export log events for tests
//!
//! All tests of a binary share one global subscriber, so lookups filter by
//! a document ID or node name that is unique to the calling test.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use korapxml_core_types::schema::{
    EVENT_SKIP, FIELD_DOC_ID, FIELD_ERR_CODE, FIELD_EVENT, FIELD_NODE_ID, FIELD_OP,
};

/// One recorded event: its level plus every field rendered as text
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }
}

#[derive(Default)]
struct FieldVisitor(HashMap<String, String>);

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let captured = CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0,
        };
        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle on the events recorded since the capture was installed
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Skip events recorded for the given node
    pub fn skips_for_node(&self, node_id: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.event() == Some(EVENT_SKIP) && e.field(FIELD_NODE_ID) == Some(node_id))
    }

    /// Boundary events (`start`, `end`, `end_error`) of `op` for one document ID
    pub fn op_events(&self, op: &str, doc_id: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.op() == Some(op) && e.field(FIELD_DOC_ID) == Some(doc_id))
    }

    /// Events of any kind carrying the given error code
    pub fn with_error_code(&self, code: &str) -> Vec<CapturedEvent> {
        self.matching(|e| e.field(FIELD_ERR_CODE) == Some(code))
    }

    fn matching(&self, keep: impl Fn(&CapturedEvent) -> bool) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| keep(e)).collect()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber once and return a handle to it
///
/// ```
/// use korapxml_core::logging_facility::test_capture::init_test_capture;
/// use korapxml_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("write_layer", doc_id = "docExample_doc1.t");
/// assert_eq!(capture.op_events("write_layer", "docExample_doc1.t").len(), 1);
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: events.clone(),
            };
            tracing_subscriber::registry().with(layer).try_init().ok();
            TestCapture { events }
        })
        .clone()
}
