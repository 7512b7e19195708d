use core_actions::{CursorState, MotionKind, MotionRequest, compute_motion};
use core_text::Grid;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::dispatcher::{Dispatch, with_default};
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<(String, String)>>>,
}

impl EventCapture {
    fn events(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        self.events.clone()
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S> Layer<S> for EventCapture
where
    S: Subscriber,
{
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::always()
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((event.metadata().target().to_string(), visitor.0));
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<(String, String)> {
    let capture = EventCapture::default();
    let events = capture.events();
    let subscriber = Registry::default().with(capture.with_filter(LevelFilter::TRACE));
    let dispatch = Dispatch::new(subscriber);
    with_default(&dispatch, f);
    let recorded = events.lock().unwrap().clone();
    recorded
}

#[test]
fn compute_motion_emits_actions_motion_target() {
    let events = capture(|| {
        let grid = Grid::from_rows(["ab cd"]);
        let _ = compute_motion(&grid, CursorState::default(), MotionKind::WordForward.into());
    });
    assert!(
        events
            .iter()
            .any(|(target, msg)| target == "actions.motion" && msg == "motion")
    );
}

#[test]
fn search_miss_is_traced() {
    let events = capture(|| {
        let grid = Grid::from_rows(["abc"]);
        let request = MotionRequest::with_target(MotionKind::FindCharForward, 'z');
        let result = compute_motion(&grid, CursorState::default(), request).unwrap();
        assert!(result.is_valid);
    });
    assert!(
        events
            .iter()
            .any(|(target, msg)| target == "actions.motion" && msg == "search_no_match")
    );
}

#[test]
fn token_translation_emits_actions_translate_target() {
    let events = capture(|| {
        let _ = MotionRequest::parse("g_");
    });
    assert!(events.iter().any(|(target, _)| target == "actions.translate"));
}
