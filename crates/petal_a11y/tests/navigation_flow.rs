//! Integration tests for the focus navigation engine
//!
//! These exercise the full stack: registration, order compilation, cursor
//! movement, action dispatch, and the collaborator side effects (focus sink,
//! announcer, focus-change listeners).

use petal_a11y::{
    AccessibilityAction, EngineConfig, FocusEngine, LandmarkRole, NavigableElement,
    NavigableLandmark, NavigableSection, FOCUS_HISTORY_LIMIT,
};
use petal_core::{
    Announcement, Announcer, FocusHandle, Focusable, KeyCode, KeyEvent, Modifiers,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Focus sink that counts how often the platform focus actually moved.
#[derive(Default)]
struct CountingSink {
    hits: AtomicUsize,
}

impl Focusable for CountingSink {
    fn focus(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Announcer that records every spoken label.
#[derive(Default)]
struct RecordingAnnouncer {
    spoken: Mutex<Vec<String>>,
}

impl Announcer for RecordingAnnouncer {
    fn announce(&self, announcement: &Announcement) {
        if let Some(text) = announcement.spoken_text() {
            self.spoken.lock().unwrap().push(text.to_string());
        }
    }
}

fn element(id: &str, section: &str, order: i32, sink: FocusHandle) -> NavigableElement {
    NavigableElement::builder(id)
        .section(section)
        .order(order)
        .label(id.to_uppercase())
        .sink(sink)
        .build()
        .unwrap()
}

/// Two landmarks, two sections, elements A/B in S1 and C in S2.
fn scenario_engine(sink: FocusHandle) -> FocusEngine {
    let mut engine = FocusEngine::new(EngineConfig::default());
    assert!(engine.register_landmark(NavigableLandmark::new(
        "l1",
        LandmarkRole::Navigation,
        0
    )));
    assert!(engine.register_landmark(NavigableLandmark::new("l2", LandmarkRole::Main, 1)));
    assert!(engine.register_section(NavigableSection::new("s1", 0).with_landmark("l1")));
    assert!(engine.register_section(NavigableSection::new("s2", 1).with_landmark("l2")));
    assert!(engine.register_element(element("a", "s1", 1, sink.clone())));
    assert!(engine.register_element(element("b", "s1", 2, sink.clone())));
    assert!(engine.register_element(element("c", "s2", 1, sink)));
    engine
}

#[test]
fn linear_traversal_with_wrap() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink.clone());

    assert_eq!(engine.focus_order(), ["a", "b", "c"]);

    // Idle -> a -> b -> c -> wrap back to a
    for expected in ["a", "b", "c", "a"] {
        assert!(engine.navigate_next());
        assert_eq!(engine.navigation_state().current(), Some(expected));
    }
    assert_eq!(sink.hits.load(Ordering::SeqCst), 4);
}

#[test]
fn wrap_law() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());

    // wrap = true: N calls from the first element return to it
    let mut engine = scenario_engine(sink.clone());
    assert!(engine.navigate_next());
    for _ in 0..3 {
        assert!(engine.navigate_next());
    }
    assert_eq!(engine.navigation_state().current(), Some("a"));

    // wrap = false: the last call fails and the cursor stays put
    let mut engine = FocusEngine::new(EngineConfig::default().with_wrap(false));
    engine.register_section(NavigableSection::new("s1", 0));
    engine.register_element(element("a", "s1", 1, sink.clone()));
    engine.register_element(element("b", "s1", 2, sink.clone()));
    engine.register_element(element("c", "s1", 3, sink));

    assert!(engine.navigate_next());
    assert!(engine.navigate_next());
    assert!(engine.navigate_next());
    assert_eq!(engine.navigation_state().current(), Some("c"));
    assert!(!engine.navigate_next());
    assert_eq!(engine.navigation_state().current(), Some("c"));
}

#[test]
fn section_jump_skips_within_section_elements() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink);

    assert!(engine.navigate_to_element("a"));
    // Next section jumps directly over b to c
    assert!(engine.navigate_next_section());
    assert_eq!(engine.navigation_state().current(), Some("c"));
    // And back to s1's first element
    assert!(engine.navigate_previous_section());
    assert_eq!(engine.navigation_state().current(), Some("a"));
}

#[test]
fn empty_sections_are_never_landing_targets() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink.clone());

    // A section whose only element is unfocusable has no presence in the
    // order and must be skipped transparently.
    assert!(engine.register_section(
        NavigableSection::new("s1b", 5).with_landmark("l1")
    ));
    assert!(engine.register_element(
        NavigableElement::builder("ghost")
            .section("s1b")
            .focusable(false)
            .sink(sink)
            .build()
            .unwrap()
    ));

    assert!(engine.navigate_to_element("a"));
    assert!(engine.navigate_next_section());
    assert_eq!(engine.navigation_state().current(), Some("c"));
}

#[test]
fn landmark_jump() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink);

    assert!(engine.navigate_to_landmark("l2"));
    assert_eq!(engine.navigation_state().current(), Some("c"));
    assert!(engine.navigate_to_landmark("l1"));
    assert_eq!(engine.navigation_state().current(), Some("a"));

    // Unknown landmark and landmark with no focusable content both fail
    assert!(!engine.navigate_to_landmark("nope"));
    assert!(engine.register_landmark(NavigableLandmark::new(
        "l3",
        LandmarkRole::ContentInfo,
        2
    )));
    assert!(!engine.navigate_to_landmark("l3"));
    assert_eq!(engine.navigation_state().current(), Some("a"));
}

#[test]
fn unregistering_the_focused_element_moves_to_its_successor() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink);

    assert!(engine.navigate_to_element("b"));
    assert!(engine.unregister_element("b"));

    // [a, b, c] -> [a, c]; c took b's position
    assert_eq!(engine.focus_order(), ["a", "c"]);
    assert_eq!(engine.navigation_state().current(), Some("c"));

    // Removing the last element falls back to the new last
    assert!(engine.unregister_element("c"));
    assert_eq!(engine.navigation_state().current(), Some("a"));

    // Removing the only element leaves the engine idle
    assert!(engine.unregister_element("a"));
    assert!(engine.navigation_state().is_idle());
    assert!(!engine.navigate_next_section());
}

#[test]
fn unregistering_an_unfocused_element_leaves_the_cursor_alone() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink);

    assert!(engine.navigate_to_element("c"));
    assert!(engine.unregister_element("a"));
    assert_eq!(engine.navigation_state().current(), Some("c"));
    assert!(!engine.unregister_element("a"));
}

#[test]
fn history_tracks_successful_navigations_up_to_the_limit() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink);

    for steps in 1..=4 {
        assert!(engine.navigate_next());
        assert_eq!(
            engine.navigation_state().history_len(),
            steps.min(FOCUS_HISTORY_LIMIT)
        );
    }

    for _ in 0..20 {
        assert!(engine.navigate_next());
    }
    assert_eq!(engine.navigation_state().history_len(), FOCUS_HISTORY_LIMIT);
}

#[test]
fn duplicate_registration_changes_nothing() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink.clone());

    let order_before = engine.focus_order().to_vec();
    assert!(!engine.register_element(element("a", "s2", 99, sink)));
    assert_eq!(engine.focus_order(), order_before.as_slice());
    assert_eq!(engine.diagnostics().elements, 3);
}

#[test]
fn undeclared_action_fails_without_touching_navigation() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let activations = Arc::new(AtomicUsize::new(0));
    let activations_clone = activations.clone();

    let mut engine = FocusEngine::new(EngineConfig::default());
    engine.register_element(
        NavigableElement::builder("a")
            .order(1)
            .on_activate(move || {
                activations_clone.fetch_add(1, Ordering::SeqCst);
            })
            .sink(sink)
            .build()
            .unwrap(),
    );
    assert!(engine.navigate_next());

    // a declares only activate
    assert!(!engine.execute_action("a", AccessibilityAction::ScrollForward));
    assert_eq!(activations.load(Ordering::SeqCst), 0);
    assert_eq!(engine.navigation_state().current(), Some("a"));
    assert_eq!(engine.navigation_state().history_len(), 1);

    assert!(engine.execute_action("a", AccessibilityAction::Activate));
    assert_eq!(activations.load(Ordering::SeqCst), 1);
    // Dispatch never moves focus or grows history
    assert_eq!(engine.navigation_state().history_len(), 1);

    assert!(!engine.execute_action("missing", AccessibilityAction::Activate));
}

#[test]
fn announcer_hears_every_successful_focus_change() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let announcer = Arc::new(RecordingAnnouncer::default());

    let mut engine =
        FocusEngine::with_announcer(EngineConfig::default(), announcer.clone());
    engine.register_section(NavigableSection::new("s1", 0));
    engine.register_element(element("a", "s1", 1, sink.clone()));
    engine.register_element(element("b", "s1", 2, sink));

    assert!(engine.navigate_next());
    assert!(engine.navigate_next());
    assert!(engine.navigate_previous());
    assert_eq!(*announcer.spoken.lock().unwrap(), vec!["A", "B", "A"]);
}

#[test]
fn focus_change_listeners_and_teardown() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let changes = Arc::new(Mutex::new(Vec::new()));
    let changes_clone = changes.clone();

    let mut engine = scenario_engine(sink);
    let token = engine.on_focus_change(move |change| {
        changes_clone
            .lock()
            .unwrap()
            .push((change.from.clone(), change.to.clone(), change.keyboard));
    });

    assert!(engine.navigate_next());
    assert!(engine.navigate_next());
    {
        let seen = changes.lock().unwrap();
        assert_eq!(seen[0], (None, "a".to_string(), false));
        assert_eq!(seen[1], (Some("a".to_string()), "b".to_string(), false));
    }

    assert!(engine.unsubscribe(token));
    assert!(engine.navigate_next());
    assert_eq!(changes.lock().unwrap().len(), 2);
}

#[test]
fn key_events_drive_navigation_and_keyboard_mode() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink);

    assert!(!engine.navigation_state().keyboard_mode_active());
    assert!(engine.skip_targets().is_empty());

    assert!(engine.handle_key(&KeyEvent::new(KeyCode::TAB)));
    assert_eq!(engine.navigation_state().current(), Some("a"));
    assert!(engine.navigation_state().keyboard_mode_active());

    assert!(engine.handle_key(&KeyEvent::new(KeyCode::PAGE_DOWN)));
    assert_eq!(engine.navigation_state().current(), Some("c"));

    assert!(engine.handle_key(&KeyEvent::with_modifiers(
        KeyCode::TAB,
        Modifiers::SHIFT
    )));
    assert_eq!(engine.navigation_state().current(), Some("b"));

    // Unbound chord does nothing
    assert!(!engine.handle_key(&KeyEvent::new(KeyCode::ESCAPE)));
    assert_eq!(engine.navigation_state().current(), Some("b"));
}

#[test]
fn skip_targets_appear_in_keyboard_sessions_only() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = FocusEngine::new(EngineConfig::default());
    engine.register_landmark(NavigableLandmark::new("l1", LandmarkRole::Main, 0));
    engine.register_section(
        NavigableSection::new("s1", 0)
            .with_landmark("l1")
            .with_skip_link(),
    );
    engine.register_section(NavigableSection::new("s2", 1).with_landmark("l1"));
    engine.register_element(element("a", "s1", 1, sink.clone()));
    engine.register_element(element("b", "s2", 1, sink));

    // Touch-first session: no skip links surfaced
    assert!(engine.navigate_next());
    assert!(engine.skip_targets().is_empty());

    assert!(engine.handle_key(&KeyEvent::new(KeyCode::TAB)));
    assert_eq!(
        engine.skip_targets(),
        vec![("s1".to_string(), "a".to_string())]
    );
}

#[test]
fn diagnostics_counts() {
    let sink: Arc<CountingSink> = Arc::new(CountingSink::default());
    let mut engine = scenario_engine(sink.clone());
    engine.register_section(NavigableSection::new("empty", 9).with_landmark("l2"));
    engine.register_element(
        NavigableElement::builder("hidden")
            .section("s1")
            .accessible(false)
            .sink(sink)
            .build()
            .unwrap(),
    );
    engine.navigate_next();

    let d = engine.diagnostics();
    assert_eq!(d.elements, 4);
    assert_eq!(d.navigable_elements, 3);
    assert_eq!(d.sections, 3);
    assert_eq!(d.populated_sections, 2);
    assert_eq!(d.landmarks, 2);
    assert_eq!(d.history_depth, 1);
    assert!(!d.keyboard_mode);

    // Serializable for the settings screen
    let json = serde_json::to_string(&d).unwrap();
    assert!(json.contains("\"navigable_elements\":3"));
}
