use std::sync::{Arc, Mutex};

use griddom::{find_first, DomEvent, Element, EventRouter, Handler, Selector};

fn container() -> Element {
    let mut root = Element::div().id("container");
    root.set_inner_markup(concat!(
        r#"<table><tbody>"#,
        r#"<tr key="0"><td id="c0" edit-type="text">a</td><td id="c1" edit-type="select">b</td></tr>"#,
        r#"</tbody></table>"#,
    ))
    .unwrap();
    root
}

fn recorder(log: &Arc<Mutex<Vec<String>>>, label: &str) -> Handler {
    let log = Arc::clone(log);
    let label = label.to_string();
    Arc::new(move |event: &mut DomEvent| {
        log.lock()
            .unwrap()
            .push(format!("{}@{}", label, event.current_tag));
    })
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_one_listener_per_event_name() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = EventRouter::new();
    router.on("click", "tr", recorder(&log, "row")).unwrap();
    router.on("click", "td[edit-type=text]", recorder(&log, "text")).unwrap();
    router.on("dblclick", "tr", recorder(&log, "row")).unwrap();

    assert_eq!(router.listener_count(), 2);
    assert_eq!(router.delegate_count("click"), 2);
    assert_eq!(router.delegate_count("keydown"), 0);
    assert_eq!(router.events().collect::<Vec<_>>(), vec!["click", "dblclick"]);
}

#[test]
fn test_invalid_selector_is_rejected() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = EventRouter::new();
    assert!(router.on("click", "td[", recorder(&log, "x")).is_err());
    assert_eq!(router.listener_count(), 0);
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_dispatch_bubbles_innermost_first() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = EventRouter::new();
    router.on("click", "tr", recorder(&log, "row")).unwrap();
    router.on("click", "tr td", recorder(&log, "cell")).unwrap();

    let root = container();
    assert_eq!(router.dispatch(&root, "c0", "click"), 2);
    assert_eq!(*log.lock().unwrap(), vec!["cell@td", "row@tr"]);
}

#[test]
fn test_dispatch_matches_edit_type_only() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = EventRouter::new();
    router.on("click", "td[edit-type=text]", recorder(&log, "text")).unwrap();
    router.on("click", "td[edit-type=select]", recorder(&log, "select")).unwrap();

    let root = container();
    router.dispatch(&root, "c1", "click");
    assert_eq!(*log.lock().unwrap(), vec!["select@td"]);
}

#[test]
fn test_dispatch_reaches_elements_added_after_registration() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = EventRouter::new();
    router.on("click", "td[edit-type=text]", recorder(&log, "text")).unwrap();

    let mut root = container();
    let tbody_id = find_first(&root, &Selector::parse("tbody").unwrap())
        .unwrap()
        .id
        .clone();
    let tbody = griddom::find_element_mut(&mut root, &tbody_id).unwrap();
    tbody.push_child(
        Element::new("tr").child(Element::new("td").id("late").attr("edit-type", "text")),
    );

    assert_eq!(router.dispatch(&root, "late", "click"), 1);
}

#[test]
fn test_container_never_matches_its_own_delegates() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = EventRouter::new();
    router.on("click", "div", recorder(&log, "div")).unwrap();

    let root = container();
    assert_eq!(router.dispatch(&root, "c0", "click"), 0);
    assert_eq!(router.dispatch(&root, "container", "click"), 0);
}

#[test]
fn test_unknown_target_resolves_nothing() {
    let router = EventRouter::new();
    let root = container();
    assert!(router.collect(&root, "missing", "click").is_none());
    assert_eq!(router.dispatch(&root, "missing", "click"), 0);
}

#[test]
fn test_current_target_snapshot() {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let mut router = EventRouter::new();
    router
        .on(
            "click",
            "tr",
            Arc::new(move |event: &mut DomEvent| {
                *sink.lock().unwrap() = event.current_attr("key").map(str::to_string);
            }),
        )
        .unwrap();

    let root = container();
    router.dispatch(&root, "c1", "click");
    assert_eq!(seen.lock().unwrap().as_deref(), Some("0"));
}

#[test]
fn test_stop_propagation_finishes_current_level() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = EventRouter::new();
    let stopper = {
        let log = Arc::clone(&log);
        Arc::new(move |event: &mut DomEvent| {
            log.lock().unwrap().push("stop".to_string());
            event.stop_propagation();
        }) as Handler
    };
    let sibling = {
        let log = Arc::clone(&log);
        Arc::new(move |event: &mut DomEvent| {
            log.lock()
                .unwrap()
                .push(format!("sibling stopped={}", event.is_propagation_stopped()));
        }) as Handler
    };
    router.on("click", "td", stopper).unwrap();
    router.on("click", "td", sibling).unwrap();
    router.on("click", "tr", recorder(&log, "row")).unwrap();

    let root = container();
    assert_eq!(router.dispatch(&root, "c0", "click"), 2);
    assert_eq!(*log.lock().unwrap(), vec!["stop", "sibling stopped=true"]);
}

#[test]
fn test_stop_immediate_propagation() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = EventRouter::new();
    let stopper: Handler = Arc::new(|event: &mut DomEvent| event.stop_immediate_propagation());
    router.on("click", "td", stopper).unwrap();
    router.on("click", "td", recorder(&log, "sibling")).unwrap();

    let root = container();
    assert_eq!(router.dispatch(&root, "c0", "click"), 1);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_clear_detaches_everything() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = EventRouter::new();
    router.on("click", "tr", recorder(&log, "row")).unwrap();
    router.clear();

    let root = container();
    assert_eq!(router.listener_count(), 0);
    assert_eq!(router.dispatch(&root, "c0", "click"), 0);
}
