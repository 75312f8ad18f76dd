//! Delegated event routing.
//!
//! A container element owns one listener per event name. Each listener holds
//! an ordered list of delegates (selector + handler). When an event is
//! dispatched at a target, the route is resolved against the live tree: every
//! element from the target up to (but excluding) the container is tested
//! against the delegates, so rows and cells added after registration are
//! handled without binding anything to them.

use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::element::{path_to, Element};
use crate::selector::{Selector, SelectorError};

/// Delegated event handler.
pub type Handler = Arc<dyn Fn(&mut DomEvent) + Send + Sync>;

/// An event travelling from its target towards the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    /// Event name (`click`, `dblclick`, `mousedown`, ...).
    pub name: String,
    /// Id of the element the event was dispatched at.
    pub target: String,
    /// Id of the element whose delegate is currently running.
    pub current_target: String,
    /// Tag of the current target.
    pub current_tag: String,
    /// Attributes of the current target, as of dispatch time.
    pub current_attrs: Vec<(String, String)>,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl DomEvent {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        Self {
            name: name.into(),
            current_target: target.clone(),
            target,
            current_tag: String::new(),
            current_attrs: Vec::new(),
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    pub fn current_attr(&self, name: &str) -> Option<&str> {
        self.current_attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Finish the delegates matched at the current element, then stop.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop right after the running delegate.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

struct Delegate {
    selector: Selector,
    handler: Handler,
}

struct Listener {
    event: String,
    delegates: Vec<Delegate>,
}

/// Event listeners attached to a single container element.
#[derive(Default)]
pub struct EventRouter {
    listeners: Vec<Listener>,
}

impl fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for listener in &self.listeners {
            let selectors: Vec<&str> = listener
                .delegates
                .iter()
                .map(|d| d.selector.as_str())
                .collect();
            map.entry(&listener.event, &selectors);
        }
        map.finish()
    }
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delegate `event` on descendants matching `selector` to `handler`.
    pub fn on(
        &mut self,
        event: &str,
        selector: &str,
        handler: Handler,
    ) -> Result<(), SelectorError> {
        let selector = Selector::parse(selector)?;
        self.on_selector(event, selector, handler);
        Ok(())
    }

    pub fn on_selector(&mut self, event: &str, selector: Selector, handler: Handler) {
        trace!("[event] delegate {} on '{}'", event, selector);

        let delegate = Delegate { selector, handler };
        match self.listeners.iter_mut().find(|l| l.event == event) {
            Some(listener) => listener.delegates.push(delegate),
            None => self.listeners.push(Listener {
                event: event.to_string(),
                delegates: vec![delegate],
            }),
        }
    }

    /// Number of listeners on the container: one per distinct event name.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn delegate_count(&self, event: &str) -> usize {
        self.listeners
            .iter()
            .find(|l| l.event == event)
            .map_or(0, |l| l.delegates.len())
    }

    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.listeners.iter().map(|l| l.event.as_str())
    }

    /// Detach every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Resolve the handlers `event` at `target_id` would run, without running them.
    ///
    /// `container` is the element the router is attached to. Returns `None`
    /// when the target is not inside it.
    pub fn collect(
        &self,
        container: &Element,
        target_id: &str,
        event: &str,
    ) -> Option<PendingDispatch> {
        let path = path_to(container, target_id)?;
        let mut pending = PendingDispatch {
            event: DomEvent::new(event, target_id),
            queue: Vec::new(),
        };

        let Some(listener) = self.listeners.iter().find(|l| l.event == event) else {
            return Some(pending);
        };

        // Index 0 is the container itself, which never matches its own delegates.
        for level in (1..path.len()).rev() {
            let element = path[level];
            let chain = &path[..=level];
            for delegate in &listener.delegates {
                if delegate.selector.matches(chain) {
                    pending.queue.push(Queued {
                        level,
                        current_target: element.id.clone(),
                        current_tag: element.tag.clone(),
                        current_attrs: element.attrs.clone(),
                        handler: Arc::clone(&delegate.handler),
                    });
                }
            }
        }

        trace!(
            "[event] {} at {} resolved to {} handler(s)",
            event,
            target_id,
            pending.queue.len()
        );
        Some(pending)
    }

    /// Resolve and run. Returns the number of handler invocations.
    pub fn dispatch(&self, container: &Element, target_id: &str, event: &str) -> usize {
        self.collect(container, target_id, event)
            .map_or(0, PendingDispatch::fire)
    }
}

struct Queued {
    level: usize,
    current_target: String,
    current_tag: String,
    current_attrs: Vec<(String, String)>,
    handler: Handler,
}

/// Handlers resolved for one dispatch, innermost element first.
pub struct PendingDispatch {
    event: DomEvent,
    queue: Vec<Queued>,
}

impl fmt::Debug for PendingDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDispatch")
            .field("event", &self.event.name)
            .field("target", &self.event.target)
            .field("handlers", &self.queue.len())
            .finish()
    }
}

impl PendingDispatch {
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Run the resolved handlers. Returns how many ran.
    pub fn fire(self) -> usize {
        let mut event = self.event;
        let mut invoked = 0;
        let mut stopped_at = None;

        for queued in self.queue {
            if event.immediate_propagation_stopped {
                break;
            }
            if stopped_at.is_some_and(|level| level != queued.level) {
                break;
            }

            event.current_target = queued.current_target;
            event.current_tag = queued.current_tag;
            event.current_attrs = queued.current_attrs;
            (queued.handler)(&mut event);
            invoked += 1;

            if stopped_at.is_none() && event.propagation_stopped {
                stopped_at = Some(queued.level);
            }
        }

        invoked
    }
}
