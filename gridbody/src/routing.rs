//! Delegated event routing built from the painter registry.
//!
//! Row handlers are scoped to `tr`, cell handlers to
//! `td[edit-type="<type>"]`, and every painter selector is appended as a
//! descendant of its scope. All of them land on the container's router,
//! one listener per event name.

use log::debug;

use griddom::EventRouter;

use crate::error::BodyTableError;
use crate::painter::{EventHandlerInfo, PainterRegistry};

/// Scope of row painter handlers.
pub const ROW_SCOPE: &str = "tr";

/// Scope of the cell painter handlers for `edit_type`.
pub fn cell_scope(edit_type: &str) -> String {
    format!(r#"td[edit-type="{edit_type}"]"#)
}

/// `scope` narrowed by a painter's own selector.
pub fn scoped_selector(scope: &str, selector: &str) -> String {
    let selector = selector.trim();
    if selector.is_empty() {
        scope.to_string()
    } else {
        format!("{scope} {selector}")
    }
}

fn attach(
    router: &mut EventRouter,
    scope: &str,
    infos: EventHandlerInfo,
) -> Result<(), BodyTableError> {
    for (event, info) in infos {
        router.on(&event, &scoped_selector(scope, &info.selector), info.handler)?;
    }
    Ok(())
}

/// Build the container router: row painter first, then cell painters in
/// edit-type order.
pub fn build_router(painters: &dyn PainterRegistry) -> Result<EventRouter, BodyTableError> {
    let mut router = EventRouter::new();

    attach(
        &mut router,
        ROW_SCOPE,
        painters.row_painter().event_handler_info(),
    )?;

    for (edit_type, painter) in painters.cell_painters() {
        attach(
            &mut router,
            &cell_scope(&edit_type),
            painter.event_handler_info(),
        )?;
    }

    debug!(
        "[routing] {} listener(s): {:?}",
        router.listener_count(),
        router
    );
    Ok(router)
}
