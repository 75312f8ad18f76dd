//! Body table: the table shell of one grid pane.
//!
//! A `BodyTable` owns the container element of its pane. It
//! - builds the table shell (column group + empty body) and lets a row
//!   collection fill the body,
//! - patches column widths, overflow and height when the dimension and
//!   render models change,
//! - redraws rows either in place or by rebuilding the whole table, as
//!   chosen once by `BodyTableConfig::redraw`,
//! - routes DOM events to painters through one delegated router attached to
//!   the container.
//!
//! Only the right (scrollable) pane reacts to dummy rows and body height.

mod lock;
mod reactions;
mod shell;

pub use shell::{table_template, CONTAINER_CLASS};
pub(crate) use shell::Shell;

use std::sync::{Arc, Mutex, PoisonError, Weak};

use log::{debug, error, warn};

use griddom::{Element, EventRouter};

use crate::config::BodyTableConfig;
use crate::error::BodyTableError;
use crate::model::{ColumnSchema, DimensionSource, RenderSource};
use crate::observe::{Callback, Subscription};
use crate::painter::PainterRegistry;
use crate::pane::Side;
use crate::routing::build_router;
use crate::row_list::{BodySection, RowList, ViewFactory};

use lock::{Locked, Shared};

/// A change notification the table reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChange {
    /// Column widths of any pane changed.
    ColumnWidth,
    /// Dummy row count changed. Right pane only.
    DummyRowCount,
    /// Body height changed. Right pane only.
    BodyHeight,
}

/// The capability set of a view owned by the grid layout.
pub trait View {
    fn render(&self) -> Result<(), BodyTableError>;
    fn destroy(&self);
    fn handle_change(&self, change: ModelChange) -> Result<(), BodyTableError>;
}

/// Everything a body table is wired to.
pub struct BodyTableOptions {
    pub side: Side,
    pub dimension: Arc<dyn DimensionSource>,
    pub render: Arc<dyn RenderSource>,
    pub columns: Arc<dyn ColumnSchema>,
    pub painters: Arc<dyn PainterRegistry>,
    pub view_factory: Arc<dyn ViewFactory>,
    pub config: BodyTableConfig,
}

pub(crate) struct Inner {
    shell: Shell,
    render_model: Arc<dyn RenderSource>,
    view_factory: Arc<dyn ViewFactory>,
    router: EventRouter,
    row_list: Option<Box<dyn RowList>>,
    destroyed: bool,
}

impl Inner {
    fn destroy_children(&mut self) {
        if let Some(mut rows) = self.row_list.take() {
            rows.destroy();
        }
    }

    fn render(&mut self) -> Result<(), BodyTableError> {
        let side = self.shell.side();
        // A refused column group leaves the current rows and shell in place.
        let col_group = self.shell.col_group_markup()?;
        self.destroy_children();

        let body_id = self.shell.install(&col_group, "")?;
        let rows = self
            .row_list
            .insert(self.view_factory.create_row_list(side, &body_id));
        rows.render(&mut BodySection::new(&mut self.shell))?;

        if side.is_right() {
            self.reset_height();
            self.reset_overflow();
        }

        debug!("[body_table] {} pane rendered", side);
        Ok(())
    }
}

/// Table shell of one pane.
pub struct BodyTable {
    side: Side,
    inner: Arc<Shared>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl BodyTable {
    /// Wire a table to its models and attach delegated event routing.
    ///
    /// No table is drawn until [`render`](Self::render).
    pub fn new(options: BodyTableOptions) -> Result<Self, BodyTableError> {
        let BodyTableOptions {
            side,
            dimension,
            render,
            columns,
            painters,
            view_factory,
            config,
        } = options;

        let router = build_router(painters.as_ref())?;
        let shell = Shell::new(side, config, Arc::clone(&dimension), columns)?;
        let inner = Arc::new(Shared::new(Inner {
            shell,
            render_model: Arc::clone(&render),
            view_factory,
            router,
            row_list: None,
            destroyed: false,
        }));

        let weak = Arc::downgrade(&inner);
        let mut subscriptions = vec![dimension.subscribe_column_width_changed(reaction(
            &weak,
            side,
            ModelChange::ColumnWidth,
        ))];
        if side.is_right() {
            subscriptions.push(render.subscribe_dummy_row_count(reaction(
                &weak,
                side,
                ModelChange::DummyRowCount,
            )));
            subscriptions.push(dimension.subscribe_body_height(reaction(
                &weak,
                side,
                ModelChange::BodyHeight,
            )));
        }

        debug!(
            "[body_table] {} pane initialized: {} subscription(s)",
            side,
            subscriptions.len()
        );

        Ok(Self {
            side,
            inner,
            subscriptions: Mutex::new(subscriptions),
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    fn lock(&self) -> Result<Locked<'_>, BodyTableError> {
        if self.inner.is_held_here() {
            return Err(BodyTableError::Busy);
        }
        let inner = self.inner.lock();
        if inner.destroyed {
            return Err(BodyTableError::Destroyed);
        }
        Ok(inner)
    }

    /// Destroy the current rows, rebuild the shell with a fresh column group
    /// and an empty body, and let a new row collection fill it.
    pub fn render(&self) -> Result<&Self, BodyTableError> {
        self.lock()?.render()?;
        Ok(self)
    }

    /// Move the container to the current top offset.
    pub fn reset_table_position(&self) -> Result<(), BodyTableError> {
        self.lock()?.reset_table_position();
        Ok(())
    }

    /// Replace the whole table with a fresh column group around
    /// `tbody_markup`, in one write. Returns the id of the new body.
    ///
    /// Used instead of patching a populated body on engines where that is
    /// slow or broken.
    pub fn redraw_table(&self, tbody_markup: &str) -> Result<String, BodyTableError> {
        self.lock()?.shell.redraw_table(tbody_markup)
    }

    /// Replace the rows with `markup` using the configured redraw strategy.
    pub fn replace_rows(&self, markup: &str) -> Result<String, BodyTableError> {
        self.lock()?.shell.replace_rows(markup)
    }

    /// Let the current row collection redraw the body, keeping the shell.
    pub fn refresh_rows(&self) -> Result<(), BodyTableError> {
        let mut guard = self.lock()?;
        let inner = &mut *guard;
        let rows = inner
            .row_list
            .as_mut()
            .ok_or(BodyTableError::ShellNotRendered)?;
        rows.render(&mut BodySection::new(&mut inner.shell))
    }

    /// React to a model change. Subscriptions call this same path.
    pub fn handle_change(&self, change: ModelChange) -> Result<(), BodyTableError> {
        self.lock()?.handle_change(change)
    }

    /// Dispatch `event` at the element `target_id` through the delegated
    /// router. Returns how many handlers ran.
    ///
    /// Handlers run after the table is unlocked, so they may call back into it.
    pub fn dispatch(&self, event: &str, target_id: &str) -> Result<usize, BodyTableError> {
        let pending = {
            let inner = self.lock()?;
            inner.router.collect(&inner.shell.el, target_id, event)
        };

        match pending {
            Some(pending) => Ok(pending.fire()),
            None => Err(BodyTableError::ElementNotFound(target_id.to_string())),
        }
    }

    /// Number of listeners on the container, one per event name.
    pub fn listener_count(&self) -> usize {
        if self.inner.is_held_here() {
            warn!("[body_table] {} pane busy, listener count unavailable", self.side);
            return 0;
        }
        self.inner.lock().router.listener_count()
    }

    /// Number of live model subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Snapshot of the container element.
    pub fn element(&self) -> Result<Element, BodyTableError> {
        Ok(self.lock()?.shell.el.clone())
    }

    /// Outer markup of the container.
    pub fn to_markup(&self) -> Result<String, BodyTableError> {
        Ok(self.lock()?.shell.el.to_markup())
    }

    pub fn body_id(&self) -> Result<String, BodyTableError> {
        self.lock()?.shell.body_id()
    }

    /// Run `f` on the body element.
    pub fn with_body<R>(&self, f: impl FnOnce(&mut Element) -> R) -> Result<R, BodyTableError> {
        let mut inner = self.lock()?;
        Ok(f(inner.shell.body_mut()?))
    }

    /// Tear down: destroy the rows, cancel subscriptions, detach the router
    /// and empty the container. Idempotent.
    pub fn destroy(&self) {
        let subscriptions = std::mem::take(
            &mut *self
                .subscriptions
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        drop(subscriptions);

        if self.inner.is_held_here() {
            warn!("[body_table] {} pane busy, destroy ignored", self.side);
            return;
        }
        let mut inner = self.inner.lock();
        if inner.destroyed {
            return;
        }
        inner.destroy_children();
        inner.router.clear();
        inner.shell.el.clear_children();
        inner.destroyed = true;
        debug!("[body_table] {} pane destroyed", self.side);
    }
}

impl View for BodyTable {
    fn render(&self) -> Result<(), BodyTableError> {
        BodyTable::render(self).map(|_| ())
    }

    fn destroy(&self) {
        BodyTable::destroy(self);
    }

    fn handle_change(&self, change: ModelChange) -> Result<(), BodyTableError> {
        BodyTable::handle_change(self, change)
    }
}

impl Drop for BodyTable {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Subscription callback that forwards a change to the table.
///
/// Errors cannot travel back to the notifying model, so they are logged.
fn reaction<T: 'static>(shared: &Weak<Shared>, side: Side, change: ModelChange) -> Callback<T> {
    let shared = Weak::clone(shared);
    Arc::new(move |_: &T| {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        if shared.is_held_here() {
            debug!("[body_table] {} pane busy, {:?} deferred", side, change);
            shared.defer(change);
            return;
        }
        let mut inner = shared.lock();
        if inner.destroyed {
            return;
        }
        if let Err(err) = inner.handle_change(change) {
            error!("[body_table] {} pane: {:?} failed: {}", side, change, err);
        }
    })
}
