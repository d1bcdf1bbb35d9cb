//! Broadcast store for cross-row UI state.
//!
//! One writer (the hover handlers), many readers (one subscription per row).
//! Every `set_state` notifies every listener synchronously, in subscription
//! order, without diffing; listeners filter for themselves. A row only reacts
//! when its own hovered flag flips, so a hover transition costs O(1) row updates
//! instead of a full re-render.
//!
//! Single-threaded by construction (`Rc<RefCell<..>>`). Listeners are released
//! through [`Unsubscribe`]; rows do that when they unmount.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::types::RowKey;

/// Shallow merge of a partial update into a state value
pub trait Merge<P> {
    fn merge(&mut self, patch: P);
}

type Listener = Rc<dyn Fn()>;

struct Inner<S> {
    state: S,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

/// Minimal subscribe/notify state container.
pub struct Store<S> {
    inner: Rc<RefCell<Inner<S>>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("state", &inner.state)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl<S: Clone + 'static> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: initial,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Snapshot of the current state
    pub fn get_state(&self) -> S {
        self.inner.borrow().state.clone()
    }

    /// Read the state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().state)
    }

    /// Merge `patch` and notify every listener, even if nothing changed.
    ///
    /// Listeners registered when the pass starts are the ones notified; they
    /// may read, write or (un)subscribe while it runs.
    pub fn set_state<P>(&self, patch: P)
    where
        S: Merge<P>,
    {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            inner.state.merge(patch);
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect()
        };
        for listener in listeners {
            listener();
        }
    }

    /// Register `listener`; the returned handle removes it again, explicitly or
    /// when dropped.
    #[must_use = "dropping the handle unsubscribes the listener"]
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Unsubscribe {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::new(listener)));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Unsubscribe {
            detach: Cell::new(Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let removed = {
                        let mut inner = inner.borrow_mut();
                        let position = inner.listeners.iter().position(|(i, _)| *i == id);
                        position.map(|pos| inner.listeners.remove(pos))
                    };
                    // Dropped after the borrow: the listener may own other handles
                    drop(removed);
                }
            }))),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Handle that does not keep the store alive
    pub fn downgrade(&self) -> WeakStore<S> {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning store handle, for listeners that must not form a cycle.
pub struct WeakStore<S> {
    inner: Weak<RefCell<Inner<S>>>,
}

impl<S> Clone for WeakStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S> WeakStore<S> {
    pub fn upgrade(&self) -> Option<Store<S>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

/// Removes one listener, on `unsubscribe()` or on drop. Calling it more than
/// once is a no-op.
pub struct Unsubscribe {
    detach: Cell<Option<Box<dyn FnOnce()>>>,
}

impl Unsubscribe {
    pub fn unsubscribe(&self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    pub fn is_active(&self) -> bool {
        // Cell<Option<Box<_>>> cannot be peeked; swap out and back
        let detach = self.detach.take();
        let active = detach.is_some();
        self.detach.set(detach);
        active
    }
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("active", &self.is_active())
            .finish()
    }
}

/// State shared by all rows of one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub current_hover_key: Option<RowKey>,
}

/// Partial update of [`TableState`]'s hover key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverPatch {
    pub current_hover_key: Option<RowKey>,
}

impl Merge<HoverPatch> for TableState {
    fn merge(&mut self, patch: HoverPatch) {
        self.current_hover_key = patch.current_hover_key;
    }
}

/// A row's subscription to the hover broadcast.
///
/// Tracks whether the broadcast key is this row's key, and calls `on_change`
/// only when that flips. Dropping it drops the subscription with it.
pub struct RowHover {
    key: RowKey,
    hovered: Rc<Cell<bool>>,
    subscription: Unsubscribe,
}

impl RowHover {
    pub fn mount(
        store: &Store<TableState>,
        key: RowKey,
        on_change: impl Fn(bool) + 'static,
    ) -> Self {
        let hovered = Rc::new(Cell::new(
            store.with_state(|s| s.current_hover_key.as_ref() == Some(&key)),
        ));
        let flag = Rc::clone(&hovered);
        let weak = store.downgrade();
        let own_key = key.clone();
        let subscription = store.subscribe(move || {
            let Some(store) = weak.upgrade() else {
                return;
            };
            let is_hovered =
                store.with_state(|s| s.current_hover_key.as_ref() == Some(&own_key));
            if is_hovered != flag.get() {
                flag.set(is_hovered);
                on_change(is_hovered);
            }
        });
        Self {
            key,
            hovered,
            subscription,
        }
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered.get()
    }

    pub fn unmount(&self) {
        self.subscription.unsubscribe();
    }
}

impl fmt::Debug for RowHover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowHover")
            .field("key", &self.key)
            .field("hovered", &self.hovered.get())
            .finish()
    }
}
