//! The store: current state, listeners, and the dispatch loop.
//!
//! `dispatch` reduces an action into a new [`AppState`] and then notifies
//! every listener, in registration order, before returning. Listeners cannot
//! reach the store itself; they get a [`Context`] whose `dispatch` only
//! queues. Queued actions are applied one at a time, each followed by its own
//! full notification pass, once the current pass is over. Applying an action
//! and notifying about it therefore never interleaves with another action.

use super::action::Action;
use super::reducer::root_reducer;
use super::state::AppState;
use crate::domain::error::{Result, ZearchError};
use std::collections::VecDeque;

/// Maximum number of actions applied for one external dispatch.
pub const MAX_CASCADE: usize = 64;

/// Something notified after every applied action.
pub trait Listener<E> {
    /// Called with the freshly reduced state.
    fn notify(&mut self, state: &AppState, cx: &mut Context<'_, E>);

    /// Label used in logs.
    fn name(&self) -> &'static str;
}

/// Handle lent to listeners during a notification pass.
///
/// Gives access to the injected environment and lets listeners feed
/// follow-up actions back into the store.
pub struct Context<'a, E> {
    env: &'a mut E,
    queue: &'a mut VecDeque<Action>,
}

impl<E> Context<'_, E> {
    /// Queues an action; it is applied after the current notification pass.
    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(action = action.kind(), "queued follow-up action");
        self.queue.push_back(action);
    }

    /// Returns the environment passed to [`Store::dispatch`].
    pub fn env(&mut self) -> &mut E {
        &mut *self.env
    }
}

/// Holds the application state and its listeners.
///
/// `E` is the effect environment handed to listeners on every dispatch;
/// the store never owns it, so callers decide where effects land.
pub struct Store<E> {
    state: AppState,
    listeners: Vec<Box<dyn Listener<E>>>,
    pending: VecDeque<Action>,
}

impl<E> Default for Store<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Store<E> {
    /// Creates a store holding the default state and no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Creates a store starting from `state`.
    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Registers a listener. Listeners are notified in registration order.
    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: Listener<E> + 'static,
    {
        tracing::debug!(listener = listener.name(), position = self.listeners.len(), "listener registered");
        self.listeners.push(Box::new(listener));
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Applies `action` and every follow-up action listeners queue in response.
    ///
    /// Returns the number of actions applied.
    ///
    /// # Errors
    ///
    /// Returns [`ZearchError::DispatchCascade`] if listeners keep queueing
    /// actions past [`MAX_CASCADE`]. Actions applied up to that point stay
    /// applied; the rest of the queue is dropped.
    pub fn dispatch(&mut self, action: Action, env: &mut E) -> Result<usize> {
        self.pending.push_back(action);

        let mut applied = 0;
        while let Some(action) = self.pending.pop_front() {
            if applied == MAX_CASCADE {
                tracing::warn!(dropped = self.pending.len() + 1, "dispatch cascade limit reached");
                self.pending.clear();
                return Err(ZearchError::DispatchCascade { limit: MAX_CASCADE });
            }
            applied += 1;

            let _span = tracing::debug_span!("dispatch", action = action.kind()).entered();
            self.state = root_reducer(&self.state, &action);

            let mut cx = Context {
                env: &mut *env,
                queue: &mut self.pending,
            };
            for listener in &mut self.listeners {
                listener.notify(&self.state, &mut cx);
            }
        }

        tracing::debug!(applied, "dispatch complete");
        Ok(applied)
    }
}

impl<E> std::fmt::Debug for Store<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}
