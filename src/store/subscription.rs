//! Selector subscriptions with a remembered previous value.
//!
//! A [`Subscription`] watches one value derived from [`AppState`] and runs its
//! callback only when that value changes. Change detection is shallow: slices
//! and results compare by `Arc` identity ([`by_ref`]), strings and flags by
//! value ([`by_value`]). Only the last seen value is remembered, so a value
//! that flips back to an earlier one counts as a change again.

use super::state::AppState;
use super::store::{Context, Listener};
use std::sync::Arc;

/// Equality used to decide whether a selected value changed.
pub type Equality<T> = fn(&T, &T) -> bool;

/// Value equality, for primitives and owned strings.
pub fn by_value<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Identity equality, for shared slices.
pub fn by_ref<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    Arc::ptr_eq(a, b)
}

type Selector<T> = Box<dyn Fn(&AppState) -> Option<T>>;
type Callback<T, E> = Box<dyn FnMut(Option<&T>, &mut Context<'_, E>)>;

/// Store listener that fires a callback when its selected value changes.
///
/// The selector returns `None` when the watched value is absent. The
/// remembered value starts out as `None` too, so a value that is still absent
/// on the first notification does not fire.
pub struct Subscription<T, E> {
    name: &'static str,
    select: Selector<T>,
    same: Equality<T>,
    last: Option<T>,
    callback: Callback<T, E>,
}

impl<T, E> Subscription<T, E> {
    /// Creates a subscription.
    ///
    /// * `name` - label used in logs
    /// * `select` - picks the watched value out of the state
    /// * `same` - equality deciding whether the value changed
    /// * `callback` - runs with the new value after each change
    pub fn new<S, F>(name: &'static str, select: S, same: Equality<T>, callback: F) -> Self
    where
        S: Fn(&AppState) -> Option<T> + 'static,
        F: FnMut(Option<&T>, &mut Context<'_, E>) + 'static,
    {
        Self {
            name,
            select: Box::new(select),
            same,
            last: None,
            callback: Box::new(callback),
        }
    }

    fn unchanged(&self, next: Option<&T>) -> bool {
        match (self.last.as_ref(), next) {
            (None, None) => true,
            (Some(prev), Some(next)) => (self.same)(prev, next),
            _ => false,
        }
    }
}

impl<T, E> Listener<E> for Subscription<T, E> {
    fn notify(&mut self, state: &AppState, cx: &mut Context<'_, E>) {
        let next = (self.select)(state);
        if self.unchanged(next.as_ref()) {
            return;
        }
        tracing::trace!(subscription = self.name, "selected value changed");
        self.last = next;
        (self.callback)(self.last.as_ref(), cx);
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl<T, E> std::fmt::Debug for Subscription<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.name)
            .field("has_value", &self.last.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::action::{fetch_query_result, set_file, set_query_term};
    use crate::store::Store;

    #[derive(Default)]
    struct Calls(Vec<String>);

    fn name_subscription() -> Subscription<String, Calls> {
        Subscription::new(
            "file.name",
            |s: &AppState| s.file.name.clone(),
            by_value,
            |name: Option<&String>, cx: &mut Context<'_, Calls>| {
                cx.env().0.push(name.cloned().unwrap_or_default());
            },
        )
    }

    #[test]
    fn same_value_twice_fires_once() {
        let mut store = Store::new();
        let mut calls = Calls::default();
        store.subscribe(name_subscription());

        store.dispatch(set_file("pkg/x.go"), &mut calls).unwrap();
        store.dispatch(set_file("pkg/x.go"), &mut calls).unwrap();

        assert_eq!(calls.0, vec!["pkg/x.go"]);
    }

    #[test]
    fn absent_value_does_not_fire_on_first_notification() {
        let mut store = Store::new();
        let mut calls = Calls::default();
        store.subscribe(name_subscription());

        store.dispatch(set_query_term("foo"), &mut calls).unwrap();
        assert!(calls.0.is_empty());
    }

    #[test]
    fn present_value_fires_on_first_notification() {
        let mut store = Store::new();
        let mut calls = Calls::default();
        store.subscribe(Subscription::new(
            "query.is_querying",
            |s: &AppState| Some(s.query.is_querying),
            by_value,
            |busy: Option<&bool>, cx: &mut Context<'_, Calls>| {
                cx.env().0.push(format!("{busy:?}"));
            },
        ));

        store.dispatch(set_query_term("foo"), &mut calls).unwrap();
        store.dispatch(set_query_term("bar"), &mut calls).unwrap();
        store.dispatch(fetch_query_result(), &mut calls).unwrap();

        assert_eq!(calls.0, vec!["Some(false)", "Some(true)"]);
    }

    #[test]
    fn reference_equality_sees_rebuilt_slices_as_changed() {
        let mut store = Store::new();
        let mut calls = Calls::default();
        store.subscribe(Subscription::new(
            "file",
            |s: &AppState| Some(Arc::clone(&s.file)),
            by_ref,
            |_: Option<&Arc<crate::store::FileState>>, cx: &mut Context<'_, Calls>| {
                cx.env().0.push("file".to_string());
            },
        ));

        store.dispatch(set_file("a.go"), &mut calls).unwrap();
        store.dispatch(set_query_term("foo"), &mut calls).unwrap();
        store.dispatch(set_file("a.go"), &mut calls).unwrap();

        assert_eq!(calls.0.len(), 2);
    }

    #[test]
    fn flip_back_counts_as_a_change() {
        let mut store = Store::new();
        let mut calls = Calls::default();
        store.subscribe(name_subscription());

        store.dispatch(set_file("a.go"), &mut calls).unwrap();
        store.dispatch(set_file("b.go"), &mut calls).unwrap();
        store.dispatch(set_file("a.go"), &mut calls).unwrap();

        assert_eq!(calls.0, vec!["a.go", "b.go", "a.go"]);
    }
}
