//! Request identity and the stale-response policy.
//!
//! Every fetch carries a [`RequestId`]: its kind plus a per-kind generation
//! number. The id travels through the host in the request context map and
//! comes back with the response, so the browser can tell whether the answer
//! still belongs to the latest request of its kind.

use std::collections::BTreeMap;
use std::fmt;

const KIND_KEY: &str = "zearch.kind";
const GENERATION_KEY: &str = "zearch.generation";

/// What a request fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Search,
    File,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::File => "file",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "search" => Some(Self::Search),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId {
    pub kind: RequestKind,
    pub generation: u64,
}

impl RequestId {
    /// Encodes the id into a host request context.
    #[must_use]
    pub fn to_context(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (KIND_KEY.to_string(), self.kind.as_str().to_string()),
            (GENERATION_KEY.to_string(), self.generation.to_string()),
        ])
    }

    /// Decodes an id from a host request context.
    ///
    /// Returns `None` for contexts that were not produced by [`Self::to_context`].
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let kind = RequestKind::parse(context.get(KIND_KEY)?)?;
        let generation = context.get(GENERATION_KEY)?.parse().ok()?;
        Some(Self { kind, generation })
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.kind.as_str(), self.generation)
    }
}

/// What to do with a response that is no longer the latest of its kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Drop it.
    #[default]
    Discard,
    /// Apply it anyway; the last response to arrive wins.
    Apply,
}

impl StalePolicy {
    /// Parses a configuration value (`discard` or `apply`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "discard" => Some(Self::Discard),
            "apply" => Some(Self::Apply),
            _ => None,
        }
    }
}

/// Hands out generations and remembers the latest one per kind.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    search: u64,
    file: u64,
}

impl RequestTracker {
    fn slot(&mut self, kind: RequestKind) -> &mut u64 {
        match kind {
            RequestKind::Search => &mut self.search,
            RequestKind::File => &mut self.file,
        }
    }

    /// Allocates the id for a new request, superseding earlier ones.
    pub fn issue(&mut self, kind: RequestKind) -> RequestId {
        let slot = self.slot(kind);
        *slot += 1;
        RequestId {
            kind,
            generation: *slot,
        }
    }

    /// Supersedes every outstanding request of `kind` without issuing one.
    pub fn invalidate(&mut self, kind: RequestKind) {
        *self.slot(kind) += 1;
    }

    /// Returns `true` if `id` is the latest request of its kind.
    #[must_use]
    pub const fn is_current(&self, id: RequestId) -> bool {
        let latest = match id.kind {
            RequestKind::Search => self.search,
            RequestKind::File => self.file,
        };
        id.generation == latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trip_and_foreign_contexts() {
        let id = RequestId {
            kind: RequestKind::File,
            generation: 7,
        };
        assert_eq!(RequestId::from_context(&id.to_context()), Some(id));

        let mut foreign = BTreeMap::new();
        assert_eq!(RequestId::from_context(&foreign), None);
        foreign.insert(KIND_KEY.to_string(), "search".to_string());
        foreign.insert(GENERATION_KEY.to_string(), "many".to_string());
        assert_eq!(RequestId::from_context(&foreign), None);
    }

    #[test]
    fn newer_requests_supersede_older_ones_per_kind() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue(RequestKind::Search);
        let file = tracker.issue(RequestKind::File);
        let second = tracker.issue(RequestKind::Search);

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(tracker.is_current(file));
    }

    #[test]
    fn invalidate_leaves_nothing_current() {
        let mut tracker = RequestTracker::default();
        let id = tracker.issue(RequestKind::Search);
        tracker.invalidate(RequestKind::Search);
        assert!(!tracker.is_current(id));
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!(StalePolicy::parse(" Apply "), Some(StalePolicy::Apply));
        assert_eq!(StalePolicy::parse("discard"), Some(StalePolicy::Discard));
        assert_eq!(StalePolicy::parse("keep"), None);
        assert_eq!(id_display(), "search#3");
    }

    fn id_display() -> String {
        RequestId {
            kind: RequestKind::Search,
            generation: 3,
        }
        .to_string()
    }
}
