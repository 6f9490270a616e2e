//! Side effects handed to the plugin runtime.
//!
//! Store effects and the event handler never talk to the host directly. They
//! queue [`Command`]s; the plugin shim executes them after each event, in
//! order.

use super::requests::RequestId;

/// An effect the plugin runtime carries out on the library's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP GET. The response comes back as
    /// [`Event::Response`](super::Event::Response) tagged with `request`.
    Fetch {
        /// Absolute URL.
        url: String,
        /// Identity echoed back with the response.
        request: RequestId,
    },

    /// Persists the location fragment (`#` + encoded filename).
    SetLocation {
        fragment: String,
    },
}
