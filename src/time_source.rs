//! Elapsed level time from the host's live gameplay session.

use crate::host::{HostLayout, SessionHandle};

/// Host level time, or `0.0` when no gameplay session is live.
///
/// Pure read: callers decide whether to store the value in
/// [`SessionState`](crate::SessionState).
pub fn read_time(session: Option<SessionHandle<'_>>, layout: &HostLayout) -> f64 {
    session.map_or(0.0, |session| layout.session_time(session))
}
