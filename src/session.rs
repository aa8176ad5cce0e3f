//! Session state shared by the input and lifecycle paths.

/// Whether the player is in a level, and the host's elapsed level time.
///
/// Owned by the [`Bridge`](crate::Bridge); every callback reaches it through
/// `&mut self`, so it needs no synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionState {
    is_in_level: bool,
    current_time: f64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_level(&self) -> bool {
        self.is_in_level
    }

    /// Set the in-level flag, returning whether it changed.
    pub fn set_in_level(&mut self, is_in_level: bool) -> bool {
        let changed = self.is_in_level != is_in_level;
        self.is_in_level = is_in_level;
        changed
    }

    /// Last refreshed level time. Only meaningful while in a level.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn set_current_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Back to defaults (level left or bridge torn down).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = SessionState::new();
        assert!(!state.is_in_level());
        assert_eq!(state.current_time(), 0.0);
    }

    #[test]
    fn test_set_in_level_reports_edges() {
        let mut state = SessionState::new();
        assert!(state.set_in_level(true));
        assert!(!state.set_in_level(true));
        assert!(state.set_in_level(false));
        assert!(!state.set_in_level(false));
    }

    #[test]
    fn test_clear() {
        let mut state = SessionState::new();
        state.set_in_level(true);
        state.set_current_time(4.5);
        state.clear();
        assert_eq!(state, SessionState::default());
    }
}
