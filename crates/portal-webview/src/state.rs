//! Host UI state: loading, loaded, or failed.

/// Where the host is in its content lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Loaded,
    /// Terminal. Carries a human-readable description.
    Error(String),
}

/// The host's UI flags. An error always implies "not loading".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostState {
    phase: LoadPhase,
    can_go_back: bool,
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn is_loaded(&self) -> bool {
        self.phase == LoadPhase::Loaded
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    /// `Loading -> Loaded`. Returns `true` on the first transition only.
    /// Ignored once in `Error`.
    pub fn finish_load(&mut self) -> bool {
        match self.phase {
            LoadPhase::Loading => {
                self.phase = LoadPhase::Loaded;
                true
            }
            LoadPhase::Loaded | LoadPhase::Error(_) => false,
        }
    }

    /// Enter `Error`. Returns `false` if already failed; the first
    /// description wins.
    pub fn fail(&mut self, description: impl Into<String>) -> bool {
        if self.error().is_some() {
            return false;
        }
        self.phase = LoadPhase::Error(description.into());
        self.can_go_back = false;
        true
    }

    pub fn set_can_go_back(&mut self, can_go_back: bool) {
        if self.error().is_none() {
            self.can_go_back = can_go_back;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading() {
        let state = HostState::new();
        assert!(state.is_loading());
        assert!(state.error().is_none());
        assert!(!state.can_go_back());
    }

    #[test]
    fn loading_to_loaded_once() {
        let mut state = HostState::new();
        assert!(state.finish_load());
        assert!(state.is_loaded());
        assert!(!state.finish_load());
    }

    #[test]
    fn error_is_terminal() {
        let mut state = HostState::new();
        assert!(state.fail("The Internet connection appears to be offline."));
        assert!(!state.is_loading());
        assert!(!state.finish_load());
        assert!(!state.fail("second"));
        assert_eq!(
            state.error(),
            Some("The Internet connection appears to be offline.")
        );
    }

    #[test]
    fn error_after_loaded() {
        let mut state = HostState::new();
        state.finish_load();
        state.set_can_go_back(true);
        assert!(state.fail("gone"));
        assert!(!state.is_loaded());
        assert!(!state.can_go_back());
    }

    #[test]
    fn back_flag_frozen_in_error() {
        let mut state = HostState::new();
        state.fail("x");
        state.set_can_go_back(true);
        assert!(!state.can_go_back());
    }
}
