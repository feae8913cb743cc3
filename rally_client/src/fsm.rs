//! Session State Machine
//!
//! Tracks where this client is in the setup → play → result flow. The match
//! itself has its own phases in `rally_core::MatchFsm`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Session states
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Creating,
    Ready,
    Playing,
    Finished,
}

/// Actions that trigger state transitions
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    CreateMatch,
    Created,
    CreateFailed,
    JoinMatch,
    Start,
    MatchEnded,
    Leave,
}

/// Result of a state transition
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_state: SessionState,
    to_state: SessionState,
    action: SessionAction,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_state(&self) -> SessionState {
        self.from_state
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_state(&self) -> SessionState {
        self.to_state
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn action(&self) -> SessionAction {
        self.action
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct SessionFsm {
    state: SessionState,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl SessionFsm {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Get current state
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn can_transition(&self, action: SessionAction) -> bool {
        self.get_next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: SessionAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            log::debug!("Session: {action:?} not allowed while {from_state:?}");
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    fn get_next_state(&self, action: SessionAction) -> Option<SessionState> {
        match (self.state, action) {
            // From Idle
            (SessionState::Idle, SessionAction::CreateMatch) => Some(SessionState::Creating),
            (SessionState::Idle, SessionAction::JoinMatch) => Some(SessionState::Ready),

            // From Creating
            (SessionState::Creating, SessionAction::Created) => Some(SessionState::Ready),
            (SessionState::Creating, SessionAction::CreateFailed) => Some(SessionState::Idle),

            // From Ready
            (SessionState::Ready, SessionAction::Start) => Some(SessionState::Playing),
            (SessionState::Ready, SessionAction::MatchEnded) => Some(SessionState::Finished),
            (SessionState::Ready, SessionAction::Leave) => Some(SessionState::Idle),

            // From Playing
            (SessionState::Playing, SessionAction::MatchEnded) => Some(SessionState::Finished),
            (SessionState::Playing, SessionAction::Leave) => Some(SessionState::Idle),

            // From Finished
            (SessionState::Finished, SessionAction::Leave) => Some(SessionState::Idle),

            // Invalid transition
            _ => None,
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn has_match(&self) -> bool {
        matches!(
            self.state,
            SessionState::Ready | SessionState::Playing | SessionState::Finished
        )
    }
}

impl Default for SessionFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let fsm = SessionFsm::new();
        assert_eq!(fsm.state(), SessionState::Idle);
        assert!(!fsm.has_match());
    }

    #[test]
    fn test_create_flow() {
        let mut fsm = SessionFsm::new();
        assert!(fsm.transition(SessionAction::CreateMatch).success);
        assert!(fsm.transition(SessionAction::Created).success);
        assert!(fsm.transition(SessionAction::Start).success);
        assert!(fsm.is_playing());
        assert!(fsm.transition(SessionAction::MatchEnded).success);
        assert_eq!(fsm.state(), SessionState::Finished);
        assert!(fsm.transition(SessionAction::Leave).success);
        assert_eq!(fsm.state(), SessionState::Idle);
    }

    #[test]
    fn test_failed_create_returns_to_idle() {
        let mut fsm = SessionFsm::new();
        fsm.transition(SessionAction::CreateMatch);
        let result = fsm.transition(SessionAction::CreateFailed);
        assert!(result.success);
        assert_eq!(result.from_state(), SessionState::Creating);
        assert_eq!(fsm.state(), SessionState::Idle);
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = SessionFsm::new();
        let result = fsm.transition(SessionAction::Start);
        assert!(!result.success);
        assert_eq!(result.to_state(), SessionState::Idle);
    }
}
