//! Match phase state machine
//!
//! Idle → Countdown → Running ⇄ Paused, and Running → Ended. Rejected
//! actions leave the phase untouched and report `success == false`.

use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// Match phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Idle,
    Countdown,
    Running,
    Paused,
    Ended,
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Idle => "idle",
            MatchPhase::Countdown => "countdown",
            MatchPhase::Running => "running",
            MatchPhase::Paused => "paused",
            MatchPhase::Ended => "ended",
        }
    }
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchAction {
    Start,
    CountdownDone,
    Pause,
    Resume,
    /// Display lost focus; pauses a running match only
    FocusLost,
    End,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from: MatchPhase,
    pub to: MatchPhase,
    pub action: MatchAction,
}

impl TransitionResult {
    pub fn into_result(self) -> Result<MatchPhase, StateError> {
        if self.success {
            Ok(self.to)
        } else {
            Err(StateError {
                action: self.action,
                phase: self.from,
            })
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchFsm {
    phase: MatchPhase,
}

impl MatchFsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn can_transition(&self, action: MatchAction) -> bool {
        self.next_phase(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let from = self.phase;

        match self.next_phase(action) {
            Some(to) => {
                self.phase = to;
                log::info!("Match phase {} -> {}", from.as_str(), to.as_str());
                TransitionResult {
                    success: true,
                    from,
                    to,
                    action,
                }
            }
            None => {
                log::debug!("Ignoring {action:?} while {}", from.as_str());
                TransitionResult {
                    success: false,
                    from,
                    to: from,
                    action,
                }
            }
        }
    }

    fn next_phase(&self, action: MatchAction) -> Option<MatchPhase> {
        match (self.phase, action) {
            (MatchPhase::Idle, MatchAction::Start) => Some(MatchPhase::Countdown),

            (MatchPhase::Countdown, MatchAction::CountdownDone) => Some(MatchPhase::Running),

            (MatchPhase::Running, MatchAction::Pause) => Some(MatchPhase::Paused),
            (MatchPhase::Running, MatchAction::FocusLost) => Some(MatchPhase::Paused),
            (MatchPhase::Running, MatchAction::End) => Some(MatchPhase::Ended),

            (MatchPhase::Paused, MatchAction::Resume) => Some(MatchPhase::Running),

            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn is_ended(&self) -> bool {
        self.phase == MatchPhase::Ended
    }

    /// Force a phase, used when adopting an authoritative snapshot
    pub fn sync(&mut self, phase: MatchPhase) {
        if self.phase != phase {
            log::debug!("Syncing phase {} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase() {
        assert_eq!(MatchFsm::new().phase(), MatchPhase::Idle);
    }

    #[test]
    fn test_full_flow() {
        let mut fsm = MatchFsm::new();
        assert!(fsm.transition(MatchAction::Start).success);
        assert_eq!(fsm.phase(), MatchPhase::Countdown);
        assert!(fsm.transition(MatchAction::CountdownDone).success);
        assert!(fsm.is_running());
        assert!(fsm.transition(MatchAction::Pause).success);
        assert_eq!(fsm.phase(), MatchPhase::Paused);
        assert!(fsm.transition(MatchAction::Resume).success);
        assert!(fsm.transition(MatchAction::End).success);
        assert!(fsm.is_ended());
    }

    #[test]
    fn test_pause_outside_running_is_rejected() {
        let mut fsm = MatchFsm::new();
        for action in [MatchAction::Pause, MatchAction::FocusLost, MatchAction::Resume] {
            let result = fsm.transition(action);
            assert!(!result.success);
            assert_eq!(result.to, MatchPhase::Idle);
        }

        fsm.transition(MatchAction::Start);
        assert!(!fsm.transition(MatchAction::Pause).success);
        assert_eq!(fsm.phase(), MatchPhase::Countdown);
    }

    #[test]
    fn test_focus_lost_does_not_resume() {
        let mut fsm = MatchFsm::new();
        fsm.transition(MatchAction::Start);
        fsm.transition(MatchAction::CountdownDone);
        fsm.transition(MatchAction::FocusLost);
        assert_eq!(fsm.phase(), MatchPhase::Paused);
        assert!(!fsm.transition(MatchAction::FocusLost).success);
        assert_eq!(fsm.phase(), MatchPhase::Paused);
    }

    #[test]
    fn test_ended_is_terminal() {
        let mut fsm = MatchFsm::new();
        fsm.transition(MatchAction::Start);
        fsm.transition(MatchAction::CountdownDone);
        fsm.transition(MatchAction::End);
        for action in [
            MatchAction::Start,
            MatchAction::CountdownDone,
            MatchAction::Pause,
            MatchAction::Resume,
            MatchAction::FocusLost,
            MatchAction::End,
        ] {
            assert!(!fsm.can_transition(action), "{action:?} after end");
        }
    }

    #[test]
    fn test_into_result_reports_rejection() {
        let mut fsm = MatchFsm::new();
        let err = fsm.transition(MatchAction::Resume).into_result().unwrap_err();
        assert_eq!(
            err,
            StateError {
                action: MatchAction::Resume,
                phase: MatchPhase::Idle
            }
        );
        assert_eq!(
            fsm.transition(MatchAction::Start).into_result(),
            Ok(MatchPhase::Countdown)
        );
    }
}
