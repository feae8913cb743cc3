use crate::{MatchId, MatchSnapshot, SessionError};

/// Longest difficulty name accepted at the session boundary
pub const MAX_DIFFICULTY_NAME_LEN: usize = 32;

/// Session contract between a display client and whoever hosts matches
pub trait MatchService {
    /// Create an idle match for `player_name`
    ///
    /// Unknown but well-formed difficulty names fall back to normal.
    fn create_match(&mut self, player_name: &str, difficulty: &str)
        -> Result<MatchId, SessionError>;

    /// Latest authoritative state of a match
    fn fetch_state(&self, match_id: &MatchId) -> Result<MatchSnapshot, SessionError>;

    /// Move an idle match into its countdown
    fn start_match(&mut self, match_id: &MatchId) -> Result<(), SessionError>;
}

/// Reject difficulty names no profile could ever carry
pub fn validate_difficulty_name(name: &str) -> Result<&str, SessionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SessionError::InvalidInput(
            "difficulty must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_DIFFICULTY_NAME_LEN {
        return Err(SessionError::InvalidInput(format!(
            "difficulty is longer than {MAX_DIFFICULTY_NAME_LEN} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(SessionError::InvalidInput(format!(
            "difficulty {name:?} contains unsupported characters"
        )));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_names_pass() {
        assert_eq!(validate_difficulty_name(" hard "), Ok("hard"));
        assert_eq!(validate_difficulty_name("super_hard-2"), Ok("super_hard-2"));
        assert_eq!(validate_difficulty_name("fácil"), Ok("fácil"));
        assert_eq!(validate_difficulty_name("difícil"), Ok("difícil"));
    }

    #[test]
    fn test_malformed_names_fail() {
        let long = "x".repeat(33);
        for name in ["", "   ", "very hard", "hard!", long.as_str()] {
            assert!(
                matches!(
                    validate_difficulty_name(name),
                    Err(SessionError::InvalidInput(_))
                ),
                "{name:?} should be rejected"
            );
        }
    }
}
