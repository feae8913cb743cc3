use rand::Rng;
use serde::{Deserialize, Serialize};

/// Five-character match code drawn from A-Z and 0-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId([u8; MatchId::LEN]);

impl MatchId {
    pub const LEN: usize = 5;
    const CHARS: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut code = [0u8; Self::LEN];
        for byte in code.iter_mut() {
            *byte = Self::CHARS[rng.gen_range(0..Self::CHARS.len())];
        }
        Self(code)
    }

    /// Parse a code, accepting lowercase input
    pub fn parse(code: &str) -> Option<Self> {
        let bytes = code.trim().to_ascii_uppercase().into_bytes();
        if bytes.len() != Self::LEN || !bytes.iter().all(|b| Self::CHARS.contains(b)) {
            return None;
        }
        let mut id = [0u8; Self::LEN];
        id.copy_from_slice(&bytes);
        Some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        // Only ever built from ASCII code characters
        std::str::from_utf8(&self.0).unwrap_or("?????")
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_random_codes_use_allowed_characters() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let id = MatchId::random(&mut rng);
            assert_eq!(id.as_str().len(), 5);
            assert!(id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
            assert_eq!(MatchId::parse(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_parse_rejects_bad_codes() {
        assert_eq!(MatchId::parse("ab1cd").map(|id| id.to_string()), Some("AB1CD".to_string()));
        assert_eq!(MatchId::parse("ABCD"), None);
        assert_eq!(MatchId::parse("ABCDEF"), None);
        assert_eq!(MatchId::parse("AB-CD"), None);
    }
}
