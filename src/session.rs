use chrono::Local;
use uuid::Uuid;

/// Three-state single-choice input used by the consent and age gates.
/// `Unset` is the sentinel that halts progression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Choice {
    #[default]
    Unset,
    Yes,
    No,
}

impl Choice {
    pub fn is_set(&self) -> bool {
        *self != Choice::Unset
    }
}

/// Per-session identifier: a local timestamp prefix plus a random token.
/// Uniqueness is the requirement, not cryptographic strength.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let stamp = Local::now().format("%Y%m%d-%H%M%S-");
        SessionId(format!("{}{}", stamp, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Qualitative banding of a final score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    Excellent,
    Good,
    Vulnerable,
}

impl Tier {
    /// Fixed thresholds with inclusive lower bounds (80% and 60% of the
    /// total); a score sitting exactly on a boundary takes the higher tier.
    pub fn for_score(score: usize, total: usize) -> Self {
        if score * 5 >= total * 4 {
            Tier::Excellent
        } else if score * 5 >= total * 3 {
            Tier::Good
        } else {
            Tier::Vulnerable
        }
    }
}

/// Final result of a completed quiz, including the per-label breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scorecard {
    pub score: usize,
    pub total: usize,
    pub tier: Tier,
    pub fake_caught: usize,
    pub fake_total: usize,
    pub real_spotted: usize,
    pub real_total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_choice_default_is_unset() {
        assert_eq!(Choice::default(), Choice::Unset);
        assert!(!Choice::default().is_set());
    }

    #[test]
    fn test_choice_is_set() {
        assert!(Choice::Yes.is_set());
        assert!(Choice::No.is_set());
        assert!(!Choice::Unset.is_set());
    }

    #[test]
    fn test_session_id_format() {
        let id = SessionId::generate();
        let s = id.as_str();

        // "YYYYMMDD-HHMMSS-" prefix followed by the random token
        assert!(s.len() > 16);
        let (stamp, token) = s.split_at(16);
        assert!(stamp.chars().take(8).all(|c| c.is_ascii_digit()));
        assert_eq!(&stamp[8..9], "-");
        assert!(stamp.ends_with('-'));
        assert!(!token.is_empty());
    }

    #[test]
    fn test_session_id_uniqueness() {
        let ids: HashSet<String> = (0..100)
            .map(|_| SessionId::generate().as_str().to_string())
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_session_id_display_matches_as_str() {
        let id = SessionId::generate();
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn test_tier_boundaries_total_20() {
        assert_eq!(Tier::for_score(20, 20), Tier::Excellent);
        assert_eq!(Tier::for_score(16, 20), Tier::Excellent);
        assert_eq!(Tier::for_score(15, 20), Tier::Good);
        assert_eq!(Tier::for_score(12, 20), Tier::Good);
        assert_eq!(Tier::for_score(11, 20), Tier::Vulnerable);
        assert_eq!(Tier::for_score(0, 20), Tier::Vulnerable);
    }

    #[test]
    fn test_tier_boundaries_total_16() {
        assert_eq!(Tier::for_score(16, 16), Tier::Excellent);
        // 0.8 * 16 = 12.8, so 13 is the lowest excellent score
        assert_eq!(Tier::for_score(13, 16), Tier::Excellent);
        assert_eq!(Tier::for_score(12, 16), Tier::Good);
        // 0.6 * 16 = 9.6
        assert_eq!(Tier::for_score(10, 16), Tier::Good);
        assert_eq!(Tier::for_score(9, 16), Tier::Vulnerable);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Excellent.to_string(), "excellent");
        assert_eq!(Tier::Good.to_string(), "good");
        assert_eq!(Tier::Vulnerable.to_string(), "vulnerable");
    }
}
