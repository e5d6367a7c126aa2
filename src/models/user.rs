//! Participant model.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A competition participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Email, the identity key (compared case-insensitively)
    pub email: String,

    /// Display name
    pub username: String,
}

impl User {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
        }
    }

    /// Case-insensitive email match.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }

    /// Derive the user's PIN from their email.
    ///
    /// One-way salted SHA-256 hash reduced to 4 digits, so the same
    /// email always yields the same PIN without storing it anywhere.
    pub fn pin(&self, salt: &str) -> String {
        let salted = format!("{}{}", self.email.to_lowercase(), salt);

        let mut hasher = Sha256::new();
        hasher.update(salted.as_bytes());
        let digest = hasher.finalize();

        // Big-endian digest mod 10000, folded a byte at a time.
        let mut acc: u32 = 0;
        for byte in digest {
            acc = (acc * 256 + byte as u32) % 10_000;
        }

        format!("{:04}", acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_email_case_insensitive() {
        let user = User::new("Casey@Example.com", "Casey");
        assert!(user.matches_email("casey@example.com"));
        assert!(!user.matches_email("other@example.com"));
    }

    #[test]
    fn test_pin_deterministic() {
        let user = User::new("casey@example.com", "Casey");
        assert_eq!(user.pin("SALT"), user.pin("SALT"));
    }

    #[test]
    fn test_pin_ignores_email_case() {
        let lower = User::new("casey@example.com", "Casey");
        let upper = User::new("CASEY@EXAMPLE.COM", "Casey");
        assert_eq!(lower.pin("SALT"), upper.pin("SALT"));
    }

    #[test]
    fn test_pin_varies_with_salt() {
        let user = User::new("casey@example.com", "Casey");
        assert_ne!(user.pin("SALT_A"), user.pin("SALT_B"));
    }

    #[test]
    fn test_pin_is_four_digits() {
        let user = User::new("casey@example.com", "Casey");
        let pin = user.pin("SALT");
        assert_eq!(pin.len(), 4);
        assert!(pin.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_user_serialization() {
        let user = User::new("casey@example.com", "Casey");
        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
