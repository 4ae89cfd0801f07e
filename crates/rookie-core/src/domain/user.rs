use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The logged-in identity. A nickname, not an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub nickname: String,
}

impl User {
    /// Build a user from raw input; blank nicknames yield `None`.
    pub fn from_nickname(raw: &str) -> Option<Self> {
        let nickname = raw.trim();
        if nickname.is_empty() {
            None
        } else {
            Some(Self {
                nickname: nickname.to_string(),
            })
        }
    }
}

/// Caller-side check run before `SessionStore::login`.
pub fn validate_nickname(raw: &str) -> Result<String, DomainError> {
    User::from_nickname(raw)
        .map(|user| user.nickname)
        .ok_or_else(|| DomainError::Validation("nickname must not be empty".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_nickname_trims() {
        assert_eq!(User::from_nickname("  lee ").unwrap().nickname, "lee");
        assert!(User::from_nickname(" \t").is_none());
    }

    #[test]
    fn test_validate_nickname() {
        assert_eq!(validate_nickname("park").unwrap(), "park");
        assert!(matches!(validate_nickname(""), Err(DomainError::Validation(_))));
    }
}
