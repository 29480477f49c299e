//! User entity: account holder and property owner.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `email` is the login identifier and `username` always mirrors it.
/// A `None` password hash is an unusable credential: the account exists but
/// cannot log in.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: Option<String>,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Returns true if the account has a password it can log in with.
    ///
    /// Accounts without a hash, or with an empty or `!`-prefixed one, are
    /// locked out of password login.
    pub fn has_usable_password(&self) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|h| !h.is_empty() && !h.starts_with('!'))
    }
}

/// Input data for creating a user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: Option<String>,
}

impl NewUser {
    /// Display name composed the way registration builds it.
    pub fn display_name(first_name: &str, last_name: &str) -> String {
        format!("{} {}", first_name.trim(), last_name.trim())
            .trim()
            .to_string()
    }
}

/// Partial update for a user. `None` fields are left unchanged.
///
/// Changing `email` also changes `username`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(NewUser::display_name("Asha", "Rao"), "Asha Rao");
        assert_eq!(NewUser::display_name(" Asha ", " Rao "), "Asha Rao");
        assert_eq!(NewUser::display_name("Asha", ""), "Asha");
    }

    #[test]
    fn test_usable_password() {
        let mut user = User {
            id: 1,
            email: "a@example.com".to_string(),
            username: "a@example.com".to_string(),
            name: "A B".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password_hash: None,
            date_joined: Utc::now(),
        };
        assert!(!user.has_usable_password());

        user.password_hash = Some(String::new());
        assert!(!user.has_usable_password());

        user.password_hash = Some("!locked".to_string());
        assert!(!user.has_usable_password());

        user.password_hash = Some("pbkdf2_sha256$1000$salt$hash".to_string());
        assert!(user.has_usable_password());
    }

    #[test]
    fn test_user_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
        let patch = UserPatch {
            name: Some("New".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
