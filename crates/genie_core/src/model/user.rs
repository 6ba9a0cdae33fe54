//! User account record.
//!
//! Passwords are stored and compared in plaintext. This matches the stored
//! shape of the app's user list; production use needs a credential-hashing
//! scheme, which would change that shape.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

use super::ValidationError;

/// Registered account, also used as the session record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub name: String,
    /// Unique key within the user list, compared case-sensitively.
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            remember_me: false,
        }
    }

    /// Checks fields the repository relies on as keys.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        Ok(())
    }

    /// Plaintext credential check used by authentication.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn serializes_with_camel_case_remember_me() {
        let mut user = User::new("Ada", "ada@example.com", "secret1");
        user.remember_me = true;
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["rememberMe"], true);
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn debug_output_hides_password() {
        let user = User::new("Ada", "ada@example.com", "secret1");
        assert!(!format!("{user:?}").contains("secret1"));
    }

    #[test]
    fn credential_match_is_case_sensitive() {
        let user = User::new("Ada", "ada@example.com", "secret1");
        assert!(user.matches_credentials("ada@example.com", "secret1"));
        assert!(!user.matches_credentials("Ada@example.com", "secret1"));
        assert!(!user.matches_credentials("ada@example.com", "Secret1"));
    }
}
