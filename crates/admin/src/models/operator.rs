//! Operator identity types.
//!
//! The authenticated operator as returned by the auth service's login and
//! refresh endpoints, stored verbatim in the panel session.

use serde::{Deserialize, Serialize};

use ageless_core::{Email, Role, UserId};

/// The currently authenticated operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Operator's ID on the auth service.
    pub id: UserId,
    /// Operator's email address, as validated by the auth service during the
    /// OAuth exchange.
    pub email: Email,
    /// Operator's display name.
    pub name: String,
    /// Avatar URL from the OAuth provider.
    #[serde(default)]
    pub picture: String,
    /// Auth provider label (e.g. "google").
    #[serde(default)]
    pub provider: String,
    /// Operator's role/permission level.
    pub role: Role,
}

impl Operator {
    /// Whether this operator holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"{
            "id": "665f1c2e9b3a",
            "email": "gm@agelessrepublic.gg",
            "name": "GM Sarah",
            "picture": "https://lh3.googleusercontent.com/a/x",
            "provider": "google",
            "role": "admin"
        }"#;
        let operator: Operator = serde_json::from_str(json).unwrap();
        assert_eq!(operator.role, Role::Admin);
        assert_eq!(operator.email.as_ref(), "gm@agelessrepublic.gg");
        assert!(operator.is_admin());
    }

    #[test]
    fn test_optional_profile_fields_default() {
        let json = r#"{"id": "1", "email": "a@b.c", "name": "A", "role": "user"}"#;
        let operator: Operator = serde_json::from_str(json).unwrap();
        assert_eq!(operator.picture, "");
        assert!(!operator.is_admin());
    }
}
