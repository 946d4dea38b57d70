//! Operator roles and route allow-list checking.
//!
//! The auth service attaches a coarse-grained role string to every operator.
//! Known values are `admin`, `user` and `nothing` (the no-access placeholder
//! assigned to freshly registered accounts until an admin grants access).
//! Roles the backend may introduce later deserialize into [`Role::Unknown`]
//! and are denied by any allow-list that does not enumerate them exactly.

use serde::{Deserialize, Serialize};

/// Operator role with different permission levels.
///
/// Allow-list membership is checked by exact equality, so an unrecognized
/// role string never satisfies a list built from the known variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full access, including user management.
    Admin,
    /// Regular operator access to the moderation pages.
    User,
    /// No access. Assigned to new accounts pending approval; every guarded
    /// page denies this role before the allow-list is even consulted.
    Nothing,
    /// A role string this panel does not recognize. Deny-by-default.
    Unknown(String),
}

impl Role {
    /// Default allow-list for guarded routes: any authenticated role except
    /// the deny-all placeholder.
    pub const DEFAULT_ALLOWED: &'static [Self] = &[Self::Admin, Self::User];

    /// Allow-list for admin-only routes.
    pub const ADMIN_ONLY: &'static [Self] = &[Self::Admin];

    /// Whether this role is a member of the given allow-list.
    ///
    /// Exact membership only: `Nothing` and `Unknown` roles pass solely when
    /// explicitly listed, which in practice never happens.
    #[must_use]
    pub fn is_allowed(&self, allow_list: &[Self]) -> bool {
        allow_list.contains(self)
    }

    /// The backend's string form of this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Nothing => "nothing",
            Self::Unknown(s) => s,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "admin" => Self::Admin,
            "user" => Self::User,
            "nothing" => Self::Nothing,
            _ => Self::Unknown(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_roundtrip() {
        for s in ["admin", "user", "nothing"] {
            let role = Role::from(s);
            assert_eq!(role.as_str(), s);
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{s}\""));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn test_unknown_role_preserved() {
        let role: Role = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, Role::Unknown("moderator".to_owned()));
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"moderator\"");
    }

    #[test]
    fn test_default_allow_list() {
        assert!(Role::Admin.is_allowed(Role::DEFAULT_ALLOWED));
        assert!(Role::User.is_allowed(Role::DEFAULT_ALLOWED));
        assert!(!Role::Nothing.is_allowed(Role::DEFAULT_ALLOWED));
        assert!(!Role::Unknown("moderator".into()).is_allowed(Role::DEFAULT_ALLOWED));
    }

    #[test]
    fn test_admin_only_allow_list() {
        assert!(Role::Admin.is_allowed(Role::ADMIN_ONLY));
        assert!(!Role::User.is_allowed(Role::ADMIN_ONLY));
        assert!(!Role::Nothing.is_allowed(Role::ADMIN_ONLY));
    }

    #[test]
    fn test_unknown_denied_unless_enumerated() {
        let moderator = Role::Unknown("moderator".into());
        assert!(!moderator.is_allowed(Role::DEFAULT_ALLOWED));
        // Exact membership still works if a list does enumerate it.
        let list = [Role::Unknown("moderator".into())];
        assert!(moderator.is_allowed(&list));
    }
}
