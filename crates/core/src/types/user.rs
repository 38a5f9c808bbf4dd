//! Session identity types.
//!
//! A session holds zero or one identity of each kind; the customer and
//! admin sessions are independent and may coexist.

use serde::{Deserialize, Serialize};

use super::id::{AdminUserId, UserId};

/// A customer identity, as returned by the login and register endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

/// An admin identity, as returned by the admin login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_roundtrip() {
        let user = User {
            id: UserId::new("u-1"),
            email: "rose@daisyatelier.com".to_owned(),
            name: "Rose".to_owned(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }

    #[test]
    fn test_admin_role_optional() {
        let json = serde_json::json!({
            "id": "a-1",
            "email": "ops@daisyatelier.com",
            "name": "Ops"
        });
        let admin: AdminUser = serde_json::from_value(json).unwrap();
        assert!(admin.role.is_none());
    }
}
