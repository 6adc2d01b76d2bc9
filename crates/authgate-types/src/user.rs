//! Backend-owned user and facility records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(alias = "student")]
    Student,
    #[serde(alias = "admin")]
    Admin,
}

/// The authenticated application user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub role: UserRole,
    /// Set when the user must choose a new password before doing anything else.
    #[serde(default)]
    pub password_reset: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_last: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub timezone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_accepts_both_casings() {
        let admin: User =
            serde_json::from_str(r#"{"id": 1, "role": "Admin", "password_reset": false}"#).unwrap();
        let student: User = serde_json::from_str(r#"{"id": 2, "role": "student"}"#).unwrap();
        assert!(admin.is_admin());
        assert_eq!(student.role, UserRole::Student);
        assert!(!student.password_reset);
    }

    #[test]
    fn test_user_keeps_unknown_fields() {
        let user: User = serde_json::from_str(
            r#"{"id": 3, "role": "Student", "username": "sam", "facility_id": 1}"#,
        )
        .unwrap();
        assert_eq!(user.username.as_deref(), Some("sam"));
        assert_eq!(user.extra["facility_id"], 1);
    }
}
