//! # Users and roles
//!
//! [`User`] is the record returned by `/auth/me` and the `/admin/users`
//! endpoints. The request bodies for creating, updating, and signing up
//! users live here as well so the admin modals and the register page share
//! one shape.

use serde::{Deserialize, Serialize};

/// The three account roles. Serialised lower-case, as the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Admin => "Admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "student" => Some(Role::Student),
            "teacher" => Some(Role::Teacher),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Teachers and admins may manage course content.
    pub fn can_teach(&self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub program_id: Option<i64>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Upper-case first letter of the name, for avatar bubbles.
    pub fn initial(&self) -> char {
        self.full_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }

    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or("")
    }

    /// Case-insensitive match on name or email, used by the admin user list.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.full_name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
    }
}

/// `POST /auth/token` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// `POST /auth/signup` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// `POST /admin/users` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: Role,
    pub program_id: Option<i64>,
}

/// `PATCH /admin/users/{id}` body. A `None` password leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserUpdate {
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    pub program_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_backend_json() {
        let user: User = serde_json::from_str(
            r#"{"id":7,"email":"ada@example.com","full_name":"Ada Lovelace","role":"teacher","is_active":true,"hashed_password":"x"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Teacher);
        assert_eq!(user.initial(), 'A');
        assert_eq!(user.first_name(), "Ada");
        assert!(user.program_id.is_none());
    }

    #[test]
    fn test_user_matches() {
        let user = User {
            id: 1,
            email: "grace@navy.mil".into(),
            full_name: "Grace Hopper".into(),
            role: Role::Student,
            is_active: true,
            program_id: None,
        };
        assert!(user.matches("hop"));
        assert!(user.matches("NAVY"));
        assert!(user.matches("  "));
        assert!(!user.matches("turing"));
    }

    #[test]
    fn test_update_omits_empty_password() {
        let update = UserUpdate {
            email: "a@b.c".into(),
            full_name: "A".into(),
            password: None,
            role: Role::Admin,
            program_id: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "admin");
    }
}
