use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff role. Switching roles is a local toggle, not an auth operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Engineer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Engineer => "engineer",
            UserRole::Admin => "admin",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UserRole::Engineer => UserRole::Admin,
            UserRole::Admin => UserRole::Engineer,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Staff identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub role: UserRole,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: String::new(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_toggle_round_trips() {
        assert_eq!(UserRole::Engineer.toggled(), UserRole::Admin);
        assert_eq!(UserRole::Admin.toggled(), UserRole::Engineer);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Engineer).unwrap();
        assert_eq!(json, "\"engineer\"");
    }
}
