//! Role model

use serde::{Deserialize, Serialize};

/// Per-chat role of a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Moderator,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    /// True for ADMIN and MODERATOR
    pub fn is_moderator(self) -> bool {
        matches!(self, Role::Admin | Role::Moderator)
    }

    /// Privileged users are exempt from spam checks and cannot be reported
    pub fn is_privileged(self) -> bool {
        self.is_moderator()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Moderator => "MODERATOR",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
