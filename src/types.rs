/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Coarse authorization category carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }
}

/// Fine-grained capability checked by set membership, OR semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Create,
    Read,
    Update,
    Delete,
}

impl Permission {
    /// The full set granted to the first (admin) user at signup.
    pub const ALL: [Permission; 4] = [
        Permission::Create,
        Permission::Read,
        Permission::Update,
        Permission::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Create => "create",
            Permission::Read => "read",
            Permission::Update => "update",
            Permission::Delete => "delete",
        }
    }

    pub fn parse(value: &str) -> Option<Permission> {
        match value {
            "create" => Some(Permission::Create),
            "read" => Some(Permission::Read),
            "update" => Some(Permission::Update),
            "delete" => Some(Permission::Delete),
            _ => None,
        }
    }
}

/// Lifecycle state shared by accounts and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Status> {
        match value {
            "active" => Some(Status::Active),
            "inactive" => Some(Status::Inactive),
            _ => None,
        }
    }
}

/// Offset/limit pair accepted by every list endpoint.
///
/// Defaults match the original API contract: offset 1, limit 10.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default = "Pagination::default_offset")]
    pub offset: i64,
    #[serde(default = "Pagination::default_limit")]
    pub limit: i64,
}

impl Pagination {
    fn default_offset() -> i64 {
        1
    }

    fn default_limit() -> i64 {
        10
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { offset: 1, limit: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_round_trips_through_strings() {
        for p in Permission::ALL {
            assert_eq!(Permission::parse(p.as_str()), Some(p));
        }
        assert_eq!(Permission::parse("drop"), None);
    }

    #[test]
    fn role_parse_rejects_unknown() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn pagination_defaults_apply_when_query_is_empty() {
        let page: Pagination = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(page.offset, 1);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn pagination_honors_explicit_values() {
        let page: Pagination =
            serde_json::from_value(serde_json::json!({"offset": 0, "limit": 3})).unwrap();
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 3);
    }
}
