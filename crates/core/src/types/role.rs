//! User role.

use serde::{Deserialize, Serialize};

/// Role attached to a marketplace user.
///
/// Every user starts as a [`Role::Customer`]; elevation to [`Role::Admin`]
/// only happens through an admin action (or the CLI bootstrap command).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular marketplace customer.
    #[default]
    Customer,
    /// Full access to catalog and user management.
    Admin,
}

impl Role {
    /// Whether this role grants admin-gated operations.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_str() {
        for role in [Role::Customer, Role::Admin] {
            let parsed: Role = role.to_string().parse().expect("role should parse");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_default_is_customer() {
        assert_eq!(Role::default(), Role::Customer);
        assert!(!Role::default().is_admin());
    }
}
