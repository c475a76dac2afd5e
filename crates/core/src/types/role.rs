//! Roles governing which views a principal may access.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a role string fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// The role of the principal currently using the client.
///
/// Serialized with capitalized variant names (`"Customer"`, `"Seller"`,
/// `"Anonymous"`) - the exact strings the API and durable storage use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Nobody is logged in.
    #[default]
    Anonymous,
    /// A shopper with a cart and order history.
    Customer,
    /// A merchant managing their own product listings.
    Seller,
}

impl Role {
    /// The capitalized wire string for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "Anonymous",
            Self::Customer => "Customer",
            Self::Seller => "Seller",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Anonymous" => Ok(Self::Anonymous),
            "Customer" => Ok(Self::Customer),
            "Seller" => Ok(Self::Seller),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

/// The role carried inside an authenticated identity.
///
/// A logged-in principal is always a customer or a seller - never anonymous.
/// Keeping this a separate type makes the "role is `Anonymous` iff nobody is
/// logged in" invariant structural instead of a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountRole {
    /// A shopper account.
    Customer,
    /// A merchant account.
    Seller,
}

impl AccountRole {
    /// The capitalized wire string for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Seller => "Seller",
        }
    }
}

impl From<AccountRole> for Role {
    fn from(role: AccountRole) -> Self {
        match role {
            AccountRole::Customer => Self::Customer,
            AccountRole::Seller => Self::Seller,
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Customer" => Ok(Self::Customer),
            "Seller" => Ok(Self::Seller),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Anonymous, Role::Customer, Role::Seller] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert!("admin".parse::<Role>().is_err());
        assert!("customer".parse::<Role>().is_err());
    }

    #[test]
    fn test_account_role_never_anonymous() {
        assert!("Anonymous".parse::<AccountRole>().is_err());
    }

    #[test]
    fn test_account_role_widens() {
        assert_eq!(Role::from(AccountRole::Customer), Role::Customer);
        assert_eq!(Role::from(AccountRole::Seller), Role::Seller);
    }

    #[test]
    fn test_serde_uses_capitalized_strings() {
        let json = serde_json::to_string(&Role::Customer).unwrap();
        assert_eq!(json, "\"Customer\"");
        let json = serde_json::to_string(&AccountRole::Seller).unwrap();
        assert_eq!(json, "\"Seller\"");
    }
}
