//! Route guard: gate navigation to role-restricted views.
//!
//! The guard is a pure function of (current role, required access). It is
//! evaluated synchronously on every navigation and never touches the network
//! or the session file. A `Customer` reaching for a seller-only view is
//! redirected exactly like an anonymous visitor - the redirect target does
//! not reveal whether a session exists.

use stylehub_core::Role;

/// The access requirement a view declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAccess {
    /// Anyone may render the view, logged in or not.
    Public,
    /// Only logged-in customers.
    Customer,
    /// Only logged-in sellers.
    Seller,
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested view.
    Allow,
    /// Send the principal to the login view instead.
    RedirectToLogin,
}

/// Decide whether the current role may render a view.
///
/// Allows iff the view is [`ViewAccess::Public`] or its requirement matches
/// the current role exactly.
#[must_use]
pub const fn evaluate(current: Role, required: ViewAccess) -> RouteDecision {
    match (required, current) {
        (ViewAccess::Public, _)
        | (ViewAccess::Customer, Role::Customer)
        | (ViewAccess::Seller, Role::Seller) => RouteDecision::Allow,
        _ => RouteDecision::RedirectToLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: [Role; 3] = [Role::Anonymous, Role::Customer, Role::Seller];

    #[test]
    fn test_public_views_always_allow() {
        for role in ROLES {
            assert_eq!(evaluate(role, ViewAccess::Public), RouteDecision::Allow);
        }
    }

    #[test]
    fn test_exact_role_match_allows() {
        assert_eq!(
            evaluate(Role::Customer, ViewAccess::Customer),
            RouteDecision::Allow
        );
        assert_eq!(
            evaluate(Role::Seller, ViewAccess::Seller),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_full_matrix() {
        for current in ROLES {
            for required in [ViewAccess::Public, ViewAccess::Customer, ViewAccess::Seller] {
                let expected = match required {
                    ViewAccess::Public => RouteDecision::Allow,
                    ViewAccess::Customer if current == Role::Customer => RouteDecision::Allow,
                    ViewAccess::Seller if current == Role::Seller => RouteDecision::Allow,
                    _ => RouteDecision::RedirectToLogin,
                };
                assert_eq!(evaluate(current, required), expected, "{current:?}/{required:?}");
            }
        }
    }

    #[test]
    fn test_wrong_role_redirects_like_anonymous() {
        // The guard must not distinguish "wrong role" from "no role".
        assert_eq!(
            evaluate(Role::Seller, ViewAccess::Customer),
            evaluate(Role::Anonymous, ViewAccess::Customer)
        );
        assert_eq!(
            evaluate(Role::Customer, ViewAccess::Seller),
            evaluate(Role::Anonymous, ViewAccess::Seller)
        );
    }
}
