//! Declared access requirements per route.

use std::collections::{HashMap, HashSet};

use market_entity::user::UserRole;

/// What a route requires of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anonymous callers allowed.
    Public,
    /// Any verified identity.
    Authenticated,
    /// A verified identity whose role is in the set.
    Roles(HashSet<UserRole>),
}

impl RouteAccess {
    /// Shorthand for [`RouteAccess::Roles`].
    pub fn roles(roles: impl IntoIterator<Item = UserRole>) -> Self {
        Self::Roles(roles.into_iter().collect())
    }
}

/// Fallback for routes nobody declared.
pub(crate) static UNDECLARED: RouteAccess = RouteAccess::Authenticated;

/// Lookup table from `(method, path template)` to [`RouteAccess`].
///
/// Path templates are the strings the router was built with, e.g.
/// `/api/products/{id}`. Methods are compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<(String, String), RouteAccess>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the access requirement of one route. A later declaration for
    /// the same route replaces the earlier one.
    pub fn declare(&mut self, method: &str, path: &str, access: RouteAccess) {
        self.routes
            .insert((method.to_ascii_uppercase(), path.to_string()), access);
    }

    /// Builder form of [`RouteTable::declare`].
    pub fn with(mut self, method: &str, path: &str, access: RouteAccess) -> Self {
        self.declare(method, path, access);
        self
    }

    /// The declared requirement, or `Authenticated` when the route is unknown.
    ///
    /// The router answers `HEAD` with the `GET` handler, so an undeclared
    /// `HEAD` inherits the `GET` declaration of the same path.
    pub fn access_for(&self, method: &str, path: &str) -> &RouteAccess {
        let method = method.to_ascii_uppercase();
        let declared = self.routes.get(&(method.clone(), path.to_string()));
        let declared = match declared {
            None if method == "HEAD" => {
                self.routes.get(&("GET".to_string(), path.to_string()))
            }
            other => other,
        };
        declared.unwrap_or(&UNDECLARED)
    }

    /// Number of declared routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
