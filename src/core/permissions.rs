//! Route-permission resolution and the navigation gate.
//!
//! Permissions are route-prefix strings. A caller may navigate to a path
//! when the path starts with any prefix in their permission set. The set is
//! resolved once at login and carried in the session token, so navigation
//! checks never hit the database; the trade-off is staleness until the
//! session expires when a group's permissions change mid-session.

use crate::{
    core::{auth::SessionUser, group},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Every gated route prefix in the application.
pub const AVAILABLE_PERMISSIONS: &[&str] = &[
    "/dashboard",
    "/products",
    "/stock-movements",
    "/transfers",
    "/shopping-list",
    "/employees",
    "/departments",
    "/groups",
    "/reports",
];

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &["/login"];

/// Role that implies the full permission set.
pub const MANAGER_ROLE: &str = "Manager";

/// Default landing page for authenticated callers.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Login page, the target for unauthenticated callers.
pub const LOGIN_ROUTE: &str = "/login";

/// Outcome of gating one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The caller may load the requested path
    Allow,
    /// No usable session; send the caller to the login page
    RedirectToLogin,
    /// Authenticated but not permitted (or on a public/root path);
    /// send the caller to the dashboard
    RedirectToDashboard,
}

/// Resolves the permission set for a role/group pair.
///
/// Managers get every route prefix. Anyone else gets their group's stored
/// list, or an empty set without a group (or when the group has been
/// deleted since).
///
/// # Errors
/// Returns an error if the group lookup fails.
pub async fn resolve_permissions(
    db: &DatabaseConnection,
    role: &str,
    group_id: Option<i64>,
) -> Result<Vec<String>> {
    if role == MANAGER_ROLE {
        return Ok(AVAILABLE_PERMISSIONS
            .iter()
            .map(ToString::to_string)
            .collect());
    }

    match group_id {
        Some(group_id) => Ok(group::get_group_by_id(db, group_id)
            .await?
            .map(|g| g.permissions.0)
            .unwrap_or_default()),
        None => Ok(Vec::new()),
    }
}

/// Gates one navigation request. State-free: the decision depends only on
/// the (already decoded) session and the requested path. An expired or
/// invalid token must be passed as `None` - it is indistinguishable from
/// "no session".
#[must_use]
pub fn authorize(user: Option<&SessionUser>, path: &str) -> Access {
    let is_public = PUBLIC_ROUTES.contains(&path);

    let Some(user) = user else {
        return if is_public {
            Access::Allow
        } else {
            Access::RedirectToLogin
        };
    };

    // Authenticated callers on the login page or the bare root both land
    // on the dashboard.
    if is_public || path == "/" {
        return Access::RedirectToDashboard;
    }

    if user
        .permissions
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()))
    {
        Access::Allow
    } else {
        Access::RedirectToDashboard
    }
}
