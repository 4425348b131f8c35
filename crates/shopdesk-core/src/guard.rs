// ── Route guard ──
//
// Role-based access decisions for the application's routes. Pure
// functions of the current identity; views call them before rendering.

use std::fmt;

use strum::{EnumIter, IntoEnumIterator};

use crate::model::{Identity, Role};

/// Every route the client knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Route {
    Login,
    AdminDashboard,
    AdminShops,
    AdminAdmins,
    AdminCreateAdmin,
    AdminCreateShop,
    ShopDashboard,
    ShopEmployees,
    ShopRotas,
    ShopPunchings,
    ShopSalary,
    ShopPayouts,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminShops => "/admin/shops",
            Self::AdminAdmins => "/admin/admins",
            Self::AdminCreateAdmin => "/admin/create",
            Self::AdminCreateShop => "/admin/create/shop",
            Self::ShopDashboard => "/shop/dashboard",
            Self::ShopEmployees => "/shop/employees",
            Self::ShopRotas => "/shop/create/rota",
            Self::ShopPunchings => "/shop/punchings",
            Self::ShopSalary => "/shop/salary",
            Self::ShopPayouts => "/shop/payout",
        }
    }

    /// Look up a route by path. A single trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        Self::iter().find(|route| route.path() == path)
    }

    /// Role a route demands; `None` for the public login route.
    pub fn required_role(self) -> Option<Role> {
        match self {
            Self::Login => None,
            Self::AdminDashboard
            | Self::AdminShops
            | Self::AdminAdmins
            | Self::AdminCreateAdmin
            | Self::AdminCreateShop => Some(Role::Admin),
            Self::ShopDashboard
            | Self::ShopEmployees
            | Self::ShopRotas
            | Self::ShopPunchings
            | Self::ShopSalary
            | Self::ShopPayouts => Some(Role::ShopAdmin),
        }
    }

    /// Landing route for a role, if it has one.
    pub fn home_for(role: &Role) -> Option<Self> {
        match role {
            Role::Admin => Some(Self::AdminDashboard),
            Role::ShopAdmin => Some(Self::ShopDashboard),
            Role::Other(_) => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
}

/// Decide whether `identity` may see a route at `path` requiring
/// `required_role`.
///
/// - no identity, a different role, or an unknown role: redirect to login
/// - the login route with a known role: redirect to that role's home
pub fn check_access(
    identity: Option<&Identity>,
    required_role: Option<&Role>,
    path: &str,
) -> GuardDecision {
    if Route::from_path(path) == Some(Route::Login) {
        return match identity.and_then(|id| Route::home_for(&id.role)) {
            Some(home) => GuardDecision::Redirect(home),
            // Unknown roles stay on login; their home would bounce back here.
            None => GuardDecision::Render,
        };
    }

    let Some(required) = required_role else {
        return GuardDecision::Render;
    };
    match identity {
        Some(id) if id.role.is_known() && &id.role == required => GuardDecision::Render,
        _ => GuardDecision::Redirect(Route::Login),
    }
}

/// Guard a path against the route table. Unknown paths go to login.
pub fn resolve(identity: Option<&Identity>, path: &str) -> GuardDecision {
    match Route::from_path(path) {
        Some(route) => check_access(identity, route.required_role().as_ref(), path),
        None => GuardDecision::Redirect(Route::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn who(role: &str) -> Identity {
        Identity {
            token: SecretString::from("t".to_owned()),
            role: Role::from(role),
            name: None,
            email: None,
        }
    }

    #[test]
    fn anonymous_visitors_go_to_login() {
        assert_eq!(
            check_access(None, Some(&Role::Admin), "/admin/shops"),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(check_access(None, None, "/login"), GuardDecision::Render);
    }

    #[test]
    fn matching_role_renders() {
        let admin = who("Admin");
        assert_eq!(
            resolve(Some(&admin), "/admin/dashboard"),
            GuardDecision::Render
        );
        let shop = who("ShopAdmin");
        assert_eq!(resolve(Some(&shop), "/shop/payout/"), GuardDecision::Render);
    }

    #[test]
    fn wrong_role_redirects_to_login() {
        let shop = who("ShopAdmin");
        assert_eq!(
            resolve(Some(&shop), "/admin/create/shop"),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn login_sends_known_roles_home() {
        assert_eq!(
            resolve(Some(&who("Admin")), "/login"),
            GuardDecision::Redirect(Route::AdminDashboard)
        );
        assert_eq!(
            resolve(Some(&who("ShopAdmin")), "/login"),
            GuardDecision::Redirect(Route::ShopDashboard)
        );
        assert_eq!(resolve(Some(&who("Auditor")), "/login"), GuardDecision::Render);
    }

    #[test]
    fn unknown_role_never_renders_protected_routes() {
        let other = who("Auditor");
        assert_eq!(
            check_access(Some(&other), Some(&Role::Other("Auditor".into())), "/x"),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn unknown_paths_redirect_to_login() {
        assert_eq!(
            resolve(Some(&who("Admin")), "/nowhere"),
            GuardDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn every_route_round_trips_its_path() {
        for route in Route::iter() {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
    }
}
