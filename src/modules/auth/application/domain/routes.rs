/// Fixed route classification used by the request gate.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    pub public_routes: &'static [&'static str],
    pub public_prefixes: &'static [&'static str],
    pub auth_routes: &'static [&'static str],
    pub api_auth_prefix: &'static str,
    pub default_login_redirect: String,
    pub login_route: &'static str,
}

pub const PUBLIC_ROUTES: &[&str] = &["/", "/auth/email-verification", "/health", "/ready"];
pub const PUBLIC_PREFIXES: &[&str] = &["/swagger-ui", "/api-docs"];
pub const AUTH_ROUTES: &[&str] = &[
    "/auth/login",
    "/auth/register",
    "/auth/error",
    "/auth/reset-email",
    "/auth/new-password",
];
pub const API_AUTH_PREFIX: &str = "/api/auth";
pub const LOGIN_ROUTE: &str = "/auth/login";
pub const DEFAULT_LOGIN_REDIRECT: &str = "/dashboard";

impl Default for RouteConfig {
    fn default() -> Self {
        Self::with_redirect(DEFAULT_LOGIN_REDIRECT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    ApiAuth,
    AuthFlow,
    Public,
    Protected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(String),
}

impl RouteConfig {
    pub fn with_redirect(default_login_redirect: &str) -> Self {
        Self {
            public_routes: PUBLIC_ROUTES,
            public_prefixes: PUBLIC_PREFIXES,
            auth_routes: AUTH_ROUTES,
            api_auth_prefix: API_AUTH_PREFIX,
            default_login_redirect: default_login_redirect.to_string(),
            login_route: LOGIN_ROUTE,
        }
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if path.starts_with(self.api_auth_prefix) {
            return RouteClass::ApiAuth;
        }
        if self.auth_routes.contains(&path) {
            return RouteClass::AuthFlow;
        }
        if self.public_routes.contains(&path)
            || self.public_prefixes.iter().any(|p| path.starts_with(p))
        {
            return RouteClass::Public;
        }
        RouteClass::Protected
    }

    pub fn decide(&self, class: RouteClass, is_logged_in: bool) -> GateDecision {
        match class {
            RouteClass::ApiAuth | RouteClass::Public => GateDecision::Continue,
            RouteClass::AuthFlow if is_logged_in => {
                GateDecision::Redirect(self.default_login_redirect.clone())
            }
            RouteClass::AuthFlow => GateDecision::Continue,
            RouteClass::Protected if !is_logged_in => {
                GateDecision::Redirect(self.login_route.to_string())
            }
            RouteClass::Protected => GateDecision::Continue,
        }
    }
}
