use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    /// The protected prediction surface.
    Home,
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(Route),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Self::Home,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            _ => Self::Unknown(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Home => "/",
            Self::Unknown(path) => path,
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Home)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Navigation {
    /// Where the navigation ends up.
    pub fn destination(&self) -> &Route {
        match self {
            Self::Allow(route) | Self::Redirect(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}
