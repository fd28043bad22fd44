//! Client-side route table.
//!
//! Plain data: which path shows which view, and the transition to play
//! when navigating to it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Register,
    GameLobby,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Home => "HomeView",
            View::Login => "LoginView",
            View::Register => "RegisterView",
            View::GameLobby => "GameLobbyView",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    SlideLeft,
    SlideRight,
}

impl Transition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::SlideLeft => "slide-left",
            Transition::SlideRight => "slide-right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub transition: Option<Transition>,
}

static ROUTES: [Route; 4] = [
    Route {
        path: "/login",
        name: "login",
        view: View::Login,
        transition: Some(Transition::SlideLeft),
    },
    Route {
        path: "/",
        name: "Home",
        view: View::Home,
        transition: None,
    },
    Route {
        path: "/register",
        name: "register",
        view: View::Register,
        transition: Some(Transition::SlideRight),
    },
    Route {
        path: "/lobby",
        name: "lobby",
        view: View::GameLobby,
        transition: None,
    },
];

/// All routes in declaration order.
pub fn routes() -> &'static [Route] {
    &ROUTES
}

/// Exact-match lookup. A trailing slash is ignored except on the root.
pub fn resolve(path: &str) -> Option<&'static Route> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    ROUTES.iter().find(|route| route.path == normalized)
}

pub fn by_name(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|route| route.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(resolve("/").map(|r| r.view), Some(View::Home));
        assert_eq!(resolve("/login").map(|r| r.view), Some(View::Login));
        assert_eq!(resolve("/lobby/").map(|r| r.view), Some(View::GameLobby));
        assert_eq!(resolve("").map(|r| r.name), Some("Home"));
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        assert!(resolve("/admin").is_none());
        assert!(resolve("/login/extra").is_none());
        assert!(resolve("/LOGIN").is_none());
    }

    #[test]
    fn transitions() {
        assert_eq!(
            by_name("login").and_then(|r| r.transition),
            Some(Transition::SlideLeft)
        );
        assert_eq!(
            by_name("register").and_then(|r| r.transition).map(|t| t.as_str()),
            Some("slide-right")
        );
        assert_eq!(by_name("lobby").and_then(|r| r.transition), None);
    }

    #[test]
    fn names_are_unique() {
        for route in routes() {
            assert_eq!(by_name(route.name), Some(route));
            assert_eq!(resolve(route.path), Some(route));
        }
    }
}
