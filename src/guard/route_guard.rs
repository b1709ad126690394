use super::types::{AuthState, Navigation, Route};
use crate::session::SessionStore;
use tracing::debug;

/// Gates the protected surface on the presence of a session token.
///
/// Login and signup stay reachable while signed in; there is no forced
/// redirect away from them.
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn state(&self) -> AuthState {
        if self.session.get().is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn navigate(&self, route: Route) -> Navigation {
        let state = self.state();

        let navigation = match (&route, state) {
            (Route::Unknown(_), AuthState::Authenticated) => Navigation::Redirect(Route::Home),
            (Route::Unknown(_), AuthState::Unauthenticated) => Navigation::Redirect(Route::Login),
            (route, AuthState::Unauthenticated) if route.is_protected() => {
                Navigation::Redirect(Route::Login)
            }
            _ => Navigation::Allow(route.clone()),
        };

        debug!(
            "Navigation to {} in state {:?}: {:?}",
            route, state, navigation
        );
        navigation
    }

    pub fn navigate_path(&self, path: &str) -> Navigation {
        self.navigate(Route::parse(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStorage, User};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    async fn guard(signed_in: bool) -> RouteGuard {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        if signed_in {
            store
                .set("abc123", Some(&User::new("testuser")))
                .await
                .unwrap();
        }
        RouteGuard::new(store)
    }

    #[tokio::test]
    async fn test_state_follows_token() {
        assert_eq!(guard(false).await.state(), AuthState::Unauthenticated);
        assert_eq!(guard(true).await.state(), AuthState::Authenticated);
    }

    #[tokio::test]
    async fn test_home_requires_session() {
        assert_eq!(
            guard(false).await.navigate(Route::Home),
            Navigation::Redirect(Route::Login)
        );
        assert_eq!(guard(true).await.navigate(Route::Home), Navigation::Allow(Route::Home));
    }

    #[tokio::test]
    async fn test_login_and_signup_unrestricted() {
        for signed_in in [false, true] {
            let guard = guard(signed_in).await;
            assert_eq!(guard.navigate(Route::Login), Navigation::Allow(Route::Login));
            assert_eq!(guard.navigate(Route::Signup), Navigation::Allow(Route::Signup));
        }
    }

    #[tokio::test]
    async fn test_unknown_paths_fall_through_to_home() {
        assert_eq!(
            guard(true).await.navigate_path("/settings"),
            Navigation::Redirect(Route::Home)
        );
        assert_eq!(
            guard(false).await.navigate_path("/settings"),
            Navigation::Redirect(Route::Login)
        );
    }

    #[tokio::test]
    async fn test_guard_sees_session_changes() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let guard = RouteGuard::new(store.clone());
        assert!(guard.navigate(Route::Home).is_redirect());

        store.set("abc123", None).await.unwrap();
        assert_eq!(guard.navigate(Route::Home).destination(), &Route::Home);

        store.clear().await;
        assert_eq!(guard.state(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/signup/"), Route::Signup);
        assert_eq!(Route::parse("/nope"), Route::Unknown("/nope".to_string()));
        assert!(Route::Home.is_protected());
        assert!(!Route::Login.is_protected());
    }
}
