//! Navigator with history.

use std::collections::BTreeMap;

use super::guard::{GuardDecision, guard};
use super::route::{RouteMatch, RouteName, RouteTable, View};
use crate::error::{FileDeckError, Result};
use crate::session::AuthState;

/// Where a navigation ended up, after the guard ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub name: Option<RouteName>,
    pub view: View,
    pub params: BTreeMap<String, String>,
    pub query: Option<String>,
    /// Path originally requested when the guard redirected
    pub redirected_from: Option<String>,
}

impl Location {
    fn from_match(matched: RouteMatch<'_>, redirected_from: Option<String>) -> Self {
        Self {
            path: matched.path,
            name: matched.record.name,
            view: matched.record.view,
            params: matched.params,
            query: matched.query,
            redirected_from,
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

/// Resolves paths against a [`RouteTable`], applies the guard and keeps a
/// navigation history.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    history: Vec<Location>,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            history: Vec::new(),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolves `path` and runs the guard without touching history.
    pub fn resolve(&self, path: &str, auth: &(impl AuthState + ?Sized)) -> Result<Location> {
        let matched = self
            .table
            .resolve(path)
            .ok_or_else(|| FileDeckError::not_found("route", path))?;

        match guard(&matched, auth) {
            GuardDecision::Proceed => Ok(Location::from_match(matched, None)),
            GuardDecision::Redirect(name) => {
                tracing::debug!("[Router] '{}' requires a session, redirecting to {}", path, name);
                let redirected_from = Some(matched.path);
                let target = self.resolve_named(name)?;
                Ok(Location::from_match(target, redirected_from))
            }
        }
    }

    /// Navigates to `path`, recording the guarded result in history.
    pub fn push(&mut self, path: &str, auth: &(impl AuthState + ?Sized)) -> Result<&Location> {
        let location = self.resolve(path, auth)?;
        self.history.push(location);
        Ok(&self.history[self.history.len() - 1])
    }

    /// Leaves the current location and re-enters the previous one.
    ///
    /// The guard runs again, so going back to a protected page after a
    /// logout lands on the login view. Returns `None` at the start of
    /// history.
    pub fn back(&mut self, auth: &(impl AuthState + ?Sized)) -> Result<Option<&Location>> {
        if self.history.len() < 2 {
            return Ok(None);
        }
        self.history.pop();

        let previous = self
            .history
            .pop()
            .map(|location| location.redirected_from.unwrap_or(location.path));
        match previous {
            Some(path) => self.push(&path, auth).map(Some),
            None => Ok(None),
        }
    }

    pub fn current(&self) -> Option<&Location> {
        self.history.last()
    }

    pub fn history(&self) -> &[Location] {
        &self.history
    }

    fn resolve_named(&self, name: RouteName) -> Result<RouteMatch<'_>> {
        let record = self
            .table
            .by_name(name)
            .ok_or_else(|| FileDeckError::config(format!("no route named '{}'", name)))?;
        self.table
            .resolve(&record.pattern)
            .filter(|matched| matched.record.name == Some(name))
            .ok_or_else(|| {
                FileDeckError::config(format!("route '{}' cannot be navigated by name", name))
            })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouteTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouteRecord;

    #[test]
    fn test_protected_route_without_session_redirects_to_login() {
        let mut router = Router::default();
        let location = router.push("/files", &false).unwrap();

        assert_eq!(location.name, Some(RouteName::Login));
        assert_eq!(location.view, View::Login);
        assert_eq!(location.path, "/login");
        assert_eq!(location.redirected_from.as_deref(), Some("/files"));
    }

    #[test]
    fn test_protected_route_with_session_proceeds() {
        let mut router = Router::default();
        let location = router.push("/preview/f1", &true).unwrap();

        assert_eq!(location.view, View::FilePreview);
        assert_eq!(location.param("fileId"), Some("f1"));
        assert!(!location.was_redirected());
    }

    #[test]
    fn test_catch_all_renders_login_without_redirect() {
        let router = Router::default();
        let location = router.resolve("/whatever", &false).unwrap();

        assert_eq!(location.view, View::Login);
        assert_eq!(location.name, None);
        assert_eq!(location.path, "/whatever");
        assert!(!location.was_redirected());
    }

    #[test]
    fn test_history_and_back() {
        let mut router = Router::default();
        router.push("/", &true).unwrap();
        router.push("/files", &true).unwrap();
        assert_eq!(router.history().len(), 2);

        let back = router.back(&true).unwrap().unwrap();
        assert_eq!(back.view, View::Home);
        assert_eq!(router.history().len(), 1);

        assert!(router.back(&true).unwrap().is_none());
    }

    #[test]
    fn test_back_reruns_guard() {
        let mut router = Router::default();
        router.push("/files", &true).unwrap();
        router.push("/login", &true).unwrap();

        // Session ended in between
        let back = router.back(&false).unwrap().unwrap();
        assert_eq!(back.view, View::Login);
        assert_eq!(back.redirected_from.as_deref(), Some("/files"));
    }

    #[test]
    fn test_missing_login_route_is_a_config_error() {
        let table = RouteTable::new(vec![
            RouteRecord::new("/secret", View::Home)
                .unwrap()
                .requires_auth(),
        ]);
        let router = Router::new(table);
        assert!(router.resolve("/secret", &false).is_err());
    }

    #[test]
    fn test_unmatched_without_catch_all_is_not_found() {
        let router = Router::new(RouteTable::new(Vec::new()));
        let err = router.resolve("/x", &true).unwrap_err();
        assert!(err.is_not_found());
    }
}
