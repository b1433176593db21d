//! Authentication guard evaluated before every navigation.

use super::route::{RouteMatch, RouteName};
use crate::session::AuthState;

/// Outcome of the guard for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(RouteName),
}

/// Redirects to the login route when `target` requires authentication and
/// there is no session. Synchronous; only in-memory state is consulted.
pub fn guard(target: &RouteMatch<'_>, auth: &(impl AuthState + ?Sized)) -> GuardDecision {
    if target.record.requires_auth && !auth.is_authenticated() {
        GuardDecision::Redirect(RouteName::Login)
    } else {
        GuardDecision::Proceed
    }
}
