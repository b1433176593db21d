//! Routing and the authentication guard.
//!
//! # Module Structure
//!
//! - `route`: route records, path patterns and matching
//! - `guard`: the pre-navigation authentication check
//! - `navigator`: the router holding navigation history

mod guard;
mod route;
mod navigator;

pub use guard::{GuardDecision, guard};
pub use route::{RouteMatch, RouteName, RouteRecord, RouteTable, View};
pub use navigator::{Location, Router};
