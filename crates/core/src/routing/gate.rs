//! The route gate.
//!
//! A single state machine replaces the pair of "auth state" and "still
//! loading" flags. The valid states are:
//! - Resolving (first identity resolution pending; nothing renders)
//! - Redirecting (a redirect was issued; nothing renders until it lands)
//! - Authenticated / Unauthenticated (the requested view may render)

use std::fmt;

use crate::session::AuthState;

use super::navigator::Navigator;
use super::table::{RouteClass, RouteTable};

const ROOT_PATH: &str = "/";

/// What the gate wants done with a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Auth is unresolved; show a loading indicator and decide nothing.
    Wait,
    /// Replace the current view with this path.
    Redirect(String),
    /// The view may render.
    Render,
}

/// Pure gate decision for one path and auth state.
#[must_use]
pub fn decide(table: &RouteTable, path: &str, auth: AuthState) -> GateDecision {
    if !auth.is_resolved() {
        return GateDecision::Wait;
    }

    let authenticated = auth.is_authenticated();
    match table.classify(path) {
        RouteClass::Protected if !authenticated => {
            GateDecision::Redirect(table.login_path().to_string())
        }
        RouteClass::AuthOnly if authenticated => {
            GateDecision::Redirect(table.landing_path().to_string())
        }
        RouteClass::Neutral if authenticated && path == ROOT_PATH => {
            GateDecision::Redirect(table.landing_path().to_string())
        }
        _ => GateDecision::Render,
    }
}

/// State of the route gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Waiting for the first identity resolution.
    Resolving,
    /// Rendering for an authenticated session.
    Authenticated,
    /// Rendering for an anonymous visitor.
    Unauthenticated,
    /// A redirect is underway.
    Redirecting {
        /// Redirect target.
        to: String,
    },
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolving => f.write_str("resolving"),
            Self::Authenticated => f.write_str("authenticated"),
            Self::Unauthenticated => f.write_str("unauthenticated"),
            Self::Redirecting { to } => write!(f, "redirecting to {to}"),
        }
    }
}

/// Guard run on every render and navigation.
#[derive(Debug, Clone)]
pub struct RouteGate {
    table: RouteTable,
    state: GateState,
}

impl RouteGate {
    /// Creates a gate in the `Resolving` state.
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            state: GateState::Resolving,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Returns true only when the last checked view may render.
    #[must_use]
    pub fn can_render(&self) -> bool {
        matches!(
            self.state,
            GateState::Authenticated | GateState::Unauthenticated
        )
    }

    /// Route table in use.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Checks `path` against `auth`, asking `navigator` to redirect if needed.
    ///
    /// A redirect already underway to the same target is not issued twice.
    pub fn check(&mut self, path: &str, auth: AuthState, navigator: &dyn Navigator) -> &GateState {
        self.state = match decide(&self.table, path, auth) {
            GateDecision::Wait => GateState::Resolving,
            GateDecision::Redirect(to) => {
                let already_underway =
                    matches!(&self.state, GateState::Redirecting { to: current } if *current == to);
                if !already_underway {
                    navigator.replace(&to);
                }
                GateState::Redirecting { to }
            }
            GateDecision::Render if auth.is_authenticated() => GateState::Authenticated,
            GateDecision::Render => GateState::Unauthenticated,
        };
        &self.state
    }
}
