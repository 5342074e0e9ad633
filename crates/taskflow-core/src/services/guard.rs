//! Route Guard - decides whether a view may render for the current session.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tokio::sync::watch;

use crate::domain::Session;

/// User-facing routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    /// Task dashboard, protected.
    Dashboard,
}

impl Route {
    pub const fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
        }
    }

    pub const fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No route matches '{0}'")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/login" => Ok(Route::Login),
            "/register" => Ok(Route::Register),
            "/" | "" => Ok(Route::Dashboard),
            other => Err(UnknownRoute(other.to_string())),
        }
    }
}

/// Outcome of guarding a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still hydrating; show a neutral waiting state.
    Wait,
    /// Navigate away. `replace` means the guarded entry is dropped from history.
    Redirect { to: Route, replace: bool },
    Render,
}

/// Pure guard rule for a protected route.
pub fn evaluate(session: &Session) -> GuardDecision {
    if session.loading {
        GuardDecision::Wait
    } else if !session.is_authenticated() {
        GuardDecision::Redirect {
            to: Route::Login,
            replace: true,
        }
    } else {
        GuardDecision::Render
    }
}

/// Reactive guard over the Session Store's change feed.
pub struct RouteGuard {
    session: watch::Receiver<Session>,
}

impl RouteGuard {
    pub fn new(session: watch::Receiver<Session>) -> Self {
        Self { session }
    }

    /// Decision for `route` against the current session, without waiting.
    pub fn decide(&self, route: Route) -> GuardDecision {
        if !route.is_protected() {
            return GuardDecision::Render;
        }
        evaluate(&self.session.borrow())
    }

    /// Wait out hydration, then decide. Never returns `Wait`.
    pub async fn resolve(&mut self, route: Route) -> GuardDecision {
        if !route.is_protected() {
            return GuardDecision::Render;
        }
        if let Err(e) = self.session.wait_for(|s| !s.loading).await {
            tracing::warn!(error = %e, "Session store dropped while hydrating");
            return GuardDecision::Redirect {
                to: Route::Login,
                replace: true,
            };
        }
        evaluate(&self.session.borrow_and_update())
    }

    /// Wait for the next session change and re-evaluate `route`.
    /// Returns `None` once the Session Store is gone.
    pub async fn changed(&mut self, route: Route) -> Option<GuardDecision> {
        self.session.changed().await.ok()?;
        let session = self.session.borrow_and_update();
        if !route.is_protected() {
            return Some(GuardDecision::Render);
        }
        Some(evaluate(&session))
    }
}
