//! Navigation between views, gated by the Route Guard.

use taskflow_core::{GuardDecision, Route, RouteGuard};
use taskflow_core::domain::Session;
use tokio::sync::watch;

/// Where a navigation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Rendered(Route),
    /// The guard sent us elsewhere. With `replace`, the guarded route is
    /// not kept for a later "back".
    Redirected { from: Route, to: Route, replace: bool },
    /// Session still loading.
    Pending,
}

pub struct Router {
    guard: RouteGuard,
    history: Vec<Route>,
}

impl Router {
    pub fn new(session: watch::Receiver<Session>) -> Self {
        Self {
            guard: RouteGuard::new(session),
            history: Vec::new(),
        }
    }

    pub async fn navigate(&mut self, route: Route) -> Navigation {
        if self.guard.decide(route) == GuardDecision::Wait {
            tracing::debug!(%route, "Waiting for session");
        }

        match self.guard.resolve(route).await {
            GuardDecision::Render => {
                self.history.push(route);
                Navigation::Rendered(route)
            }
            GuardDecision::Redirect { to, replace } => {
                tracing::debug!(from = %route, %to, replace, "Redirecting");
                if !replace {
                    self.history.push(route);
                }
                self.history.push(to);
                Navigation::Redirected {
                    from: route,
                    to,
                    replace,
                }
            }
            GuardDecision::Wait => Navigation::Pending,
        }
    }

    /// Wait for the session to change and report a forced redirect away
    /// from `route`, if any.
    pub async fn watch(&mut self, route: Route) -> Option<Route> {
        loop {
            match self.guard.changed(route).await? {
                GuardDecision::Redirect { to, .. } => {
                    self.history.push(to);
                    return Some(to);
                }
                GuardDecision::Render | GuardDecision::Wait => continue,
            }
        }
    }

    #[cfg(test)]
    pub fn history(&self) -> &[Route] {
        &self.history
    }
}
