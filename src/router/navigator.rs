//! Screen stack scoped to the active route.
//!
//! DESIGN
//! ======
//! The stack only ever holds screens of the current route. When the route
//! changes, the stack is replaced by the new route's initial screen, so no
//! signed-in screen survives a logout and vice versa.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod tests;

use tracing::debug;

use super::{Route, Screen, route_for};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// The screen belongs to a route other than the active one.
    #[error("screen {screen} is not available while {route}")]
    ScreenUnavailable { screen: Screen, route: Route },
}

#[derive(Debug, Clone)]
pub struct Navigator {
    route: Route,
    stack: Vec<Screen>,
}

impl Navigator {
    /// Navigator in the loading route with an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self { route: Route::Loading, stack: Vec::new() }
    }

    /// Navigator already synced to `session`.
    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        let mut nav = Self::new();
        nav.sync(session);
        nav
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    /// Top of the stack; `None` while loading.
    #[must_use]
    pub fn current(&self) -> Option<Screen> {
        self.stack.last().copied()
    }

    #[must_use]
    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    /// Recompute the route from `session`. Returns true when the route changed,
    /// in which case the stack was reset to the new route's initial screen.
    pub fn sync(&mut self, session: &Session) -> bool {
        let route = route_for(session);
        if route == self.route {
            return false;
        }
        debug!(from = %self.route, to = %route, "route changed");
        self.route = route;
        self.stack = route.initial_screen().into_iter().collect();
        true
    }

    /// Show `screen`. Pops back to it if it is already on the stack,
    /// otherwise pushes it.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::ScreenUnavailable`] if `screen` is not part of the
    /// active route.
    pub fn navigate(&mut self, screen: Screen) -> Result<(), NavError> {
        if !self.route.contains(screen) {
            return Err(NavError::ScreenUnavailable { screen, route: self.route });
        }
        match self.stack.iter().position(|s| *s == screen) {
            Some(idx) => self.stack.truncate(idx + 1),
            None => self.stack.push(screen),
        }
        Ok(())
    }

    /// Pop the top screen. Returns false at the root.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
