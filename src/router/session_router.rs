//! Navigator bound to a live session.
//!
//! Every accessor first folds in the latest session value, so the active
//! route never lags a `set_token` / `logout` even if nobody awaited
//! [`SessionRouter::changed`].

#[cfg(test)]
#[path = "session_router_test.rs"]
mod tests;

use tokio::sync::watch;

use super::{NavError, Navigator, Route, Screen};
use crate::session::{Session, SessionStore};

/// Screen stack that follows a [`SessionStore`] through its `watch` channel.
///
/// Accessors take `&mut self` because each one first applies the latest
/// session value to the underlying [`Navigator`].
pub struct SessionRouter {
    rx: watch::Receiver<Session>,
    nav: Navigator,
}

impl SessionRouter {
    /// Router over `rx`, synced to the value it currently holds.
    #[must_use]
    pub fn new(mut rx: watch::Receiver<Session>) -> Self {
        let nav = Navigator::for_session(&rx.borrow_and_update());
        Self { rx, nav }
    }

    /// Router observing `store`.
    #[must_use]
    pub fn attach(store: &SessionStore) -> Self {
        Self::new(store.subscribe())
    }

    /// Apply the latest session. Returns true when the route changed.
    ///
    /// Syncs unconditionally: the last value is still readable after every
    /// store handle is dropped, and `sync` is a no-op when the route holds.
    pub fn refresh(&mut self) -> bool {
        self.nav.sync(&self.rx.borrow_and_update())
    }

    /// Wait for the next session change and return the resulting route.
    /// Returns `None` once every store handle has been dropped.
    pub async fn changed(&mut self) -> Option<Route> {
        if self.rx.changed().await.is_err() {
            self.refresh();
            return None;
        }
        self.nav.sync(&self.rx.borrow_and_update());
        Some(self.nav.route())
    }

    /// Active route for the latest session.
    pub fn route(&mut self) -> Route {
        self.refresh();
        self.nav.route()
    }

    /// Screen on top of the stack; `None` while loading.
    pub fn current(&mut self) -> Option<Screen> {
        self.refresh();
        self.nav.current()
    }

    /// Screens of the active route, root first.
    pub fn stack(&mut self) -> &[Screen] {
        self.refresh();
        self.nav.stack()
    }

    /// Show `screen`, popping back to it if it is already on the stack.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::ScreenUnavailable`] if `screen` is not part of the
    /// active route.
    pub fn navigate(&mut self, screen: Screen) -> Result<(), NavError> {
        self.refresh();
        self.nav.navigate(screen)
    }

    /// Pop the top screen. Returns false at the root.
    pub fn go_back(&mut self) -> bool {
        self.refresh();
        self.nav.go_back()
    }
}
