//! Session-gated routing.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shell renders exactly one of three routes, derived purely from the
//! current `Session`: a loading placeholder, the sign-in flow, or the
//! signed-in flow. Each route owns a fixed set of screens; the navigator
//! keeps a screen stack scoped to the active route.

pub mod navigator;
pub mod session_router;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub use navigator::{NavError, Navigator};
pub use session_router::SessionRouter;

use crate::session::Session;

// =============================================================================
// ROUTE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Initial restore still running. No screens, no interaction.
    Loading,
    /// No usable token: phone entry and passcode verification.
    Unauthenticated,
    /// Token present: feed and review form.
    Authenticated,
}

impl Route {
    /// Screens reachable while this route is active.
    #[must_use]
    pub fn screens(self) -> &'static [Screen] {
        match self {
            Self::Loading => &[],
            Self::Unauthenticated => &[Screen::Auth, Screen::Otp],
            Self::Authenticated => &[Screen::Feed, Screen::ReviewForm],
        }
    }

    /// Screen shown when the route is entered.
    #[must_use]
    pub fn initial_screen(self) -> Option<Screen> {
        self.screens().first().copied()
    }

    #[must_use]
    pub fn contains(self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route for `session`. Loading wins; otherwise gate on a non-empty token.
#[must_use]
pub fn route_for(session: &Session) -> Route {
    if session.is_loading {
        Route::Loading
    } else if session.is_authenticated() {
        Route::Authenticated
    } else {
        Route::Unauthenticated
    }
}

// =============================================================================
// SCREEN
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Phone number entry.
    Auth,
    /// One-time passcode verification.
    Otp,
    Feed,
    ReviewForm,
}

/// Presentation options for a screen's navigation chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub header_shown: bool,
    pub title: Option<&'static str>,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Auth, Screen::Otp, Screen::Feed, Screen::ReviewForm];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Auth => "Auth",
            Self::Otp => "OTP",
            Self::Feed => "Feed",
            Self::ReviewForm => "ReviewForm",
        }
    }

    #[must_use]
    pub fn options(self) -> ScreenOptions {
        match self {
            Self::ReviewForm => ScreenOptions { header_shown: true, title: Some("Write a Review") },
            Self::Auth | Self::Otp | Self::Feed => ScreenOptions { header_shown: false, title: None },
        }
    }

    /// Look up a screen by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
