//! # session-shell
//!
//! Core of a phone-login mobile client: a persisted session context and the
//! router that gates screens on it. Screens themselves are external; they
//! hold a [`session::SessionStore`] handle and call `set_token`, `set_user`,
//! or `logout`, and the [`router::SessionRouter`] follows along.

pub mod command;
pub mod config;
pub mod router;
pub mod session;
pub mod storage;
