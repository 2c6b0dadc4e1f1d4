//! Session store — shared in-memory session with durable write-through.
//!
//! DESIGN
//! ======
//! The live `Session` sits in a `watch` channel so observers always read the
//! latest value and wake on every change. Mutations apply to memory
//! synchronously; persistence runs in a detached task per mutation that
//! re-derives BOTH slots from the post-change snapshot (present → set,
//! absent → delete). There is no coalescing: overlapping write-throughs may
//! land out of call order, and the in-memory value stays authoritative.
//!
//! ERROR HANDLING
//! ==============
//! Storage failures are logged where they happen and otherwise dropped. A
//! failed write never rolls back memory; a failed read hydrates as absent.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{Session, UserProfile};
use crate::storage::{KeyValueStore, StorageError, TOKEN_KEY, USER_KEY};

/// Cloneable handle to the process-wide session. All clones share state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    storage: Arc<dyn KeyValueStore>,
    state: watch::Sender<Session>,
    initialized: AtomicBool,
    /// Runtime that write-through tasks are spawned on.
    runtime: Option<Handle>,
    /// Write-through tasks that may still be running.
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl SessionStore {
    /// Create an empty, loading session over `storage`. Call [`initialize`](Self::initialize) next.
    ///
    /// Write-throughs run on the Tokio runtime current at construction. A
    /// store built outside any runtime falls back to the caller's runtime at
    /// mutation time.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let runtime = current_runtime();
        if runtime.is_none() {
            warn!("session store created outside a Tokio runtime");
        }
        let (state, _) = watch::channel(Session::loading());
        Self {
            inner: Arc::new(Inner {
                storage,
                state,
                initialized: AtomicBool::new(false),
                runtime,
                pending: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Receiver that observes every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    // =========================================================================
    // HYDRATION
    // =========================================================================

    /// Restore token and user from storage, then clear `is_loading`.
    ///
    /// Both slots are read concurrently. A failed read or an unparseable user
    /// record leaves that field absent. Only the first call does anything.
    pub async fn initialize(&self) {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            warn!("session store already initialized; ignoring");
            return;
        }

        let storage = self.inner.storage.as_ref();
        let (token, raw_user) = tokio::join!(read_slot(storage, TOKEN_KEY), read_slot(storage, USER_KEY));

        let token = token.filter(|t| !t.is_empty());
        let user = raw_user.and_then(|raw| match serde_json::from_str::<UserProfile>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                error!(key = USER_KEY, error = %e, "stored user record is unreadable; treating as absent");
                None
            }
        });

        info!(has_token = token.is_some(), has_user = user.is_some(), "session restored");

        self.inner.state.send_modify(|session| {
            if let Some(token) = token {
                session.token = Some(token);
            }
            if let Some(user) = user {
                session.user = Some(user);
            }
            session.is_loading = false;
        });
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Replace the token. Observers see the new value immediately; the
    /// durable copy is updated in the background when the value changed.
    pub fn set_token(&self, token: Option<String>) {
        let changed = self.inner.state.send_if_modified(|session| {
            if session.token == token {
                return false;
            }
            session.token = token;
            true
        });
        if changed {
            self.schedule_write_through();
        }
    }

    /// Replace the user profile. Same contract as [`set_token`](Self::set_token).
    pub fn set_user(&self, user: Option<UserProfile>) {
        let changed = self.inner.state.send_if_modified(|session| {
            if session.user == user {
                return false;
            }
            session.user = user;
            true
        });
        if changed {
            self.schedule_write_through();
        }
    }

    /// Delete both durable slots, then clear token and user in memory.
    ///
    /// Memory is cleared even when the deletions fail.
    pub async fn logout(&self) {
        let storage = self.inner.storage.as_ref();
        let (token_res, user_res) = tokio::join!(storage.delete(TOKEN_KEY), storage.delete(USER_KEY));
        log_failure("logout", TOKEN_KEY, token_res);
        log_failure("logout", USER_KEY, user_res);

        let changed = self.inner.state.send_if_modified(|session| {
            let had_state = session.token.is_some() || session.user.is_some();
            session.token = None;
            session.user = None;
            had_state
        });
        if changed {
            self.schedule_write_through();
        }
        info!("session cleared");
    }

    /// Wait for every write-through scheduled so far to finish.
    pub async fn flush(&self) {
        loop {
            let handles = std::mem::take(&mut *self.lock_pending());
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "write-through task did not complete");
                }
            }
        }
    }

    // =========================================================================
    // WRITE-THROUGH
    // =========================================================================

    fn schedule_write_through(&self) {
        let Session { token, user, .. } = self.snapshot();
        let storage = Arc::clone(&self.inner.storage);
        debug!(has_token = token.is_some(), has_user = user.is_some(), "scheduling session write-through");

        let Some(runtime) = self.inner.runtime.clone().or_else(current_runtime) else {
            error!("no Tokio runtime available; session change not persisted");
            return;
        };
        let handle = runtime.spawn(async move {
            write_through(storage.as_ref(), token, user).await;
        });

        let mut pending = self.lock_pending();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.inner.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn current_runtime() -> Option<Handle> {
    match Handle::try_current() {
        Ok(handle) => Some(handle),
        Err(_) => None,
    }
}

/// Read one slot, collapsing failures to absence.
async fn read_slot(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key).await {
        Ok(value) => value,
        Err(e) => {
            error!(key, error = %e, "failed to load session slot");
            None
        }
    }
}

/// Bring both slots in line with `token` and `user`. Slots are written
/// independently; one failing does not skip the other.
async fn write_through(storage: &dyn KeyValueStore, token: Option<String>, user: Option<UserProfile>) {
    let token_res = match token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => storage.set(TOKEN_KEY, token).await,
        None => storage.delete(TOKEN_KEY).await,
    };
    log_failure("write-through", TOKEN_KEY, token_res);

    let user_res = match user {
        Some(user) => match serde_json::to_string(&user) {
            Ok(raw) => storage.set(USER_KEY, &raw).await,
            Err(e) => {
                error!(key = USER_KEY, error = %e, "failed to serialize user profile");
                return;
            }
        },
        None => storage.delete(USER_KEY).await,
    };
    log_failure("write-through", USER_KEY, user_res);
}

fn log_failure(context: &'static str, key: &str, result: Result<(), StorageError>) {
    if let Err(e) = result {
        error!(context, key, error = %e, "session storage operation failed");
    }
}
