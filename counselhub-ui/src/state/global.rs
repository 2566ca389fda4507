//! Global Application State
//!
//! Reactive state management using Leptos signals. The session signal mirrors
//! what is stored in `localStorage`; everything else a view shows is fetched
//! when the view mounts.

use leptos::*;

use counselhub::session::{Session, SessionError, SessionStore, SESSION_KEYS};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Logged-in user, if any
    pub session: RwSignal<Option<Session>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(LocalStorageStore.load()),
        error: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Persist a fresh session and publish it to the app
    pub fn sign_in(&self, session: Session) {
        if let Err(e) = LocalStorageStore.save(&session) {
            web_sys::console::error_1(&format!("Failed to store session: {}", e).into());
        }
        self.session.set(Some(session));
    }

    /// Forget the session everywhere
    pub fn sign_out(&self) {
        if let Err(e) = LocalStorageStore.clear() {
            web_sys::console::error_1(&format!("Failed to clear session: {}", e).into());
        }
        self.session.set(None);
    }

    /// Session as stored right now, without tracking
    pub fn current_session(&self) -> Option<Session> {
        self.session.get_untracked()
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

/// Browser `localStorage`, under the same flat keys the API client expects
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, SessionError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| SessionError::Unavailable("localStorage".to_string()))
    }

    fn remove_all(storage: &web_sys::Storage) -> Result<(), SessionError> {
        for key in SESSION_KEYS {
            storage
                .remove_item(key)
                .map_err(|_| SessionError::Write(key.to_string()))?;
        }
        Ok(())
    }
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> Option<Session> {
        let storage = Self::storage().ok()?;
        Session::from_entries(|key| storage.get_item(key).ok().flatten())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let storage = Self::storage()?;
        Self::remove_all(&storage)?;
        for (key, value) in session.entries() {
            storage
                .set_item(key, &value)
                .map_err(|_| SessionError::Write(key.to_string()))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        Self::remove_all(&Self::storage()?)
    }
}
