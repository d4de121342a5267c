//! Authentication state
//!
//! A small reducer-driven session model: the dashboard shell reads
//! [`AuthState`] to decide whether protected content is shown. Sessions are
//! persisted through [`SessionStore`] so a login survives restarts.

pub mod session;

pub use session::{SessionStore, StoredSession, new_token};

use serde::{Deserialize, Serialize};

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid user: {0}")]
    InvalidUser(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Session data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Build a user from a display name and email
    ///
    /// The id is the lowercased email; the avatar is a generated initials image.
    pub fn new(name: &str, email: &str) -> Result<Self, AuthError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AuthError::InvalidUser("name cannot be empty".to_string()));
        }
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(AuthError::InvalidUser(format!(
                "'{}' is not an email address",
                email
            )));
        }

        let avatar = url::Url::parse_with_params(
            "https://ui-avatars.com/api/",
            &[("name", name), ("background", "0078d4"), ("color", "fff")],
        )
        .ok()
        .map(String::from);

        Ok(Self {
            id: email.to_lowercase(),
            name: name.to_string(),
            email: email.to_string(),
            avatar,
        })
    }

    /// Initials shown in place of an avatar
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Current authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub is_loading: bool,
}

/// State transitions of the auth reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    LoginStart,
    LoginSuccess(Option<User>),
    LoginFailure,
    Logout,
    RefreshToken,
}

/// Apply an action to a state
pub fn reduce(state: &AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::LoginStart | AuthAction::RefreshToken => AuthState {
            is_loading: true,
            ..state.clone()
        },
        AuthAction::LoginSuccess(user) => AuthState {
            is_authenticated: true,
            user,
            is_loading: false,
        },
        AuthAction::LoginFailure | AuthAction::Logout => AuthState::default(),
    }
}

/// Auth state holder backed by an optional session store
#[derive(Debug, Default)]
pub struct AuthSession {
    state: AuthState,
    store: Option<SessionStore>,
}

impl AuthSession {
    /// Session persisted in `store`
    pub fn new(store: SessionStore) -> Self {
        Self {
            state: AuthState::default(),
            store: Some(store),
        }
    }

    /// Session that is never persisted
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn dispatch(&mut self, action: AuthAction) {
        tracing::debug!("Auth action: {:?}", action);
        self.state = reduce(&self.state, action);
    }

    /// Restore a persisted session, if any
    ///
    /// Unreadable session data is removed and the session stays signed out.
    pub fn restore(&mut self) -> Result<bool, AuthError> {
        let Some(store) = &self.store else {
            return Ok(false);
        };

        match store.load() {
            Ok(Some(session)) => {
                tracing::info!("Restored session for {}", session.user.email);
                self.dispatch(AuthAction::LoginSuccess(Some(session.user)));
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(AuthError::Corrupt(e)) => {
                tracing::warn!("Clearing unreadable session data: {}", e);
                store.clear()?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn begin_login(&mut self) {
        self.dispatch(AuthAction::LoginStart);
    }

    /// Finish a login: persist the session, then mark the user signed in
    pub fn complete_login(&mut self, user: User, token: impl Into<String>) -> Result<(), AuthError> {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&StoredSession::new(token, user.clone())) {
                self.dispatch(AuthAction::LoginFailure);
                return Err(e);
            }
        }
        self.dispatch(AuthAction::LoginSuccess(Some(user)));
        Ok(())
    }

    pub fn fail_login(&mut self) {
        self.dispatch(AuthAction::LoginFailure);
    }

    /// Forget the persisted session and sign out
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(store) = &self.store {
            store.clear()?;
        }
        self.dispatch(AuthAction::Logout);
        Ok(())
    }

    /// Mark a token refresh as in flight
    pub fn refresh_token(&mut self) {
        self.dispatch(AuthAction::RefreshToken);
    }
}
