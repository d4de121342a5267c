//! Authentication gate in front of protected content

use crate::auth::AuthState;

/// Outcome of evaluating the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the protected content
    Render,
    /// Show the login screen instead
    LoginRequired { loading: bool },
}

pub struct AuthGuard;

impl AuthGuard {
    pub fn evaluate(state: &AuthState, require_authentication: bool) -> GuardDecision {
        if !require_authentication || state.is_authenticated {
            GuardDecision::Render
        } else {
            GuardDecision::LoginRequired {
                loading: state.is_loading,
            }
        }
    }
}

/// Text shown while a login is required
pub fn render_login_screen(loading: bool) -> String {
    if loading {
        "Authentication required\nSigning in...\n".to_string()
    } else {
        "Authentication required\nRun `plugdash login --name <name> --email <email>` to sign in.\n"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthAction, reduce};

    #[test]
    fn test_not_required_always_renders() {
        assert_eq!(
            AuthGuard::evaluate(&AuthState::default(), false),
            GuardDecision::Render
        );
    }

    #[test]
    fn test_required_and_signed_out() {
        assert_eq!(
            AuthGuard::evaluate(&AuthState::default(), true),
            GuardDecision::LoginRequired { loading: false }
        );

        let loading = reduce(&AuthState::default(), AuthAction::LoginStart);
        assert_eq!(
            AuthGuard::evaluate(&loading, true),
            GuardDecision::LoginRequired { loading: true }
        );
    }

    #[test]
    fn test_required_and_signed_in() {
        let state = reduce(&AuthState::default(), AuthAction::LoginSuccess(None));
        assert_eq!(AuthGuard::evaluate(&state, true), GuardDecision::Render);
    }

    #[test]
    fn test_login_screen_text() {
        assert!(render_login_screen(true).contains("Signing in"));
        assert!(render_login_screen(false).contains("plugdash login"));
    }
}
