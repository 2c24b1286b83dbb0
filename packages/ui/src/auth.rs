//! Authentication context and hooks for the UI.

use api::{ApiClient, ApiError, Role, Settings, User};
use dioxus::prelude::*;
use store::StoredSession;

use crate::repo::make_session_repo;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
    /// True until the stored session has been restored (or found missing).
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    fn signed_out() -> Self {
        Self {
            loading: false,
            ..Self::default()
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_settings() -> Settings {
    use_context::<Settings>()
}

/// A client carrying the signed-in user's token.
pub fn use_api() -> ApiClient {
    let auth = use_auth();
    let base = use_context::<ApiClient>();
    let token = auth.read().token.clone();
    base.with_token(token)
}

/// Record a successful login and persist it.
pub fn sign_in(mut auth: Signal<AuthState>, token: String, user: User) {
    auth.set(AuthState {
        token: Some(token.clone()),
        user: Some(user.clone()),
        loading: false,
    });
    spawn(async move {
        make_session_repo()
            .save(&StoredSession { token, user })
            .await;
    });
}

/// Drop the session from memory and from the device.
pub fn sign_out(mut auth: Signal<AuthState>) {
    auth.set(AuthState::signed_out());
    spawn(async move {
        make_session_repo().clear().await;
    });
}

/// Message to show for a failed call. A rejected token signs the user out.
pub fn report_error(auth: Signal<AuthState>, err: &ApiError) -> String {
    if err.is_unauthorized() && auth.peek().token.is_some() {
        tracing::info!("Token rejected, signing out");
        sign_out(auth);
    }
    err.user_message()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
///
/// Also provides the loaded [`Settings`] and the anonymous [`ApiClient`].
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let settings = use_hook(Settings::load_or_default);
    let client = use_hook(|| ApiClient::from_settings(&settings));
    let mut auth_state = use_signal(AuthState::default);

    use_context_provider(|| settings.clone());
    use_context_provider(|| client.clone());
    use_context_provider(|| auth_state);

    // Restore the stored session on mount and re-validate it
    let _ = use_resource(move || {
        let client = client.clone();
        async move {
            let repo = make_session_repo();
            let Some(stored) = repo.load().await else {
                auth_state.set(AuthState::signed_out());
                return;
            };

            match client.with_token(Some(stored.token.clone())).me().await {
                Ok(user) => {
                    let session = StoredSession {
                        token: stored.token,
                        user,
                    };
                    auth_state.set(AuthState {
                        token: Some(session.token.clone()),
                        user: Some(session.user.clone()),
                        loading: false,
                    });
                    repo.save(&session).await;
                }
                Err(ApiError::Unauthorized { .. }) => {
                    tracing::info!("Stored session expired");
                    repo.clear().await;
                    auth_state.set(AuthState::signed_out());
                }
                Err(e) => {
                    // Backend unreachable: trust the stored user until a call fails
                    tracing::warn!("Could not verify stored session: {}", e);
                    auth_state.set(AuthState {
                        token: Some(stored.token),
                        user: Some(stored.user),
                        loading: false,
                    });
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    #[props(default)] on_logout: EventHandler<()>,
) -> Element {
    let auth_state = use_auth();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                sign_out(auth_state);
                on_logout.call(());
            },
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_defaults_to_loading() {
        let state = AuthState::default();
        assert!(state.loading);
        assert!(!state.is_signed_in());
        assert_eq!(state.role(), None);
        assert!(!AuthState::signed_out().loading);
    }

    #[test]
    fn test_role_from_user() {
        let state = AuthState {
            token: Some("t".into()),
            user: Some(User {
                id: 1,
                email: "a@b.c".into(),
                full_name: "A".into(),
                role: Role::Admin,
                is_active: true,
                program_id: None,
            }),
            loading: false,
        };
        assert!(state.is_signed_in());
        assert_eq!(state.role(), Some(Role::Admin));
    }
}
