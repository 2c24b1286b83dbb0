//! Login page view with email/password form.

use api::validate_login;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, FormField, Input};
use ui::{home_for, sign_in, use_api, use_auth};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let api = use_api();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go home
    if let Some(user) = auth().user.filter(|_| !auth().loading) {
        if let Ok(route) = home_for(user.role).parse::<Route>() {
            nav.replace(route);
        }
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = api.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if let Err(err) = validate_login(&e, &p) {
                error.set(Some(err.to_string()));
                return;
            }

            loading.set(true);
            let result = async {
                let token = client.login(&e, &p).await?;
                let user = client
                    .with_token(Some(token.access_token.clone()))
                    .me()
                    .await?;
                Ok::<_, api::ApiError>((token.access_token, user))
            }
            .await;
            loading.set(false);

            match result {
                Ok((token, user)) => {
                    tracing::info!("Signed in as {}", user.email);
                    let home = home_for(user.role);
                    sign_in(auth, token, user);
                    if let Ok(route) = home.parse::<Route>() {
                        nav.replace(route);
                    }
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Welcome back" }
                p { class: "auth-subtitle", "Sign in to continue learning" }

                ErrorBanner { message: error() }

                form {
                    onsubmit: handle_login,
                    FormField {
                        label: "Email",
                        html_for: "login-email",
                        Input {
                            id: "login-email",
                            r#type: "email",
                            placeholder: "name@example.com",
                            autocomplete: "username",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    FormField {
                        label: "Password",
                        html_for: "login-password",
                        Input {
                            id: "login-password",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    div {
                        class: "auth-links",
                        Link { to: Route::ForgotPassword {}, "Forgot password?" }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        class: "btn-block",
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign in" }
                    }
                }

                p {
                    class: "auth-footer",
                    "Don't have an account? "
                    Link { to: Route::Register {}, "Create account" }
                }
            }
        }
    }
}
