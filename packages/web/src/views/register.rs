//! Registration page view with email/password form.

use api::{password_strength, validate_signup, Role, SignupRequest};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, FormField, Input};
use ui::use_api;

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let api = use_api();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| Role::Student);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = api.clone();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let p = password();
            if let Err(err) = validate_signup(&n, &e, &p) {
                error.set(Some(err.to_string()));
                return;
            }

            loading.set(true);
            let request = SignupRequest {
                full_name: n,
                email: e,
                password: p,
                role: role(),
            };
            match client.signup(&request).await {
                Ok(user) => {
                    tracing::info!("Registered {}", user.email);
                    nav.replace(Route::Login {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    let strength = password_strength(&password());

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Create an account" }
                p { class: "auth-subtitle", "Join to start learning" }

                ErrorBanner { message: error() }

                form {
                    onsubmit: handle_register,
                    FormField {
                        label: "Full Name",
                        html_for: "register-name",
                        Input {
                            id: "register-name",
                            placeholder: "Jane Doe",
                            value: name(),
                            oninput: move |evt: FormEvent| name.set(evt.value()),
                        }
                    }
                    FormField {
                        label: "Email",
                        html_for: "register-email",
                        Input {
                            id: "register-email",
                            r#type: "email",
                            placeholder: "name@example.com",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    FormField {
                        label: "Password",
                        html_for: "register-password",
                        Input {
                            id: "register-password",
                            r#type: "password",
                            autocomplete: "new-password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        if !password().is_empty() {
                            span { class: strength.css_class(), "Strength: {strength.label()}" }
                        }
                    }
                    FormField {
                        label: "Role",
                        html_for: "register-role",
                        select {
                            id: "register-role",
                            class: "form-input",
                            onchange: move |evt: FormEvent| {
                                if let Some(r) = Role::parse(&evt.value()) {
                                    role.set(r);
                                }
                            },
                            for r in Role::ALL {
                                option { key: "{r.as_str()}", value: "{r.as_str()}", selected: r == role(), "{r.label()}" }
                            }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        class: "btn-block",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign up" }
                    }
                }

                p {
                    class: "auth-footer",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
