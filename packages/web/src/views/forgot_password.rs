use api::ValidationError;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, FormField, Input, SuccessBanner};
use ui::use_api;

use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    let api = use_api();
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut sent = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = api.clone();
        spawn(async move {
            error.set(None);
            let e = email().trim().to_string();
            if e.is_empty() {
                error.set(Some(ValidationError::Required("Email").to_string()));
                return;
            }

            loading.set(true);
            match client.forgot_password(&e).await {
                Ok(reply) => sent.set(Some(reply.message)),
                Err(err) => error.set(Some(err.user_message())),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Forgot password?" }
                p { class: "auth-subtitle", "Enter your email and we'll send you a reset link." }

                ErrorBanner { message: error() }

                if sent().is_some() {
                    SuccessBanner { message: sent() }
                } else {
                    form {
                        onsubmit: handle_submit,
                        FormField {
                            label: "Email",
                            html_for: "forgot-email",
                            Input {
                                id: "forgot-email",
                                r#type: "email",
                                placeholder: "name@example.com",
                                value: email(),
                                oninput: move |evt: FormEvent| email.set(evt.value()),
                            }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            r#type: "submit",
                            class: "btn-block",
                            disabled: loading(),
                            if loading() { "Sending..." } else { "Send reset link" }
                        }
                    }
                }

                p {
                    class: "auth-footer",
                    Link { to: Route::Login {}, "Back to login" }
                }
            }
        }
    }
}
