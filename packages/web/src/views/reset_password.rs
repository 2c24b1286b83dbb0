use std::time::Duration;

use api::validate_reset;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, FormField, Input, SuccessBanner};
use ui::platform;
use ui::use_api;

use crate::Route;

/// Landing page for the emailed reset link.
#[component]
pub fn ResetPassword(token: String) -> Element {
    let api = use_api();
    let nav = use_navigator();
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut done = use_signal(|| false);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = api.clone();
        let token = token.clone();
        spawn(async move {
            error.set(None);
            let p = password();
            if let Err(err) = validate_reset(&p, &confirm()) {
                error.set(Some(err.to_string()));
                return;
            }

            loading.set(true);
            match client.reset_password(&token, &p).await {
                Ok(_) => {
                    done.set(true);
                    platform::sleep(Duration::from_secs(2)).await;
                    nav.replace(Route::Login {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.user_message()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Reset password" }

                ErrorBanner { message: error() }

                if done() {
                    SuccessBanner { message: Some("Password reset. Redirecting to login...".to_string()) }
                } else {
                    form {
                        onsubmit: handle_submit,
                        FormField {
                            label: "New Password",
                            html_for: "reset-password",
                            Input {
                                id: "reset-password",
                                r#type: "password",
                                autocomplete: "new-password",
                                value: password(),
                                oninput: move |evt: FormEvent| password.set(evt.value()),
                            }
                        }
                        FormField {
                            label: "Confirm Password",
                            html_for: "reset-confirm",
                            Input {
                                id: "reset-confirm",
                                r#type: "password",
                                autocomplete: "new-password",
                                value: confirm(),
                                oninput: move |evt: FormEvent| confirm.set(evt.value()),
                            }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            r#type: "submit",
                            class: "btn-block",
                            disabled: loading(),
                            if loading() { "Resetting..." } else { "Reset password" }
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
