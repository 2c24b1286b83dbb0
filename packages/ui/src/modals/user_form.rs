use api::{validate_new_user, validate_user_update, NewUser, Role, User, UserUpdate};
use dioxus::prelude::*;

use crate::auth::{report_error, use_api, use_auth};
use crate::components::{Button, ButtonVariant, ErrorBanner, FormField, Input};
use crate::modals::ModalOverlay;

/// Create a user (`user: None`) or edit an existing one.
///
/// The program picker only appears for students and is filled from
/// `/academic/programs`. On edit an empty password keeps the current one.
#[component]
pub fn UserFormModal(
    #[props(default)] user: Option<User>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<User>,
) -> Element {
    let auth = use_auth();
    let api = use_api();
    let editing = user.clone();
    let is_edit = editing.is_some();

    let mut full_name = use_signal(|| editing.as_ref().map(|u| u.full_name.clone()).unwrap_or_default());
    let mut email = use_signal(|| editing.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| editing.as_ref().map(|u| u.role).unwrap_or_default());
    let mut program_id = use_signal(|| editing.as_ref().and_then(|u| u.program_id));
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let programs = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                match api.programs().await {
                    Ok(list) => list,
                    Err(e) => {
                        tracing::warn!("Failed to load programs: {}", e);
                        Vec::new()
                    }
                }
            }
        }
    });

    let handle_submit = {
        let api = api.clone();
        let editing = editing.clone();
        move |_| {
            let name = full_name();
            let mail = email();
            let pw = password();
            let chosen_role = role();
            let program = if chosen_role == Role::Student { program_id() } else { None };

            let checked = if is_edit {
                validate_user_update(&name, &mail, &pw)
            } else {
                validate_new_user(&name, &mail, &pw)
            };
            if let Err(e) = checked {
                error.set(Some(e.to_string()));
                return;
            }

            let api = api.clone();
            let editing = editing.clone();
            saving.set(true);
            error.set(None);
            spawn(async move {
                let result = match editing {
                    Some(existing) => {
                        let update = UserUpdate {
                            email: mail.trim().to_string(),
                            full_name: name.trim().to_string(),
                            password: if pw.is_empty() { None } else { Some(pw) },
                            role: chosen_role,
                            program_id: program,
                        };
                        api.update_user(existing.id, &update).await
                    }
                    None => {
                        let new_user = NewUser {
                            email: mail.trim().to_string(),
                            full_name: name.trim().to_string(),
                            password: pw,
                            role: chosen_role,
                            program_id: program,
                        };
                        api.create_user(&new_user).await
                    }
                };
                saving.set(false);
                match result {
                    Ok(saved) => {
                        tracing::info!("Saved user {}", saved.id);
                        on_saved.call(saved);
                    }
                    Err(e) => error.set(Some(report_error(auth, &e))),
                }
            });
        }
    };

    let title = if is_edit { "Edit User" } else { "Create User" };
    let password_label = if is_edit { "New Password" } else { "Password" };
    let password_placeholder = if is_edit { "Leave blank to keep current" } else { "At least 6 characters" };

    rsx! {
        ModalOverlay {
            title,
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                ErrorBanner { message: error() }

                FormField {
                    label: "Full Name",
                    html_for: "user-full-name",
                    Input {
                        id: "user-full-name",
                        value: full_name(),
                        oninput: move |evt: FormEvent| full_name.set(evt.value()),
                    }
                }
                FormField {
                    label: "Email",
                    html_for: "user-email",
                    Input {
                        id: "user-email",
                        r#type: "email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                FormField {
                    label: password_label,
                    html_for: "user-password",
                    Input {
                        id: "user-password",
                        r#type: "password",
                        placeholder: password_placeholder,
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }
                FormField {
                    label: "Role",
                    html_for: "user-role",
                    select {
                        id: "user-role",
                        class: "form-input",
                        value: "{role().as_str()}",
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
                if role() == Role::Student {
                    FormField {
                        label: "Program",
                        html_for: "user-program",
                        select {
                            id: "user-program",
                            class: "form-input",
                            onchange: move |evt: FormEvent| program_id.set(evt.value().parse().ok()),
                            option { value: "", selected: program_id().is_none(), "No program" }
                            for program in programs.read().clone().unwrap_or_default() {
                                option {
                                    key: "{program.id}",
                                    value: "{program.id}",
                                    selected: program_id() == Some(program.id),
                                    "{program.name}"
                                }
                            }
                        }
                    }
                }
            }
            div {
                class: "modal-footer",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: saving(),
                    onclick: handle_submit,
                    if saving() { "Saving..." } else if is_edit { "Save Changes" } else { "Create User" }
                }
            }
        }
    }
}
