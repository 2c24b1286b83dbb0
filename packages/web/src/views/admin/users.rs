use api::{Role, User};
use dioxus::prelude::*;
use ui::components::{Badge, Button, ButtonVariant, ErrorBanner, PageHeader, Spinner};
use ui::icons::{FaPen, FaTrash, FaUserPlus};
use ui::{platform, report_error, use_api, use_auth, Icon, UserFormModal};

use super::run_action;

#[component]
pub fn AdminUsers() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut role_filter = use_signal(|| None::<Role>);
    let mut search = use_signal(String::new);
    // None: closed, Some(None): new user, Some(Some(u)): editing u
    let mut editor = use_signal(|| None::<Option<User>>);
    let error = use_signal(|| None::<String>);
    let own_id = auth().user.map(|u| u.id);

    let mut users = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let role = role_filter();
            async move { api.admin_users(role).await.map_err(|e| report_error(auth, &e)) }
        }
    });

    let toggle = {
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            run_action(auth, error, users, async move {
                api.toggle_user_active(id).await.map(|_| ())
            });
        }
    };

    let delete = move |user: User| {
        if !platform::confirm(&format!("Delete {}? This cannot be undone.", user.full_name)) {
            return;
        }
        let api = api.clone();
        run_action(auth, error, users, async move { api.delete_user(user.id).await });
    };

    let body = match &*users.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(all)) => {
            let needle = search();
            let visible: Vec<(i64, User)> = all
                .iter()
                .filter(|u| u.matches(&needle))
                .map(|u| (u.id, u.clone()))
                .collect();
            rsx! {
                if visible.is_empty() {
                    div { class: "card empty-state", p { "No users match." } }
                } else {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Email" }
                                th { "Role" }
                                th { "Status" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for (id, user) in visible {
                                UserRow {
                                    key: "{id}",
                                    is_self: own_id == Some(id),
                                    user,
                                    on_edit: move |u: User| editor.set(Some(Some(u))),
                                    on_toggle: toggle.clone(),
                                    on_delete: delete.clone(),
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page",
            PageHeader {
                title: "User Management",
                subtitle: "Create, edit and deactivate accounts",
                actions: rsx! {
                    Button {
                        onclick: move |_| editor.set(Some(None)),
                        Icon { icon: FaUserPlus, width: 14, height: 14 }
                        " Add User"
                    }
                },
            }
            div {
                class: "toolbar",
                input {
                    class: "form-input search-input",
                    placeholder: "Search by name or email",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    class: "form-input",
                    onchange: move |evt| role_filter.set(Role::parse(&evt.value())),
                    option { value: "", "All roles" }
                    for role in Role::ALL {
                        option { key: "{role}", value: "{role}", "{role.label()}" }
                    }
                }
            }
            ErrorBanner { message: error() }
            {body}
            if let Some(target) = editor() {
                UserFormModal {
                    user: target,
                    on_close: move |_| editor.set(None),
                    on_saved: move |saved: User| {
                        tracing::info!("Saved user {}", saved.id);
                        editor.set(None);
                        users.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn UserRow(
    user: User,
    is_self: bool,
    on_edit: EventHandler<User>,
    on_toggle: EventHandler<i64>,
    on_delete: EventHandler<User>,
) -> Element {
    let id = user.id;
    let status_class = if user.is_active { "badge badge-success" } else { "badge badge-muted" };
    let status_label = if user.is_active { "Active" } else { "Inactive" };
    let toggle_label = if user.is_active { "Deactivate" } else { "Activate" };
    let edited = user.clone();
    let deleted = user.clone();

    rsx! {
        tr {
            td { "{user.full_name}" }
            td { class: "text-muted", "{user.email}" }
            td { Badge { class: "badge badge-primary", label: user.role.label() } }
            td { Badge { class: status_class, label: status_label } }
            td {
                div {
                    class: "row",
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Edit",
                        onclick: move |_| on_edit.call(edited.clone()),
                        Icon { icon: FaPen, width: 12, height: 12 }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: is_self,
                        onclick: move |_| on_toggle.call(id),
                        "{toggle_label}"
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        title: "Delete",
                        disabled: is_self,
                        onclick: move |_| on_delete.call(deleted.clone()),
                        Icon { icon: FaTrash, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}
