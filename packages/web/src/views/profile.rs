use dioxus::prelude::*;
use ui::components::PageHeader;
use ui::{use_auth, LogoutButton};

use crate::Route;

#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let Some(user) = auth().user else {
        return rsx! {};
    };
    let status = if user.is_active { "Active" } else { "Inactive" };

    rsx! {
        div {
            class: "page",
            PageHeader { title: "My Profile" }
            div {
                class: "card profile-card",
                div {
                    class: "row",
                    span { class: "avatar avatar-lg", "{user.initial()}" }
                    div {
                        h2 { class: "card-title", "{user.full_name}" }
                        span { class: "badge badge-primary", "{user.role.label()}" }
                    }
                }
                dl {
                    class: "profile-fields",
                    dt { "Email" }
                    dd { "{user.email}" }
                    dt { "Role" }
                    dd { "{user.role.label()}" }
                    dt { "Account" }
                    dd { "{status}" }
                }
                LogoutButton {
                    class: "btn btn-danger",
                    on_logout: move |_| {
                        nav.replace(Route::Login {});
                    },
                }
            }
        }
    }
}
