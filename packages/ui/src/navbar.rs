use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaBars, FaGraduationCap, FaRightFromBracket};
use dioxus_free_icons::Icon;

use crate::auth::{sign_out, use_auth};
use crate::notification_bell::NotificationBell;

/// Top bar: brand, menu toggle, notification bell, signed-in user and logout.
#[component]
pub fn Navbar(
    #[props(default)] on_toggle_menu: EventHandler<()>,
    #[props(default)] on_navigate: EventHandler<String>,
    #[props(default)] on_logout: EventHandler<()>,
) -> Element {
    let auth = use_auth();
    let user = auth.read().user.clone();

    rsx! {
        header {
            class: "navbar",
            div {
                class: "navbar-left",
                button {
                    class: "btn btn-ghost btn-icon navbar-menu",
                    title: "Menu",
                    onclick: move |_| on_toggle_menu.call(()),
                    Icon { icon: FaBars, width: 18, height: 18 }
                }
                div {
                    class: "navbar-brand",
                    Icon { icon: FaGraduationCap, width: 22, height: 22 }
                    span { "LMS" }
                }
            }
            div {
                class: "navbar-right",
                NotificationBell { on_navigate }
                if let Some(user) = user {
                    div {
                        class: "navbar-user",
                        span { class: "avatar", "{user.initial()}" }
                        div {
                            class: "navbar-user-text",
                            span { class: "navbar-user-name", "{user.full_name}" }
                            span { class: "navbar-user-role", "{user.role.label()}" }
                        }
                    }
                }
                button {
                    class: "btn btn-ghost btn-icon",
                    title: "Logout",
                    onclick: move |_| {
                        sign_out(auth);
                        on_logout.call(());
                    },
                    Icon { icon: FaRightFromBracket, width: 16, height: 16 }
                }
            }
        }
    }
}
