use api::Role;
use dioxus::prelude::*;
use ui::components::Spinner;
use ui::{home_for, use_auth, Navbar, RoleNav};

use super::go_to;
use crate::Route;

/// Shell for every signed-in page: top bar, role menu, and the page.
///
/// Anonymous visitors go to `/login`; a page outside the user's role sends
/// them to their own home.
#[component]
pub fn AppLayout() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();
    let mut menu_open = use_signal(|| false);

    let state = auth();
    if state.loading {
        return rsx! {
            Spinner {}
        };
    }
    let Some(user) = state.user else {
        nav.replace(Route::Login {});
        return rsx! {};
    };
    let role: Role = user.role;
    if !route.permits(role) {
        tracing::info!("{} may not open {}", role, route);
        go_to(nav, home_for(role));
        return rsx! {};
    }

    rsx! {
        div {
            class: "app-shell",
            Navbar {
                on_toggle_menu: move |_| {
                    let open = menu_open();
                    menu_open.set(!open);
                },
                on_navigate: move |path: String| go_to(nav, &path),
                on_logout: move |_| {
                    nav.replace(Route::Login {});
                },
            }
            div {
                class: "app-body",
                aside {
                    class: if menu_open() { "app-sidebar open" } else { "app-sidebar" },
                    RoleNav {
                        role,
                        current_path: route.to_string(),
                        on_navigate: move |path: String| {
                            menu_open.set(false);
                            go_to(nav, &path);
                        },
                    }
                }
                main {
                    class: "app-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    let path = format!("/{}", segments.join("/"));

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Page not found" }
                p { class: "auth-subtitle", "Nothing lives at {path}." }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| {
                        nav.replace(Route::Dashboard {});
                    },
                    "Back to dashboard"
                }
            }
        }
    }
}
