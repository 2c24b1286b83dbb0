use dioxus::prelude::*;

#[component]
pub fn Spinner(#[props(into, default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "spinner-wrap",
            role: "status",
            div { class: "spinner" }
            span { class: "sr-only", "{label}" }
        }
    }
}

/// Red banner; renders nothing for `None`.
#[component]
pub fn ErrorBanner(message: Option<String>) -> Element {
    match message {
        Some(msg) => rsx! {
            div { class: "alert alert-error", role: "alert", "{msg}" }
        },
        None => rsx! {},
    }
}

#[component]
pub fn SuccessBanner(message: Option<String>) -> Element {
    match message {
        Some(msg) => rsx! {
            div { class: "alert alert-success", "{msg}" }
        },
        None => rsx! {},
    }
}

#[component]
pub fn Badge(#[props(into)] class: String, #[props(into)] label: String) -> Element {
    rsx! {
        span { class: "{class}", "{label}" }
    }
}

#[component]
pub fn StatCard(#[props(into)] label: String, #[props(into)] value: String) -> Element {
    rsx! {
        div {
            class: "card stat-card",
            div { class: "stat-value", "{value}" }
            div { class: "stat-label", "{label}" }
        }
    }
}

#[component]
pub fn PageHeader(
    #[props(into)] title: String,
    #[props(into, default)] subtitle: String,
    #[props(default = VNode::empty())] actions: Element,
) -> Element {
    rsx! {
        div {
            class: "page-header",
            div {
                h1 { class: "page-title", "{title}" }
                if !subtitle.is_empty() {
                    p { class: "page-subtitle", "{subtitle}" }
                }
            }
            div { class: "page-actions", {actions} }
        }
    }
}
