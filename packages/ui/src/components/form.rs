use dioxus::prelude::*;

#[component]
pub fn Label(#[props(into)] html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "form-label", r#for: "{html_for}", {children} }
    }
}

#[component]
pub fn Input(
    #[props(into, default)] id: String,
    #[props(into, default = "text".to_string())] r#type: String,
    #[props(into, default)] placeholder: String,
    #[props(into, default)] value: String,
    #[props(into, default)] class: String,
    #[props(into, default)] autocomplete: String,
    #[props(default)] required: bool,
    #[props(default)] disabled: bool,
    #[props(default)] oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            id: "{id}",
            class: "form-input {class}",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            autocomplete: "{autocomplete}",
            value: "{value}",
            required,
            disabled,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

/// A labelled field wrapper.
#[component]
pub fn FormField(#[props(into)] label: String, #[props(into)] html_for: String, children: Element) -> Element {
    rsx! {
        div {
            class: "form-field",
            Label { html_for, "{label}" }
            {children}
        }
    }
}
