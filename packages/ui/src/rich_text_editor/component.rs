use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{
    FaBold, FaCode, FaHeading, FaImage, FaItalic, FaLink, FaListOl, FaListUl, FaQuoteLeft,
    FaRotateLeft, FaRotateRight,
};
use dioxus_free_icons::Icon;

use super::format::{apply, byte_to_utf16, utf16_to_byte, EditHistory, Format, Selection};
use super::render::render_markdown;
use crate::platform;

/// Simple counter for unique IDs
static EDITOR_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Bold,
    Italic,
    H1,
    H2,
    Bullets,
    Numbers,
    Quote,
    Code,
    Link,
    Image,
}

impl Action {
    fn title(&self) -> &'static str {
        match self {
            Action::Bold => "Bold",
            Action::Italic => "Italic",
            Action::H1 => "Heading 1",
            Action::H2 => "Heading 2",
            Action::Bullets => "Bullet list",
            Action::Numbers => "Numbered list",
            Action::Quote => "Quote",
            Action::Code => "Code",
            Action::Link => "Link",
            Action::Image => "Image",
        }
    }

    /// `None` when the user cancels the URL prompt.
    fn format(&self) -> Option<Format> {
        Some(match self {
            Action::Bold => Format::Bold,
            Action::Italic => Format::Italic,
            Action::H1 => Format::Heading(1),
            Action::H2 => Format::Heading(2),
            Action::Bullets => Format::BulletList,
            Action::Numbers => Format::OrderedList,
            Action::Quote => Format::Quote,
            Action::Code => Format::Code,
            Action::Link => Format::Link(platform::prompt("Enter URL")?),
            Action::Image => Format::Image(platform::prompt("Enter image URL")?),
        })
    }

    fn icon(&self) -> Element {
        match self {
            Action::Bold => rsx! { Icon { icon: FaBold, width: 12, height: 12 } },
            Action::Italic => rsx! { Icon { icon: FaItalic, width: 12, height: 12 } },
            Action::H1 => rsx! { span { class: "rte-heading", Icon { icon: FaHeading, width: 12, height: 12 } "1" } },
            Action::H2 => rsx! { span { class: "rte-heading", Icon { icon: FaHeading, width: 12, height: 12 } "2" } },
            Action::Bullets => rsx! { Icon { icon: FaListUl, width: 12, height: 12 } },
            Action::Numbers => rsx! { Icon { icon: FaListOl, width: 12, height: 12 } },
            Action::Quote => rsx! { Icon { icon: FaQuoteLeft, width: 12, height: 12 } },
            Action::Code => rsx! { Icon { icon: FaCode, width: 12, height: 12 } },
            Action::Link => rsx! { Icon { icon: FaLink, width: 12, height: 12 } },
            Action::Image => rsx! { Icon { icon: FaImage, width: 12, height: 12 } },
        }
    }
}

const TOOLBAR: [&[Action]; 4] = [
    &[Action::Bold, Action::Italic],
    &[Action::H1, Action::H2],
    &[Action::Bullets, Action::Numbers, Action::Quote, Action::Code],
    &[Action::Link, Action::Image],
];

/// Current selection of the textarea, in UTF-16 units.
async fn read_selection(id: &str) -> Option<(usize, usize)> {
    let js = format!(
        r#"var el = document.getElementById("{id}");
        if (el) {{ dioxus.send([el.selectionStart, el.selectionEnd]); }} else {{ dioxus.send(null); }}"#
    );
    let mut eval = document::eval(&js);
    match eval.recv::<Option<(usize, usize)>>().await {
        Ok(range) => range,
        Err(e) => {
            tracing::debug!("Could not read editor selection: {:?}", e);
            None
        }
    }
}

fn restore_selection(id: &str, start: usize, end: usize) {
    let js = format!(
        r#"setTimeout(function() {{
            var el = document.getElementById("{id}");
            if (el) {{ el.focus(); el.setSelectionRange({start}, {end}); }}
        }}, 0);"#
    );
    document::eval(&js);
}

fn commit(
    mut text: Signal<String>,
    mut history: Signal<EditHistory>,
    on_change: EventHandler<String>,
    next: String,
) {
    let previous = text.peek().clone();
    if previous == next {
        return;
    }
    history.write().record(previous);
    text.set(next.clone());
    on_change.call(next);
}

/// Markdown editor with a formatting toolbar and a preview tab.
///
/// `content` seeds the editor on mount; every edit is reported through
/// `on_change` as Markdown source.
#[component]
pub fn RichTextEditor(
    #[props(into, default)] content: String,
    on_change: EventHandler<String>,
    #[props(into, default = "Start writing...".to_string())] placeholder: String,
    #[props(default = 8)] rows: u32,
) -> Element {
    let editor_id = use_hook(|| {
        let n = EDITOR_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("rte-{n}")
    });
    let mut text = use_signal(|| content.clone());
    let mut history = use_signal(EditHistory::default);
    let mut preview = use_signal(|| false);

    let run_action = {
        let editor_id = editor_id.clone();
        move |action: Action| {
            let editor_id = editor_id.clone();
            spawn(async move {
                let Some(format) = action.format() else {
                    return;
                };
                let current = text.peek().clone();
                let selection = match read_selection(&editor_id).await {
                    Some((start, end)) => Selection::new(
                        utf16_to_byte(&current, start),
                        utf16_to_byte(&current, end),
                    ),
                    None => Selection::new(current.len(), current.len()),
                };
                let edit = apply(&current, selection, &format);
                let start = byte_to_utf16(&edit.text, edit.selection.start);
                let end = byte_to_utf16(&edit.text, edit.selection.end);
                commit(text, history, on_change, edit.text);
                restore_selection(&editor_id, start, end);
            });
        }
    };

    let undo = move |_| {
        let current = text.peek().clone();
        let restored = history.write().undo(&current);
        if let Some(previous) = restored {
            text.set(previous.clone());
            on_change.call(previous);
        }
    };

    let redo = move |_| {
        let current = text.peek().clone();
        let restored = history.write().redo(&current);
        if let Some(next) = restored {
            text.set(next.clone());
            on_change.call(next);
        }
    };

    let rendered = use_memo(move || render_markdown(&text()));

    rsx! {
        div {
            class: "rte",
            div {
                class: "rte-toolbar",
                for (group_index, group) in TOOLBAR.iter().enumerate() {
                    div {
                        key: "{group_index}",
                        class: "rte-group",
                        for action in group.iter().copied() {
                            button {
                                key: "{action.title()}",
                                r#type: "button",
                                class: "rte-button",
                                title: action.title(),
                                disabled: preview(),
                                onclick: {
                                    let run_action = run_action.clone();
                                    move |_| run_action(action)
                                },
                                {action.icon()}
                            }
                        }
                    }
                }
                div {
                    class: "rte-group",
                    button {
                        r#type: "button",
                        class: "rte-button",
                        title: "Undo",
                        disabled: !history.read().can_undo(),
                        onclick: undo,
                        Icon { icon: FaRotateLeft, width: 12, height: 12 }
                    }
                    button {
                        r#type: "button",
                        class: "rte-button",
                        title: "Redo",
                        disabled: !history.read().can_redo(),
                        onclick: redo,
                        Icon { icon: FaRotateRight, width: 12, height: 12 }
                    }
                }
                div {
                    class: "rte-tabs",
                    button {
                        r#type: "button",
                        class: if preview() { "rte-tab" } else { "rte-tab active" },
                        onclick: move |_| preview.set(false),
                        "Write"
                    }
                    button {
                        r#type: "button",
                        class: if preview() { "rte-tab active" } else { "rte-tab" },
                        onclick: move |_| preview.set(true),
                        "Preview"
                    }
                }
            }
            if preview() {
                div {
                    class: "rte-preview markdown-body",
                    dangerous_inner_html: "{rendered}",
                }
            } else {
                textarea {
                    id: "{editor_id}",
                    class: "rte-input",
                    rows: "{rows}",
                    placeholder: "{placeholder}",
                    value: "{text}",
                    oninput: move |evt: FormEvent| commit(text, history, on_change, evt.value()),
                }
            }
        }
    }
}
