use api::{
    format_local, sort_announcements, validate_announcement, Announcement, NewAnnouncement,
};
use dioxus::prelude::*;
use ui::components::{
    Button, ButtonVariant, ErrorBanner, FormField, Input, PageHeader, Spinner, SuccessBanner,
};
use ui::{platform, render_markdown, report_error, use_api, use_auth, ModalOverlay, RichTextEditor};

use super::course_picker::{taught_courses, CoursePicker};

/// Which announcement the form is open for.
#[derive(Debug, Clone, PartialEq)]
enum Editing {
    New(i64),
    Existing(Announcement),
}

impl Editing {
    fn draft(&self) -> NewAnnouncement {
        match self {
            Editing::New(course_id) => NewAnnouncement {
                course_id: *course_id,
                ..NewAnnouncement::default()
            },
            Editing::Existing(announcement) => announcement.to_draft(),
        }
    }

    fn id(&self) -> Option<i64> {
        match self {
            Editing::New(_) => None,
            Editing::Existing(announcement) => Some(announcement.id),
        }
    }
}

#[component]
pub fn TeacherAnnouncements() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut course = use_signal(|| None::<i64>);
    let mut editing = use_signal(|| None::<Editing>);
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let sections = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let courses = taught_courses(
                    &api.teacher_sections()
                        .await
                        .map_err(|e| report_error(auth, &e))?,
                );
                if course.peek().is_none() {
                    course.set(courses.first().map(|c| c.id));
                }
                Ok::<_, String>(courses)
            }
        }
    });

    let mut posts = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let selected = course();
            async move {
                let Some(id) = selected else {
                    return Ok(Vec::new());
                };
                let mut list = api
                    .course_announcements(id)
                    .await
                    .map_err(|e| report_error(auth, &e))?;
                sort_announcements(&mut list);
                Ok::<_, String>(list)
            }
        }
    });

    let toggle_pin = {
        let api = api.clone();
        move |post: Announcement| {
            let api = api.clone();
            spawn(async move {
                match api.update_announcement(post.id, &post.toggled_pin()).await {
                    Ok(_) => {
                        error.set(None);
                        posts.restart();
                    }
                    Err(e) => error.set(Some(report_error(auth, &e))),
                }
            });
        }
    };

    let delete_post = move |post: Announcement| {
        if !platform::confirm(&format!("Delete \"{}\"?", post.title)) {
            return;
        }
        let api = api.clone();
        spawn(async move {
            match api.delete_announcement(post.id).await {
                Ok(()) => {
                    tracing::info!("Deleted announcement {}", post.id);
                    error.set(None);
                    notice.set(Some("Announcement deleted".to_string()));
                    posts.restart();
                }
                Err(e) => error.set(Some(report_error(auth, &e))),
            }
        });
    };

    let picker = match &*sections.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "card empty-state", h3 { "No Courses" } p { "You have not been assigned any sections yet." } }
        },
        Some(Ok(list)) => rsx! { CoursePicker { courses: list.clone(), selected: course } },
    };

    let body = match &*posts.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "card empty-state", h3 { "No Announcements" } p { "Post one to reach every student in the course." } }
        },
        Some(Ok(list)) => rsx! {
            div {
                class: "stack",
                for post in list.iter().cloned() {
                    AnnouncementCard {
                        key: "{post.id}",
                        post,
                        on_edit: move |post: Announcement| editing.set(Some(Editing::Existing(post))),
                        on_pin: {
                            let mut toggle_pin = toggle_pin.clone();
                            move |post: Announcement| toggle_pin(post)
                        },
                        on_delete: {
                            let mut delete_post = delete_post.clone();
                            move |post: Announcement| delete_post(post)
                        },
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "page",
            PageHeader {
                title: "Announcements",
                subtitle: "Post news to your courses",
                actions: rsx! {
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: course().is_none(),
                        onclick: move |_| editing.set(course().map(Editing::New)),
                        "New Announcement"
                    }
                },
            }
            SuccessBanner { message: notice() }
            ErrorBanner { message: error() }
            {picker}
            {body}
            if let Some(target) = editing() {
                AnnouncementForm {
                    target,
                    on_close: move |_| editing.set(None),
                    on_saved: move |message: String| {
                        editing.set(None);
                        notice.set(Some(message));
                        posts.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn AnnouncementCard(
    post: Announcement,
    on_edit: EventHandler<Announcement>,
    on_pin: EventHandler<Announcement>,
    on_delete: EventHandler<Announcement>,
) -> Element {
    let html = render_markdown(&post.content);
    let posted = format_local(&post.created_at);
    let pin_label = if post.is_pinned { "Unpin" } else { "Pin" };
    let (edit, pin, delete) = (post.clone(), post.clone(), post.clone());

    rsx! {
        div {
            class: if post.is_pinned { "card announcement pinned" } else { "card announcement" },
            div {
                class: "spread",
                div {
                    h3 { class: "card-title", "{post.title}" }
                    p { class: "text-muted", "{posted}" }
                }
                div {
                    class: "row",
                    if post.is_pinned {
                        span { class: "badge badge-primary", "Pinned" }
                    }
                    Button { variant: ButtonVariant::Ghost, class: "btn-sm", onclick: move |_| on_pin.call(pin.clone()), "{pin_label}" }
                    Button { variant: ButtonVariant::Outline, class: "btn-sm", onclick: move |_| on_edit.call(edit.clone()), "Edit" }
                    Button { variant: ButtonVariant::Danger, class: "btn-sm", onclick: move |_| on_delete.call(delete.clone()), "Delete" }
                }
            }
            div { class: "markdown-body", dangerous_inner_html: "{html}" }
        }
    }
}

#[component]
fn AnnouncementForm(target: Editing, on_close: EventHandler<()>, on_saved: EventHandler<String>) -> Element {
    let auth = use_auth();
    let api = use_api();
    let start = target.draft();
    let editing_id = target.id();
    let mut draft = use_signal(move || start);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_save = move |_| {
        let body = draft.read().clone();
        if let Err(e) = validate_announcement(&body.title, &body.content) {
            error.set(Some(e.to_string()));
            return;
        }
        let api = api.clone();
        saving.set(true);
        error.set(None);
        spawn(async move {
            let result = match editing_id {
                Some(id) => api.update_announcement(id, &body).await,
                None => api.create_announcement(&body).await,
            };
            saving.set(false);
            match result {
                Ok(saved) => {
                    tracing::info!("Saved announcement {}", saved.id);
                    let verb = if editing_id.is_some() { "Updated" } else { "Posted" };
                    on_saved.call(format!("{} \"{}\"", verb, saved.title));
                }
                Err(e) => error.set(Some(report_error(auth, &e))),
            }
        });
    };

    let modal_title = if editing_id.is_some() { "Edit Announcement" } else { "New Announcement" };
    let current = draft();

    rsx! {
        ModalOverlay {
            title: modal_title,
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                ErrorBanner { message: error() }
                FormField {
                    label: "Title",
                    html_for: "announcement-title",
                    Input {
                        id: "announcement-title",
                        value: current.title.clone(),
                        oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    span { class: "form-label", "Content" }
                    RichTextEditor {
                        content: current.content.clone(),
                        placeholder: "Write your announcement...",
                        on_change: move |markdown: String| draft.write().content = markdown,
                    }
                }
                label {
                    class: "row",
                    input {
                        r#type: "checkbox",
                        checked: current.is_pinned,
                        onchange: move |evt: FormEvent| draft.write().is_pinned = evt.checked(),
                    }
                    "Pin to the top"
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
                    onclick: handle_save,
                    if saving() { "Saving..." } else { "Save" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_targets_course() {
        let draft = Editing::New(9).draft();
        assert_eq!(draft.course_id, 9);
        assert!(draft.title.is_empty());
        assert_eq!(Editing::New(9).id(), None);
    }

    #[test]
    fn test_existing_draft_keeps_fields() {
        let post = Announcement {
            id: 4,
            course_id: 2,
            title: "Exam moved".into(),
            content: "To Friday".into(),
            created_by: Some(1),
            is_pinned: true,
            created_at: "2024-05-01T09:00:00".into(),
            creator_name: None,
        };
        let target = Editing::Existing(post);
        assert_eq!(target.id(), Some(4));
        let draft = target.draft();
        assert_eq!(draft.title, "Exam moved");
        assert!(draft.is_pinned);
    }
}
