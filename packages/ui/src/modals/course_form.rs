use api::{validate_course, Course, NewCourse};
use dioxus::prelude::*;

use crate::auth::{report_error, use_api, use_auth};
use crate::components::{Button, ButtonVariant, ErrorBanner, FormField, Input};
use crate::modals::ModalOverlay;
use crate::rich_text_editor::RichTextEditor;

/// Which endpoint a saved course goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourseTarget {
    /// `POST /courses/`, used by teachers.
    #[default]
    Teacher,
    /// `/admin/courses`, which also supports editing.
    Admin,
}

/// Create a course, or edit one when `course` is given (admin only).
#[component]
pub fn CourseFormModal(
    #[props(default)] course: Option<Course>,
    #[props(default)] target: CourseTarget,
    on_close: EventHandler<()>,
    on_saved: EventHandler<Course>,
) -> Element {
    let auth = use_auth();
    let api = use_api();
    let editing = course.clone();
    let is_edit = editing.is_some();

    let mut title = use_signal(|| editing.as_ref().map(|c| c.title.clone()).unwrap_or_default());
    let mut code = use_signal(|| editing.as_ref().map(|c| c.code_or_blank().to_string()).unwrap_or_default());
    let mut credit_hours = use_signal(|| editing.as_ref().and_then(|c| c.credit_hours).unwrap_or(3));
    let mut department_id = use_signal(|| editing.as_ref().and_then(|c| c.department_id));
    let mut description = use_signal(|| {
        editing
            .as_ref()
            .and_then(|c| c.description.clone())
            .unwrap_or_default()
    });
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let departments = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                match api.departments().await {
                    Ok(list) => list,
                    Err(e) => {
                        tracing::warn!("Failed to load departments: {}", e);
                        Vec::new()
                    }
                }
            }
        }
    });

    let handle_submit = {
        let api = api.clone();
        let editing_id = editing.as_ref().map(|c| c.id);
        move |_| {
            let dept = department_id();
            if let Err(e) = validate_course(&title(), &code(), credit_hours(), dept) {
                error.set(Some(e.to_string()));
                return;
            }
            let Some(dept) = dept else {
                return;
            };
            let body = NewCourse::new(&title(), &code(), credit_hours(), dept, &description());

            let api = api.clone();
            saving.set(true);
            error.set(None);
            spawn(async move {
                let result = match (target, editing_id) {
                    (CourseTarget::Admin, Some(id)) => api.admin_update_course(id, &body).await,
                    (CourseTarget::Admin, None) => api.admin_create_course(&body).await,
                    (CourseTarget::Teacher, _) => api.create_course(&body).await,
                };
                saving.set(false);
                match result {
                    Ok(saved) => {
                        tracing::info!("Saved course {}", saved.id);
                        on_saved.call(saved);
                    }
                    Err(e) => error.set(Some(report_error(auth, &e))),
                }
            });
        }
    };

    let modal_title = if is_edit { "Edit Course" } else { "Create Course" };

    rsx! {
        ModalOverlay {
            title: modal_title,
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                ErrorBanner { message: error() }

                FormField {
                    label: "Title",
                    html_for: "course-title",
                    Input {
                        id: "course-title",
                        value: title(),
                        oninput: move |evt: FormEvent| title.set(evt.value()),
                    }
                }
                div {
                    class: "form-row",
                    FormField {
                        label: "Code",
                        html_for: "course-code",
                        Input {
                            id: "course-code",
                            placeholder: "CS101",
                            value: code(),
                            oninput: move |evt: FormEvent| code.set(evt.value().to_uppercase()),
                        }
                    }
                    FormField {
                        label: "Credit Hours",
                        html_for: "course-credits",
                        Input {
                            id: "course-credits",
                            r#type: "number",
                            value: credit_hours().to_string(),
                            oninput: move |evt: FormEvent| credit_hours.set(evt.value().parse().unwrap_or(0)),
                        }
                    }
                }
                FormField {
                    label: "Department",
                    html_for: "course-department",
                    select {
                        id: "course-department",
                        class: "form-input",
                        onchange: move |evt: FormEvent| department_id.set(evt.value().parse().ok()),
                        option { value: "", selected: department_id().is_none(), "Select a department" }
                        for dept in departments.read().clone().unwrap_or_default() {
                            option {
                                key: "{dept.id}",
                                value: "{dept.id}",
                                selected: department_id() == Some(dept.id),
                                "{dept.name}"
                            }
                        }
                    }
                }
                div {
                    class: "form-field",
                    span { class: "form-label", "Description" }
                    RichTextEditor {
                        content: description(),
                        placeholder: "Describe the course...",
                        on_change: move |markdown: String| description.set(markdown),
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
                    if saving() { "Saving..." } else if is_edit { "Save Changes" } else { "Create Course" }
                }
            }
        }
    }
}
