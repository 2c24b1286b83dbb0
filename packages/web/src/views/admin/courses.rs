use api::Course;
use dioxus::prelude::*;
use ui::components::{Badge, Button, ButtonVariant, ErrorBanner, PageHeader, Spinner};
use ui::icons::{FaCheck, FaPen, FaPlus, FaTrash};
use ui::{platform, report_error, use_api, use_auth, CourseFormModal, CourseTarget, Icon};

use super::run_action;

/// Row action picked from the course table.
#[derive(Debug, Clone, PartialEq)]
enum CourseAction {
    Edit(Course),
    Approve(i64),
    TogglePublish(i64),
    Delete(Course),
}

#[component]
pub fn AdminCourses() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut search = use_signal(String::new);
    let mut editor = use_signal(|| None::<Option<Course>>);
    let error = use_signal(|| None::<String>);

    let mut courses = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.admin_courses().await.map_err(|e| report_error(auth, &e)) }
        }
    });

    let on_action = move |action: CourseAction| {
        let api = api.clone();
        match action {
            CourseAction::Edit(course) => editor.set(Some(Some(course))),
            CourseAction::Approve(id) => {
                run_action(auth, error, courses, async move {
                    api.approve_course(id).await.map(|_| ())
                });
            }
            CourseAction::TogglePublish(id) => {
                run_action(auth, error, courses, async move {
                    api.toggle_publish(id).await.map(|_| ())
                });
            }
            CourseAction::Delete(course) => {
                if platform::confirm(&format!("Delete course \"{}\"?", course.title)) {
                    run_action(auth, error, courses, async move {
                        api.delete_course(course.id).await
                    });
                }
            }
        }
    };

    let body = match &*courses.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(all)) => {
            let needle = search();
            let visible: Vec<(i64, Course)> = all
                .iter()
                .filter(|c| c.matches(&needle))
                .map(|c| (c.id, c.clone()))
                .collect();
            rsx! {
                if visible.is_empty() {
                    div { class: "card empty-state", p { "No courses match." } }
                } else {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Code" }
                                th { "Title" }
                                th { "Credits" }
                                th { "Approval" }
                                th { "Visibility" }
                                th { "Actions" }
                            }
                        }
                        tbody {
                            for (id, course) in visible {
                                CourseRow { key: "{id}", course, on_action: on_action.clone() }
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
                title: "Course Management",
                subtitle: "Approve, publish and edit courses",
                actions: rsx! {
                    Button {
                        onclick: move |_| editor.set(Some(None)),
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        " Add Course"
                    }
                },
            }
            div {
                class: "toolbar",
                input {
                    class: "form-input search-input",
                    placeholder: "Search by title or code",
                    value: "{search}",
                    oninput: move |evt| search.set(evt.value()),
                }
            }
            ErrorBanner { message: error() }
            {body}
            if let Some(target) = editor() {
                CourseFormModal {
                    course: target,
                    target: CourseTarget::Admin,
                    on_close: move |_| editor.set(None),
                    on_saved: move |saved: Course| {
                        tracing::info!("Saved course {}", saved.id);
                        editor.set(None);
                        courses.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn CourseRow(course: Course, on_action: EventHandler<CourseAction>) -> Element {
    let id = course.id;
    let approval_class = if course.is_approved { "badge badge-success" } else { "badge badge-warning" };
    let approval_label = if course.is_approved { "Approved" } else { "Pending" };
    let visibility_class = if course.is_published { "badge badge-info" } else { "badge badge-muted" };
    let visibility_label = if course.is_published { "Published" } else { "Draft" };
    let publish_label = if course.is_published { "Unpublish" } else { "Publish" };
    let credits = course.credit_hours.map(|h| h.to_string()).unwrap_or_else(|| "-".into());
    let edited = course.clone();
    let deleted = course.clone();

    rsx! {
        tr {
            td { "{course.code_or_blank()}" }
            td { "{course.title}" }
            td { "{credits}" }
            td { Badge { class: approval_class, label: approval_label } }
            td { Badge { class: visibility_class, label: visibility_label } }
            td {
                div {
                    class: "row",
                    if !course.is_approved {
                        Button {
                            variant: ButtonVariant::Secondary,
                            title: "Approve",
                            onclick: move |_| on_action.call(CourseAction::Approve(id)),
                            Icon { icon: FaCheck, width: 12, height: 12 }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_action.call(CourseAction::TogglePublish(id)),
                        "{publish_label}"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        title: "Edit",
                        onclick: move |_| on_action.call(CourseAction::Edit(edited.clone())),
                        Icon { icon: FaPen, width: 12, height: 12 }
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        title: "Delete",
                        onclick: move |_| on_action.call(CourseAction::Delete(deleted.clone())),
                        Icon { icon: FaTrash, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}
