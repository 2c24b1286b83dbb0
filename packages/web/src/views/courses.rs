use api::Course;
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, Input, PageHeader, Spinner};
use ui::icons::FaPlus;
use ui::{report_error, use_api, use_auth, CourseFormModal, Icon};

use crate::Route;

#[component]
pub fn Courses() -> Element {
    let auth = use_auth();
    let api = use_api();
    let nav = use_navigator();
    let mut search = use_signal(String::new);
    let mut show_create = use_signal(|| false);
    let can_create = auth().role().is_some_and(|r| r.can_teach());

    let mut courses = use_resource(move || {
        let api = api.clone();
        async move { api.list_courses().await.map_err(|e| report_error(auth, &e)) }
    });

    let body = match &*courses.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(list)) => {
            let needle = search();
            let visible: Vec<Course> = list.iter().filter(|c| c.matches(&needle)).cloned().collect();
            rsx! {
                if visible.is_empty() {
                    p { class: "empty-state", "No courses found" }
                }
                div {
                    class: "grid grid-3",
                    for course in visible {
                        div {
                            key: "{course.id}",
                            class: "card course-card",
                            onclick: move |_| {
                                nav.push(Route::CourseDetails { id: course.id });
                            },
                            div {
                                class: "spread",
                                span { class: "badge badge-primary", "{course.code_or_blank()}" }
                                if let Some(hours) = course.credit_hours {
                                    span { class: "text-muted", "{hours} credits" }
                                }
                            }
                            h3 { class: "course-card-title", "{course.title}" }
                            if !course.is_published {
                                span { class: "badge badge-muted", "Draft" }
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
                title: "Available Courses",
                subtitle: "Explore the catalogue",
                actions: rsx! {
                    if can_create {
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| show_create.set(true),
                            Icon { icon: FaPlus, width: 12, height: 12 }
                            "Create Course"
                        }
                    }
                },
            }
            div {
                class: "toolbar",
                Input {
                    id: "course-search",
                    class: "search-input",
                    placeholder: "Search by title or code",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
            }
            {body}
        }

        if show_create() {
            CourseFormModal {
                on_close: move |_| show_create.set(false),
                on_saved: move |_| {
                    show_create.set(false);
                    courses.restart();
                },
            }
        }
    }
}
