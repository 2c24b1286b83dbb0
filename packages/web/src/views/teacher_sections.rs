use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner};
use ui::{report_error, use_api, use_auth};

use crate::Route;

#[component]
pub fn TeacherSections() -> Element {
    let auth = use_auth();
    let api = use_api();

    let sections = use_resource(move || {
        let api = api.clone();
        async move { api.teacher_sections().await.map_err(|e| report_error(auth, &e)) }
    });

    let body = match &*sections.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "card empty-state", h3 { "No Sections" } p { "You have not been assigned any sections yet." } }
        },
        Some(Ok(list)) => rsx! {
            div {
                class: "grid-3",
                for section in list.iter() {
                    div {
                        key: "{section.id}",
                        class: "card course-card",
                        if let Some(code) = section.course_code.clone() {
                            span { class: "badge badge-primary", "{code}" }
                        }
                        h3 { class: "course-card-title", "{section.course_title}" }
                        p { class: "text-muted", "Section {section.name}" }
                        if let Some(semester) = section.semester.clone() {
                            p { class: "text-muted", "{semester}" }
                        }
                        p { "{section.fill_label()}" }
                        div {
                            class: "row",
                            Link { class: "btn btn-primary btn-sm", to: Route::TakeAttendance {}, "Take Attendance" }
                            Link {
                                class: "btn btn-outline btn-sm",
                                to: Route::CourseGradebook { course_id: section.course_id },
                                "Gradebook"
                            }
                            Link {
                                class: "btn btn-ghost btn-sm",
                                to: Route::CourseDetails { id: section.course_id },
                                "Course"
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "page",
            PageHeader { title: "My Sections", subtitle: "Sections assigned to you this term" }
            {body}
        }
    }
}
