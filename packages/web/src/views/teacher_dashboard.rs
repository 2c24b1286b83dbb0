use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner, StatCard};
use ui::{report_error, use_api, use_auth};

use crate::Route;

#[component]
pub fn TeacherDashboard() -> Element {
    let auth = use_auth();
    let api = use_api();
    let first_name = auth()
        .user
        .map(|u| u.first_name().to_string())
        .unwrap_or_default();

    let dashboard = use_resource(move || {
        let api = api.clone();
        async move { api.teacher_dashboard().await.map_err(|e| report_error(auth, &e)) }
    });

    let body = match &*dashboard.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(data)) => rsx! {
            div {
                class: "grid grid-4",
                StatCard { label: "Courses", value: data.stats.total_courses.to_string() }
                StatCard { label: "Students", value: data.stats.total_students.to_string() }
                StatCard { label: "Pending Tasks", value: data.stats.pending_tasks.to_string() }
                StatCard { label: "Assignments", value: data.stats.total_assignments.to_string() }
            }
            div {
                class: "grid grid-2 section-gap",
                div {
                    class: "card",
                    div {
                        class: "spread",
                        h2 { class: "card-title", "Assigned Courses" }
                        Link { to: Route::TeacherSections {}, "View all" }
                    }
                    if data.assigned_sections.is_empty() {
                        p { class: "empty-state", "No sections assigned yet" }
                    }
                    ul {
                        class: "list",
                        for section in data.assigned_sections.iter() {
                            li {
                                key: "{section.id}",
                                div {
                                    class: "spread",
                                    div {
                                        div { "{section.course.title}" }
                                        div {
                                            class: "text-muted",
                                            "{section.course.code.clone().unwrap_or_default()} · Section {section.name}"
                                            if let Some(semester) = &section.semester {
                                                " · {semester}"
                                            }
                                        }
                                    }
                                    span { class: "badge badge-muted", "{section.fill_label()} students" }
                                }
                            }
                        }
                    }
                }
                div {
                    class: "card",
                    h2 { class: "card-title", "Pending Grading" }
                    if data.pending_grading.is_empty() {
                        p { class: "empty-state", "All caught up" }
                    }
                    ul {
                        class: "list",
                        for task in data.pending_grading.iter() {
                            li {
                                key: "{task.assignment_id}",
                                div {
                                    class: "spread",
                                    div {
                                        div { "{task.assignment_title}" }
                                        div { class: "text-muted", "{task.course_title} · {task.section_name}" }
                                    }
                                    span { class: "badge badge-warning", "{task.pending_count} / {task.total_submissions}" }
                                }
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
            PageHeader {
                title: format!("Welcome back, {first_name}"),
                subtitle: "Your teaching overview",
            }
            {body}
        }
    }
}
