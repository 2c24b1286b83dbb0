use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner, StatCard};
use ui::icons::{FaBook, FaBuilding, FaLayerGroup, FaUsers};
use ui::{report_error, use_api, use_auth, Icon};

use crate::Route;

#[component]
pub fn AdminDashboard() -> Element {
    let auth = use_auth();
    let api = use_api();

    let stats = use_resource(move || {
        let api = api.clone();
        async move { api.admin_stats().await.map_err(|e| report_error(auth, &e)) }
    });

    let cards = match &*stats.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(stats)) => rsx! {
            div {
                class: "grid-4",
                StatCard { label: "Students", value: stats.students.to_string() }
                StatCard { label: "Teachers", value: stats.teachers.to_string() }
                StatCard { label: "Courses", value: stats.courses.to_string() }
                StatCard { label: "Departments", value: stats.departments.to_string() }
            }
        },
    };

    rsx! {
        div {
            class: "page",
            PageHeader { title: "Admin Dashboard", subtitle: "Institution overview" }
            {cards}
            h2 { class: "section-gap", "Quick Actions" }
            div {
                class: "grid-4",
                Link {
                    class: "card quick-link",
                    to: Route::AdminUsers {},
                    Icon { icon: FaUsers, width: 20, height: 20 }
                    span { "Manage Users" }
                }
                Link {
                    class: "card quick-link",
                    to: Route::AdminCourses {},
                    Icon { icon: FaBook, width: 20, height: 20 }
                    span { "Manage Courses" }
                }
                Link {
                    class: "card quick-link",
                    to: Route::AdminAcademic {},
                    Icon { icon: FaBuilding, width: 20, height: 20 }
                    span { "Academic Structure" }
                }
                Link {
                    class: "card quick-link",
                    to: Route::AdminAllocations {},
                    Icon { icon: FaLayerGroup, width: 20, height: 20 }
                    span { "Course Allocations" }
                }
            }
        }
    }
}
