use api::Role;
use dioxus::prelude::*;
use ui::components::Spinner;
use ui::use_auth;

use super::student_dashboard::StudentDashboard;
use super::teacher_dashboard::TeacherDashboard;
use crate::Route;

/// `/dashboard` picks the dashboard for the signed-in role. Admins have
/// their own at `/admin`.
#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    match auth().role() {
        Some(Role::Student) => rsx! { StudentDashboard {} },
        Some(Role::Teacher) => rsx! { TeacherDashboard {} },
        Some(Role::Admin) => {
            nav.replace(Route::AdminDashboard {});
            rsx! {}
        }
        None => rsx! { Spinner {} },
    }
}
