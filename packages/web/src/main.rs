use api::Role;
use dioxus::prelude::*;

use ui::AuthProvider;
use views::{
    AdminAcademic, AdminAllocations, AdminBatches, AdminCourses, AdminDashboard, AdminUsers,
    AppLayout, CourseDetails, CourseGradebook, Courses, Dashboard, ForgotPassword, Login,
    MyAssignments, MyAttendance, MyGrades, MyQuizzes, NotFound, Profile, QuizResults, Register,
    ResetPassword, StudentAnnouncements, TakeAttendance, TakeQuiz, TeacherAnnouncements,
    TeacherAssignments, TeacherQuizzes, TeacherSections,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/forgot-password")]
    ForgotPassword {},
    #[route("/reset-password/:token")]
    ResetPassword { token: String },

    #[layout(AppLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/courses")]
        Courses {},
        #[route("/courses/:id")]
        CourseDetails { id: i64 },
        #[route("/profile")]
        Profile {},

        #[route("/my-quizzes")]
        MyQuizzes {},
        #[route("/quiz/:quiz_id/take")]
        TakeQuiz { quiz_id: i64 },
        #[route("/quiz-results/:attempt_id")]
        QuizResults { attempt_id: i64 },
        #[route("/my-attendance")]
        MyAttendance {},
        #[route("/my-assignments")]
        MyAssignments {},
        #[route("/my-grades")]
        MyGrades {},
        #[route("/announcements")]
        StudentAnnouncements {},

        #[route("/teacher/sections")]
        TeacherSections {},
        #[route("/take-attendance")]
        TakeAttendance {},
        #[route("/gradebook/:course_id")]
        CourseGradebook { course_id: i64 },
        #[route("/teacher/assignments")]
        TeacherAssignments {},
        #[route("/teacher/quizzes")]
        TeacherQuizzes {},
        #[route("/teacher/announcements")]
        TeacherAnnouncements {},

        #[route("/admin")]
        AdminDashboard {},
        #[route("/admin/users")]
        AdminUsers {},
        #[route("/admin/courses")]
        AdminCourses {},
        #[route("/admin/academic")]
        AdminAcademic {},
        #[route("/admin/allocations")]
        AdminAllocations {},
        #[route("/admin/batches")]
        AdminBatches {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const STUDENT: &[Role] = &[Role::Student];
const STAFF: &[Role] = &[Role::Teacher, Role::Admin];
const ADMIN: &[Role] = &[Role::Admin];

impl Route {
    /// Roles allowed on a signed-in page. `None` means any role; public
    /// pages never reach the check.
    fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::MyQuizzes {}
            | Route::TakeQuiz { .. }
            | Route::QuizResults { .. }
            | Route::MyAttendance {}
            | Route::MyAssignments {}
            | Route::MyGrades {}
            | Route::StudentAnnouncements {} => Some(STUDENT),
            Route::TeacherSections {}
            | Route::TakeAttendance {}
            | Route::CourseGradebook { .. }
            | Route::TeacherAssignments {}
            | Route::TeacherQuizzes {}
            | Route::TeacherAnnouncements {} => Some(STAFF),
            Route::AdminDashboard {}
            | Route::AdminUsers {}
            | Route::AdminCourses {}
            | Route::AdminAcademic {}
            | Route::AdminAllocations {}
            | Route::AdminBatches {} => Some(ADMIN),
            _ => None,
        }
    }

    fn permits(&self, role: Role) -> bool {
        self.allowed_roles().is_none_or(|roles| roles.contains(&role))
    }
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Stylesheet { href: ui::LMS_CSS }
        document::Stylesheet { href: MAIN_CSS }
        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/dashboard`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_pages_reject_staff() {
        let take = Route::TakeQuiz { quiz_id: 3 };
        assert!(take.permits(Role::Student));
        assert!(!take.permits(Role::Teacher));
        assert!(!take.permits(Role::Admin));
    }

    #[test]
    fn test_admin_pages_admin_only() {
        for route in [
            Route::AdminDashboard {},
            Route::AdminUsers {},
            Route::AdminAllocations {},
            Route::AdminBatches {},
        ] {
            assert!(route.permits(Role::Admin));
            assert!(!route.permits(Role::Teacher));
            assert!(!route.permits(Role::Student));
        }
    }

    #[test]
    fn test_shared_pages_open_to_all_roles() {
        for role in Role::ALL {
            assert!(Route::Courses {}.permits(role));
            assert!(Route::Profile {}.permits(role));
            assert!(Route::Dashboard {}.permits(role));
        }
        assert!(Route::CourseGradebook { course_id: 1 }.permits(Role::Teacher));
        assert!(!Route::CourseGradebook { course_id: 1 }.permits(Role::Student));
    }

    #[test]
    fn test_coursework_pages_split_by_role() {
        for route in [Route::MyAssignments {}, Route::MyGrades {}, Route::StudentAnnouncements {}] {
            assert!(route.permits(Role::Student));
            assert!(!route.permits(Role::Teacher));
        }
        for route in [
            Route::TeacherAssignments {},
            Route::TeacherQuizzes {},
            Route::TeacherAnnouncements {},
        ] {
            assert!(route.permits(Role::Teacher));
            assert!(route.permits(Role::Admin));
            assert!(!route.permits(Role::Student));
        }
    }

    #[test]
    fn test_menu_paths_resolve() {
        for role in Role::ALL {
            for entry in ui::menu_for(role) {
                assert!(
                    entry.path.parse::<Route>().is_ok(),
                    "menu entry {} has no route",
                    entry.path
                );
            }
        }
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::TakeQuiz { quiz_id: 9 }.to_string(), "/quiz/9/take");
        assert_eq!(
            Route::ResetPassword { token: "abc".into() }.to_string(),
            "/reset-password/abc"
        );
        assert_eq!(
            "/gradebook/4".parse::<Route>().ok(),
            Some(Route::CourseGradebook { course_id: 4 })
        );
    }
}
