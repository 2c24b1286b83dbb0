use dioxus::prelude::*;
use dioxus::router::Navigator;

use crate::Route;

mod layout;
pub use layout::{AppLayout, NotFound};

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod forgot_password;
pub use forgot_password::ForgotPassword;

mod reset_password;
pub use reset_password::ResetPassword;

mod dashboard;
pub use dashboard::Dashboard;

mod student_dashboard;
mod teacher_dashboard;

mod courses;
pub use courses::Courses;

mod course_details;
pub use course_details::CourseDetails;

mod profile;
pub use profile::Profile;

mod my_quizzes;
pub use my_quizzes::MyQuizzes;

mod take_quiz;
pub use take_quiz::TakeQuiz;

mod quiz_results;
pub use quiz_results::QuizResults;

mod my_attendance;
pub use my_attendance::MyAttendance;

mod my_assignments;
pub use my_assignments::MyAssignments;

mod my_grades;
pub use my_grades::MyGrades;

mod student_announcements;
pub use student_announcements::StudentAnnouncements;

mod teacher_sections;
pub use teacher_sections::TeacherSections;

mod take_attendance;
pub use take_attendance::TakeAttendance;

mod gradebook;
pub use gradebook::CourseGradebook;

mod course_picker;

mod teacher_assignments;
pub use teacher_assignments::TeacherAssignments;

mod teacher_quizzes;
pub use teacher_quizzes::TeacherQuizzes;

mod teacher_announcements;
pub use teacher_announcements::TeacherAnnouncements;

mod admin;
pub use admin::{
    AdminAcademic, AdminAllocations, AdminBatches, AdminCourses, AdminDashboard, AdminUsers,
};

/// Push an app path such as a menu entry or a notification link.
pub(crate) fn go_to(nav: Navigator, path: &str) {
    match path.parse::<Route>() {
        Ok(route) => {
            nav.push(route);
        }
        Err(e) => tracing::warn!("Cannot navigate to {}: {}", path, e),
    }
}
