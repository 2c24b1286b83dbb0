//! Records exchanged with the backend.

mod academic;
mod announcement;
mod assignment;
mod attendance;
mod course;
mod gradebook;
mod grades;
mod notification;
mod quiz;
mod quiz_draft;
mod teacher;
mod user;

use serde::{Deserialize, Serialize};

pub use academic::{
    AcademicKind, Batch, Department, NewBatch, NewDepartment, NewProgram, NewSection,
    NewSemester, Program, Section, Semester,
};
pub use announcement::{sort_announcements, Announcement, NewAnnouncement};
pub use assignment::{
    assignment_status, due_label, format_local, local_input_to_utc, Assignment, AssignmentStatus,
    GradeSubmission, NewAssignment, Submission, SubmissionStudent,
};
pub use attendance::{
    midnight, today, AttendanceBand, AttendanceRecord, AttendanceSheet, AttendanceStatus,
    AttendanceSummary, EnrolledSection, MarkAttendance, MarkRecord, SectionAttendanceEntry,
    SectionStudent,
};
pub use course::{Course, Enrollment, NewCourse};
pub use gradebook::{grade_band, GradeBand, Gradebook, GradebookAssignment, StudentGrade};
pub use grades::{AssignmentGrade, CourseGrades, QuizGrade};
pub use notification::{notification_icon, relative_time, unread_badge, Notification, UnreadCount};
pub use quiz::{
    average_percentage, best_score, parse_timestamp, quiz_status, Answers, AttemptResults, Question, QuestionResult,
    QuestionType, Quiz, QuizAttempt, QuizStatus, SubmitAnswers,
};
pub use quiz_draft::{NewQuestion, NewQuiz, QuestionDraft, QuizDraft, DEFAULT_OPTION_SLOTS};
pub use teacher::{
    DashboardSection, DashboardStats, PendingTask, SectionCourse, TeacherDashboard, TeacherSection,
};
pub use user::{NewUser, Role, SignupRequest, TokenResponse, User, UserUpdate};

/// Headline counts on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    pub students: u32,
    pub teachers: u32,
    pub courses: u32,
    pub departments: u32,
}

/// `{"message": "..."}` acknowledgement bodies.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message: String,
}
