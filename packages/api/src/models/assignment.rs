//! # Assignments and submissions
//!
//! Teachers post an [`Assignment`] to a course; each student hands in at most
//! one [`Submission`], which the teacher later grades. [`assignment_status`]
//! derives the badge a student sees from the assignment, their submission
//! and the clock.

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::quiz::parse_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: String,
    #[serde(default = "default_max_points")]
    pub max_points: u32,
}

fn default_max_points() -> u32 {
    100
}

impl Assignment {
    pub fn due(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.due_date)
    }

    pub fn is_past_due(&self, now: DateTime<Utc>) -> bool {
        self.due().is_some_and(|due| now > due)
    }
}

/// Who handed a submission in, as embedded in the teacher's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionStudent {
    #[serde(default)]
    pub id: Option<i64>,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
    /// Only present in `/assignments/{id}/submissions`.
    #[serde(default)]
    pub student: Option<SubmissionStudent>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }

    pub fn student_name(&self) -> String {
        match &self.student {
            Some(student) => student.full_name.clone(),
            None => format!("Student #{}", self.student_id),
        }
    }

    /// Grade as a whole percentage of `max_points`.
    pub fn percentage(&self, max_points: u32) -> Option<u32> {
        let grade = self.grade?;
        if max_points == 0 {
            return None;
        }
        Some((grade / max_points as f64 * 100.0).round() as u32)
    }
}

/// Body for `POST /assignments/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAssignment {
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub max_points: u32,
}

/// Body for `POST /assignments/submissions/{id}/grade`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSubmission {
    pub grade: f64,
    pub feedback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    Pending,
    Submitted,
    Late,
    Graded,
}

impl AssignmentStatus {
    pub const ALL: [AssignmentStatus; 4] = [
        AssignmentStatus::Pending,
        AssignmentStatus::Submitted,
        AssignmentStatus::Graded,
        AssignmentStatus::Late,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "Pending",
            AssignmentStatus::Submitted => "Submitted",
            AssignmentStatus::Late => "Late",
            AssignmentStatus::Graded => "Graded",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "badge badge-warning",
            AssignmentStatus::Submitted => "badge badge-info",
            AssignmentStatus::Late => "badge badge-danger",
            AssignmentStatus::Graded => "badge badge-success",
        }
    }
}

/// A grade wins; otherwise lateness is judged on the hand-in time, or on the
/// clock when nothing was handed in.
pub fn assignment_status(
    assignment: &Assignment,
    submission: Option<&Submission>,
    now: DateTime<Utc>,
) -> AssignmentStatus {
    let Some(submission) = submission else {
        return if assignment.is_past_due(now) {
            AssignmentStatus::Late
        } else {
            AssignmentStatus::Pending
        };
    };
    if submission.is_graded() {
        return AssignmentStatus::Graded;
    }
    let handed_in = submission.submitted_at.as_deref().and_then(parse_timestamp);
    match (handed_in, assignment.due()) {
        (Some(at), Some(due)) if at > due => AssignmentStatus::Late,
        _ => AssignmentStatus::Submitted,
    }
}

/// "Overdue", "Due Today", "Due Tomorrow", or the date.
pub fn due_label(due_date: &str, now: DateTime<Utc>) -> String {
    let Some(due) = parse_timestamp(due_date) else {
        return due_date.to_string();
    };
    let seconds = (due - now).num_seconds();
    if seconds < 0 {
        return "Overdue".to_string();
    }
    let days = seconds.div_euclid(86_400) + i64::from(seconds.rem_euclid(86_400) != 0);
    match days {
        0 => "Due Today".to_string(),
        1 => "Due Tomorrow".to_string(),
        _ if due.year() == now.year() => due.format("%b %-d").to_string(),
        _ => due.format("%b %-d, %Y").to_string(),
    }
}

/// A `datetime-local` input value (`YYYY-MM-DDTHH:MM`, local time) as the
/// backend's UTC timestamp.
pub fn local_input_to_utc(value: &str) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%dT%H:%M").ok()?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(
        local
            .with_timezone(&Utc)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string(),
    )
}

/// A backend timestamp in local time for display.
pub fn format_local(timestamp: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(at) => at
            .with_timezone(&Local)
            .format("%b %-d, %Y %H:%M")
            .to_string(),
        None => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(due: &str) -> Assignment {
        Assignment {
            id: 3,
            course_id: 1,
            title: "Essay".into(),
            description: String::new(),
            due_date: due.into(),
            max_points: 20,
        }
    }

    fn submission(at: &str, grade: Option<f64>) -> Submission {
        Submission {
            id: 9,
            assignment_id: 3,
            student_id: 4,
            content: "done".into(),
            file_path: None,
            submitted_at: Some(at.into()),
            grade,
            feedback: None,
            student: None,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_status_without_submission() {
        let a = assignment("2024-05-10T12:00:00");
        assert_eq!(
            assignment_status(&a, None, at("2024-05-09T12:00:00")),
            AssignmentStatus::Pending
        );
        assert_eq!(
            assignment_status(&a, None, at("2024-05-11T00:00:00")),
            AssignmentStatus::Late
        );
    }

    #[test]
    fn test_status_with_submission() {
        let a = assignment("2024-05-10T12:00:00");
        let now = at("2024-05-20T00:00:00");
        let on_time = submission("2024-05-10T11:59:00", None);
        let late = submission("2024-05-10T12:30:00", None);
        let graded_late = submission("2024-05-10T12:30:00", Some(15.0));
        assert_eq!(assignment_status(&a, Some(&on_time), now), AssignmentStatus::Submitted);
        assert_eq!(assignment_status(&a, Some(&late), now), AssignmentStatus::Late);
        assert_eq!(assignment_status(&a, Some(&graded_late), now), AssignmentStatus::Graded);
    }

    #[test]
    fn test_due_label() {
        let now = at("2024-05-10T09:00:00");
        assert_eq!(due_label("2024-05-10T08:00:00", now), "Overdue");
        assert_eq!(due_label("2024-05-10T09:00:00", now), "Due Today");
        assert_eq!(due_label("2024-05-10T23:00:00", now), "Due Tomorrow");
        assert_eq!(due_label("2024-05-12T10:00:00", now), "May 12");
        assert_eq!(due_label("2025-01-03T10:00:00", now), "Jan 3, 2025");
        assert_eq!(due_label("soon", now), "soon");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(submission("2024-01-01T00:00:00", Some(15.0)).percentage(20), Some(75));
        assert_eq!(submission("2024-01-01T00:00:00", None).percentage(20), None);
        assert_eq!(submission("2024-01-01T00:00:00", Some(1.0)).percentage(0), None);
    }

    #[test]
    fn test_teacher_submission_json() {
        let s: Submission = serde_json::from_str(
            r#"{"id":1,"assignment_id":2,"student_id":3,"content":"","file_path":null,
                "submitted_at":"2024-05-01T10:00:00","grade":null,"feedback":null,
                "student":{"id":3,"full_name":"Ann Lee","email":"ann@x.edu"}}"#,
        )
        .unwrap();
        assert_eq!(s.student_name(), "Ann Lee");
        assert!(!s.is_graded());
    }

    #[test]
    fn test_local_input_rejects_garbage() {
        assert!(local_input_to_utc("2024-05-10T14:30").is_some());
        assert_eq!(local_input_to_utc(""), None);
        assert_eq!(local_input_to_utc("10/05/2024"), None);
    }
}
