//! # Quizzes and attempts
//!
//! A student starts a quiz (creating a [`QuizAttempt`]), answers its
//! [`Question`]s, and submits an answer map keyed by question id. The
//! backend grades the attempt; [`AttemptResults`] carries the per-question
//! breakdown shown on the results page.
//!
//! [`quiz_status`] reproduces the badge logic of the student quiz list from
//! a quiz and the student's attempts.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Mcq,
    TrueFalse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question_type: QuestionType,
    pub question_text: String,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl Question {
    /// `(value, label)` pairs for the answer inputs. MCQ answers are the
    /// option index; true/false answers are the literal `"true"`/`"false"`.
    pub fn choices(&self) -> Vec<(String, String)> {
        match self.question_type {
            QuestionType::Mcq => self
                .options
                .iter()
                .flatten()
                .enumerate()
                .map(|(i, label)| (i.to_string(), label.clone()))
                .collect(),
            QuestionType::TrueFalse => vec![
                ("true".to_string(), "True".to_string()),
                ("false".to_string(), "False".to_string()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub course_id: Option<i64>,
    /// Minutes. `None` means untimed.
    #[serde(default)]
    pub time_limit: Option<u32>,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default)]
    pub passing_score: Option<f64>,
    #[serde(default)]
    pub available_until: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

fn default_max_attempts() -> u32 {
    1
}

impl Quiz {
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// Questions in display order.
    pub fn ordered_questions(&self) -> Vec<&Question> {
        let mut questions: Vec<&Question> = self.questions.iter().collect();
        questions.sort_by_key(|q| q.order);
        questions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// The submit endpoint names this `attempt_id`.
    #[serde(alias = "attempt_id")]
    pub id: i64,
    #[serde(default)]
    pub quiz_id: Option<i64>,
    /// Set in the teacher's view of all attempts.
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub attempt_number: Option<u32>,
    #[serde(default)]
    pub passed: Option<bool>,
}

impl QuizAttempt {
    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// Whole minutes from start to submit, or "In progress".
    pub fn time_taken(&self) -> String {
        let Some(submitted) = self.submitted_at.as_deref() else {
            return "In progress".to_string();
        };
        match (
            self.started_at.as_deref().and_then(parse_timestamp),
            parse_timestamp(submitted),
        ) {
            (Some(start), Some(end)) => format!("{} min", (end - start).num_minutes()),
            _ => "-".to_string(),
        }
    }
}

/// Mean percentage over submitted attempts.
pub fn average_percentage(attempts: &[QuizAttempt]) -> Option<f64> {
    let submitted: Vec<f64> = attempts
        .iter()
        .filter(|a| a.is_submitted())
        .map(|a| a.percentage.unwrap_or(0.0))
        .collect();
    if submitted.is_empty() {
        return None;
    }
    Some(submitted.iter().sum::<f64>() / submitted.len() as f64)
}

/// Answers keyed by question id, as the submit endpoint expects.
pub type Answers = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitAnswers {
    pub answers: Answers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: i64,
    pub question_text: String,
    #[serde(default)]
    pub question_type: Option<QuestionType>,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub student_answer: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub points_earned: f64,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl QuestionResult {
    /// Render a stored answer for display; MCQ indices become option text.
    pub fn display_answer(&self, answer: Option<&str>) -> String {
        let Some(answer) = answer.filter(|a| !a.is_empty()) else {
            return "No answer".to_string();
        };
        if let (Some(QuestionType::Mcq), Some(options)) = (self.question_type, &self.options) {
            if let Some(text) = answer.parse::<usize>().ok().and_then(|i| options.get(i)) {
                return text.clone();
            }
        }
        match answer {
            "true" => "True".to_string(),
            "false" => "False".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResults {
    pub attempt: QuizAttempt,
    #[serde(default)]
    pub results: Vec<QuestionResult>,
}

impl AttemptResults {
    pub fn percentage(&self) -> f64 {
        self.attempt.percentage.unwrap_or(0.0)
    }

    pub fn passed(&self, passing: f64) -> bool {
        self.percentage() >= passing
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }
}

/// Badge shown next to a quiz in the student's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStatus {
    Available,
    InProgress,
    Completed,
    Expired,
    MaxAttempts,
}

impl QuizStatus {
    pub fn label(&self) -> &'static str {
        match self {
            QuizStatus::Available => "Available",
            QuizStatus::InProgress => "In Progress",
            QuizStatus::Completed => "Completed",
            QuizStatus::Expired => "Expired",
            QuizStatus::MaxAttempts => "Max Attempts",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            QuizStatus::Available => "badge badge-primary",
            QuizStatus::InProgress => "badge badge-info",
            QuizStatus::Completed => "badge badge-success",
            QuizStatus::Expired => "badge badge-danger",
            QuizStatus::MaxAttempts => "badge badge-warning",
        }
    }

    /// Whether the student may open the quiz.
    pub fn can_take(&self) -> bool {
        matches!(
            self,
            QuizStatus::Available | QuizStatus::InProgress | QuizStatus::Completed
        )
    }
}

/// An unfinished attempt wins, then the deadline, then the attempt cap.
pub fn quiz_status(quiz: &Quiz, attempts: &[QuizAttempt], now: DateTime<Utc>) -> QuizStatus {
    if attempts.iter().any(|a| !a.is_submitted()) {
        return QuizStatus::InProgress;
    }
    if quiz
        .available_until
        .as_deref()
        .and_then(parse_timestamp)
        .is_some_and(|until| now > until)
    {
        return QuizStatus::Expired;
    }
    let completed = attempts.iter().filter(|a| a.is_submitted()).count() as u32;
    if completed >= quiz.max_attempts {
        QuizStatus::MaxAttempts
    } else if completed > 0 {
        QuizStatus::Completed
    } else {
        QuizStatus::Available
    }
}

/// Highest score among submitted attempts.
pub fn best_score(attempts: &[QuizAttempt]) -> Option<f64> {
    attempts
        .iter()
        .filter(|a| a.is_submitted())
        .filter_map(|a| a.score)
        .fold(None, |best, s| Some(best.map_or(s, |b: f64| b.max(s))))
}

/// Backend timestamps are ISO 8601, with or without an offset.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn quiz(max_attempts: u32, until: Option<&str>) -> Quiz {
        Quiz {
            id: 1,
            title: "Week 1".into(),
            description: None,
            course_id: Some(2),
            time_limit: Some(10),
            max_attempts,
            passing_score: Some(60.0),
            available_until: until.map(String::from),
            questions: vec![],
        }
    }

    fn attempt(id: i64, score: Option<f64>, submitted: bool) -> QuizAttempt {
        QuizAttempt {
            id,
            quiz_id: Some(1),
            student_id: None,
            score,
            max_score: Some(10.0),
            percentage: None,
            started_at: None,
            submitted_at: submitted.then(|| "2024-03-01T10:00:00".to_string()),
            attempt_number: None,
            passed: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_status_order() {
        let q = quiz(2, None);
        assert_eq!(quiz_status(&q, &[], now()), QuizStatus::Available);
        assert_eq!(
            quiz_status(&q, &[attempt(1, Some(5.0), true)], now()),
            QuizStatus::Completed
        );
        assert_eq!(
            quiz_status(
                &q,
                &[attempt(1, Some(5.0), true), attempt(2, Some(7.0), true)],
                now()
            ),
            QuizStatus::MaxAttempts
        );
        assert_eq!(
            quiz_status(
                &q,
                &[attempt(1, Some(5.0), true), attempt(2, None, false)],
                now()
            ),
            QuizStatus::InProgress
        );
    }

    #[test]
    fn test_status_expired() {
        let q = quiz(3, Some("2024-03-09T23:59:00"));
        assert_eq!(quiz_status(&q, &[], now()), QuizStatus::Expired);
        let q = quiz(3, Some("2024-03-11T00:00:00Z"));
        assert_eq!(quiz_status(&q, &[], now()), QuizStatus::Available);
    }

    #[test]
    fn test_best_score_ignores_unsubmitted() {
        assert_eq!(best_score(&[]), None);
        let attempts = [
            attempt(1, Some(4.0), true),
            attempt(2, Some(9.0), false),
            attempt(3, Some(6.5), true),
        ];
        assert_eq!(best_score(&attempts), Some(6.5));
    }

    #[test]
    fn test_teacher_attempt_view() {
        let mut a = attempt(1, Some(8.0), true);
        a.started_at = Some("2024-03-01T09:47:30".into());
        a.percentage = Some(80.0);
        assert_eq!(a.time_taken(), "12 min");
        let mut open = attempt(2, None, false);
        open.started_at = Some("2024-03-01T09:00:00".into());
        assert_eq!(open.time_taken(), "In progress");

        assert_eq!(average_percentage(&[a.clone(), open]), Some(80.0));
        let mut b = attempt(3, Some(4.0), true);
        b.percentage = Some(40.0);
        assert_eq!(average_percentage(&[a, b]), Some(60.0));
        assert_eq!(average_percentage(&[]), None);
    }

    #[test]
    fn test_choices() {
        let q: Question = serde_json::from_str(
            r#"{"id":1,"question_type":"mcq","question_text":"2+2","points":1,"order":1,"options":["3","4"]}"#,
        )
        .unwrap();
        assert_eq!(
            q.choices(),
            vec![("0".into(), "3".into()), ("1".into(), "4".into())]
        );
        let tf: Question = serde_json::from_str(
            r#"{"id":2,"question_type":"true_false","question_text":"sky is blue","points":1,"order":2}"#,
        )
        .unwrap();
        assert_eq!(tf.choices()[1].0, "false");
    }

    #[test]
    fn test_submit_response_alias() {
        let attempt: QuizAttempt = serde_json::from_str(
            r#"{"attempt_id":42,"score":8,"max_score":10,"percentage":80.0,"passed":true}"#,
        )
        .unwrap();
        assert_eq!(attempt.id, 42);
        assert_eq!(attempt.passed, Some(true));
    }

    #[test]
    fn test_results_display() {
        let results: AttemptResults = serde_json::from_str(
            r#"{"attempt":{"id":5,"score":1,"max_score":2,"percentage":50.0,"submitted_at":"2024-01-01T00:00:00"},
               "results":[{"question_id":1,"question_text":"Pick","question_type":"mcq","points":1,
                           "student_answer":"1","correct_answer":"0","is_correct":false,"points_earned":0,
                           "options":["a","b"]}]}"#,
        )
        .unwrap();
        assert!(!results.passed(60.0));
        assert!(results.passed(50.0));
        assert_eq!(results.correct_count(), 0);
        let r = &results.results[0];
        assert_eq!(r.display_answer(r.student_answer.as_deref()), "b");
        assert_eq!(r.display_answer(None), "No answer");
    }
}
