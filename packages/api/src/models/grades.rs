//! A student's own grades, per enrolled course.

use super::assignment::{Assignment, Submission};
use super::course::Enrollment;
use super::quiz::{Quiz, QuizAttempt};

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentGrade {
    pub title: String,
    pub max_points: u32,
    pub grade: f64,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizGrade {
    pub title: String,
    pub score: f64,
    pub max_score: f64,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseGrades {
    pub course_id: i64,
    pub course_title: String,
    pub course_code: String,
    pub assignments: Vec<AssignmentGrade>,
    pub quizzes: Vec<QuizGrade>,
}

impl CourseGrades {
    /// Keeps graded submissions and the best submitted attempt of each quiz.
    pub fn collect(
        enrollment: &Enrollment,
        assignments: &[(Assignment, Option<Submission>)],
        quizzes: &[(Quiz, Vec<QuizAttempt>)],
    ) -> Self {
        let assignments = assignments
            .iter()
            .filter_map(|(assignment, submission)| {
                let submission = submission.as_ref()?;
                Some(AssignmentGrade {
                    title: assignment.title.clone(),
                    max_points: assignment.max_points,
                    grade: submission.grade?,
                    percentage: submission.percentage(assignment.max_points)?,
                })
            })
            .collect();

        let quizzes = quizzes
            .iter()
            .filter_map(|(quiz, attempts)| {
                let best = attempts
                    .iter()
                    .filter(|a| a.is_submitted() && a.score.is_some())
                    .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))?;
                let score = best.score?;
                let max_score = best.max_score.unwrap_or_else(|| quiz.total_points());
                let percentage = match best.percentage {
                    Some(p) => p,
                    None if max_score > 0.0 => score / max_score * 100.0,
                    None => 0.0,
                };
                Some(QuizGrade {
                    title: quiz.title.clone(),
                    score,
                    max_score,
                    percentage: percentage.round() as u32,
                })
            })
            .collect();

        Self {
            course_id: enrollment.course_id,
            course_title: enrollment.course_title.clone(),
            course_code: enrollment
                .course_code
                .clone()
                .unwrap_or_else(|| format!("COURSE-{}", enrollment.course_id)),
            assignments,
            quizzes,
        }
    }

    /// Unweighted mean of every graded item, rounded.
    pub fn overall(&self) -> Option<u32> {
        let all: Vec<u32> = self
            .assignments
            .iter()
            .map(|a| a.percentage)
            .chain(self.quizzes.iter().map(|q| q.percentage))
            .collect();
        if all.is_empty() {
            return None;
        }
        let sum: u32 = all.iter().sum();
        Some((sum as f64 / all.len() as f64).round() as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.quizzes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment() -> Enrollment {
        Enrollment {
            course_id: 4,
            course_title: "Biology".into(),
            course_code: None,
        }
    }

    fn assignment(id: i64, max_points: u32) -> Assignment {
        Assignment {
            id,
            course_id: 4,
            title: format!("A{}", id),
            description: String::new(),
            due_date: "2024-05-01T00:00:00".into(),
            max_points,
        }
    }

    fn graded(assignment_id: i64, grade: Option<f64>) -> Submission {
        Submission {
            id: assignment_id * 10,
            assignment_id,
            student_id: 1,
            content: "x".into(),
            file_path: None,
            submitted_at: Some("2024-04-30T00:00:00".into()),
            grade,
            feedback: None,
            student: None,
        }
    }

    fn attempt(score: Option<f64>, submitted: bool) -> QuizAttempt {
        QuizAttempt {
            id: 1,
            quiz_id: Some(8),
            student_id: None,
            score,
            max_score: Some(10.0),
            percentage: None,
            started_at: None,
            submitted_at: submitted.then(|| "2024-04-01T00:00:00".to_string()),
            attempt_number: None,
            passed: None,
        }
    }

    fn quiz() -> Quiz {
        serde_json::from_str(r#"{"id":8,"title":"Cells","max_attempts":3}"#).unwrap()
    }

    #[test]
    fn test_collect_keeps_graded_and_best() {
        let grades = CourseGrades::collect(
            &enrollment(),
            &[
                (assignment(1, 20), Some(graded(1, Some(15.0)))),
                (assignment(2, 20), Some(graded(2, None))),
                (assignment(3, 20), None),
            ],
            &[(
                quiz(),
                vec![
                    attempt(Some(6.0), true),
                    attempt(Some(9.0), false),
                    attempt(Some(8.0), true),
                ],
            )],
        );
        assert_eq!(grades.course_code, "COURSE-4");
        assert_eq!(grades.assignments.len(), 1);
        assert_eq!(grades.assignments[0].percentage, 75);
        assert_eq!(grades.quizzes[0].score, 8.0);
        assert_eq!(grades.quizzes[0].percentage, 80);
        // mean of 75 and 80
        assert_eq!(grades.overall(), Some(78));
    }

    #[test]
    fn test_nothing_graded() {
        let grades = CourseGrades::collect(&enrollment(), &[], &[(quiz(), vec![])]);
        assert!(grades.is_empty());
        assert_eq!(grades.overall(), None);
    }
}
