//! # Quiz authoring
//!
//! A teacher fills in the quiz details, then adds questions one at a time.
//! [`QuestionDraft::finish`] checks a question before it joins the list;
//! [`QuizDraft::to_request`] builds the `POST /quizzes/` body.

use serde::Serialize;

use super::quiz::QuestionType;
use crate::validation::ValidationError;

/// Blank MCQ option slots offered for a new question.
pub const DEFAULT_OPTION_SLOTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQuestion {
    pub question_type: QuestionType,
    pub question_text: String,
    pub points: f64,
    pub order: i32,
    pub options: Option<Vec<String>>,
    /// The option index for MCQ, `"true"`/`"false"` otherwise.
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewQuiz {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub time_limit: Option<u32>,
    pub max_attempts: u32,
    pub passing_score: Option<f64>,
    pub available_from: Option<String>,
    pub available_until: Option<String>,
    pub questions: Vec<NewQuestion>,
}

/// The question being edited in the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub question_type: QuestionType,
    pub question_text: String,
    pub points: f64,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self {
            question_type: QuestionType::Mcq,
            question_text: String::new(),
            points: 1.0,
            options: vec![String::new(); DEFAULT_OPTION_SLOTS],
            correct_answer: String::new(),
        }
    }
}

impl QuestionDraft {
    /// Validate and number the question. Blank MCQ options are dropped and
    /// the correct answer is re-pointed at the remaining list.
    pub fn finish(&self, order: i32) -> Result<NewQuestion, ValidationError> {
        let text = self.question_text.trim();
        if text.is_empty() {
            return Err(ValidationError::Required("Question"));
        }
        if self.points <= 0.0 {
            return Err(ValidationError::Points);
        }
        let (options, correct_answer) = match self.question_type {
            QuestionType::Mcq => {
                let picked: Option<usize> = self.correct_answer.parse().ok();
                let mut kept = Vec::new();
                let mut correct = None;
                for (i, option) in self.options.iter().enumerate() {
                    let option = option.trim();
                    if option.is_empty() {
                        continue;
                    }
                    if picked == Some(i) {
                        correct = Some(kept.len());
                    }
                    kept.push(option.to_string());
                }
                if kept.len() < 2 {
                    return Err(ValidationError::TooFewOptions);
                }
                let correct = correct.ok_or(ValidationError::NoCorrectAnswer)?;
                (Some(kept), correct.to_string())
            }
            QuestionType::TrueFalse => match self.correct_answer.as_str() {
                "true" | "false" => (None, self.correct_answer.clone()),
                _ => return Err(ValidationError::NoCorrectAnswer),
            },
        };
        Ok(NewQuestion {
            question_type: self.question_type,
            question_text: text.to_string(),
            points: self.points,
            order,
            options,
            correct_answer,
        })
    }
}

/// Quiz details as typed into the form.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    /// Minutes; blank for untimed.
    pub time_limit: String,
    pub max_attempts: u32,
    /// Percent; blank for the default.
    pub passing_score: String,
    pub available_from: String,
    pub available_until: String,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            time_limit: String::new(),
            max_attempts: 1,
            passing_score: String::new(),
            available_from: String::new(),
            available_until: String::new(),
        }
    }
}

impl QuizDraft {
    /// Checks the details step on its own.
    pub fn check_details(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required("Quiz title"));
        }
        if self.max_attempts == 0 {
            return Err(ValidationError::Attempts);
        }
        optional_number::<u32>(&self.time_limit, ValidationError::TimeLimit)?;
        let passing = optional_number::<f64>(&self.passing_score, ValidationError::PassingScore)?;
        if passing.is_some_and(|p| !(0.0..=100.0).contains(&p)) {
            return Err(ValidationError::PassingScore);
        }
        Ok(())
    }

    pub fn to_request(
        &self,
        course_id: i64,
        questions: Vec<NewQuestion>,
    ) -> Result<NewQuiz, ValidationError> {
        self.check_details()?;
        if questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }
        let description = self.description.trim();
        Ok(NewQuiz {
            course_id,
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            time_limit: optional_number(&self.time_limit, ValidationError::TimeLimit)?
                .filter(|minutes| *minutes > 0),
            max_attempts: self.max_attempts,
            passing_score: optional_number(&self.passing_score, ValidationError::PassingScore)?,
            available_from: optional_text(&self.available_from),
            available_until: optional_text(&self.available_until),
            questions,
        })
    }
}

fn optional_number<T: std::str::FromStr>(
    value: &str,
    err: ValidationError,
) -> Result<Option<T>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| err)
}

/// `datetime-local` values go to the backend as typed; it parses them with
/// `fromisoformat`.
fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq(options: &[&str], correct: &str) -> QuestionDraft {
        QuestionDraft {
            question_text: "Pick one".into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct.into(),
            ..QuestionDraft::default()
        }
    }

    #[test]
    fn test_mcq_drops_blank_options_and_reindexes() {
        let q = mcq(&["", "red", " ", "blue"], "3").finish(2).unwrap();
        assert_eq!(q.options, Some(vec!["red".to_string(), "blue".to_string()]));
        assert_eq!(q.correct_answer, "1");
        assert_eq!(q.order, 2);
    }

    #[test]
    fn test_mcq_rejections() {
        assert_eq!(
            mcq(&["only", "", "", ""], "0").finish(0),
            Err(ValidationError::TooFewOptions)
        );
        assert_eq!(
            mcq(&["a", "b", "", ""], "").finish(0),
            Err(ValidationError::NoCorrectAnswer)
        );
        // the picked slot was left blank
        assert_eq!(
            mcq(&["a", "b", "", ""], "2").finish(0),
            Err(ValidationError::NoCorrectAnswer)
        );
        let blank = QuestionDraft::default();
        assert_eq!(blank.finish(0), Err(ValidationError::Required("Question")));
    }

    #[test]
    fn test_true_false() {
        let draft = QuestionDraft {
            question_type: QuestionType::TrueFalse,
            question_text: "Water is wet".into(),
            correct_answer: "true".into(),
            ..QuestionDraft::default()
        };
        let q = draft.finish(0).unwrap();
        assert_eq!(q.options, None);
        assert_eq!(q.correct_answer, "true");

        let unanswered = QuestionDraft {
            correct_answer: String::new(),
            ..draft
        };
        assert_eq!(unanswered.finish(0), Err(ValidationError::NoCorrectAnswer));
    }

    #[test]
    fn test_quiz_request() {
        let draft = QuizDraft {
            title: " Week 3 ".into(),
            time_limit: "15".into(),
            passing_score: "".into(),
            max_attempts: 2,
            ..QuizDraft::default()
        };
        let question = mcq(&["a", "b"], "0").finish(0).unwrap();
        let body = draft.to_request(7, vec![question]).unwrap();
        assert_eq!(body.title, "Week 3");
        assert_eq!(body.time_limit, Some(15));
        assert_eq!(body.passing_score, None);
        assert_eq!(body.description, None);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["questions"][0]["question_type"], "mcq");
        assert_eq!(json["available_from"], serde_json::Value::Null);

        assert_eq!(draft.to_request(7, vec![]), Err(ValidationError::NoQuestions));
    }

    #[test]
    fn test_details_checks() {
        let bad_limit = QuizDraft {
            title: "T".into(),
            time_limit: "ten".into(),
            ..QuizDraft::default()
        };
        assert_eq!(bad_limit.check_details(), Err(ValidationError::TimeLimit));
        let bad_pass = QuizDraft {
            title: "T".into(),
            passing_score: "120".into(),
            ..QuizDraft::default()
        };
        assert_eq!(bad_pass.check_details(), Err(ValidationError::PassingScore));
    }
}
