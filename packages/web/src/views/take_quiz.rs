use api::{Answers, ApiClient, ApiError, Question, Quiz, QuizAttempt, SubmitGate};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, Spinner};
use ui::icons::FaClock;
use ui::{report_error, use_api, use_auth, use_quiz_countdown, use_settings, Icon};

use crate::Route;

async fn open_attempt(api: &ApiClient, quiz_id: i64) -> Result<(Quiz, QuizAttempt), ApiError> {
    let quiz = api.get_quiz(quiz_id).await?;
    let attempt = api.start_quiz(quiz_id).await?;
    tracing::info!("Started attempt {} of quiz {}", attempt.id, quiz_id);
    Ok((quiz, attempt))
}

fn answered_count(quiz: &Quiz, answers: &Answers) -> usize {
    quiz.questions
        .iter()
        .filter(|q| answers.contains_key(&q.id.to_string()))
        .count()
}

#[component]
pub fn TakeQuiz(quiz_id: i64) -> Element {
    let auth = use_auth();
    let api = use_api();
    let settings = use_settings();
    let nav = use_navigator();

    let mut answers = use_signal(Answers::new);
    let mut attempt_id = use_signal(|| None::<i64>);
    let mut submitting = use_signal(|| false);
    let mut submit_error = use_signal(|| None::<String>);
    let mut time_up = use_signal(|| false);
    let gate = use_hook(SubmitGate::new);

    let mut countdown = use_quiz_countdown(EventHandler::new(move |_| time_up.set(true)));

    let session = use_resource(move || {
        let api = api.clone();
        async move {
            let (quiz, attempt) = open_attempt(&api, quiz_id)
                .await
                .map_err(|e| report_error(auth, &e))?;
            attempt_id.set(Some(attempt.id));
            countdown.start(quiz.time_limit);
            Ok::<_, String>(quiz)
        }
    });

    let submit = {
        let api = use_api();
        move |automatic: bool| {
            let Some(attempt) = attempt_id() else {
                return;
            };
            let api = api.clone();
            let submitted = answers.peek().clone();
            let Some(pending) = gate.begin(move || async move {
                api.submit_quiz(quiz_id, attempt, &submitted).await
            }) else {
                return;
            };
            if automatic {
                tracing::info!("Auto-submitting attempt {}", attempt);
            }
            submitting.set(true);
            submit_error.set(None);
            spawn(async move {
                match pending.await {
                    Ok(_) => {
                        countdown.stop();
                        nav.replace(Route::QuizResults { attempt_id: attempt });
                    }
                    Err(e) => {
                        tracing::error!("Submit of attempt {} failed: {}", attempt, e);
                        submitting.set(false);
                        submit_error.set(Some(report_error(auth, &e)));
                    }
                }
            });
        }
    };

    let mut auto_submit = submit.clone();
    use_effect(move || {
        if time_up() {
            auto_submit(true);
        }
    });

    let quiz = match &*session.read() {
        None => return rsx! { Spinner { label: "Starting quiz..." } },
        Some(Err(e)) => {
            return rsx! {
                div {
                    class: "page",
                    ErrorBanner { message: Some(e.clone()) }
                    Link { class: "back-link", to: Route::MyQuizzes {}, "Back to quizzes" }
                }
            }
        }
        Some(Ok(quiz)) => quiz.clone(),
    };

    let threshold = settings.quiz.warning_threshold_secs;
    let timer_class = if countdown.is_warning(threshold) {
        "quiz-timer warning"
    } else {
        "quiz-timer"
    };
    let total = quiz.questions.len();
    let answered = answered_count(&quiz, &answers.read());
    let questions: Vec<Question> = quiz.ordered_questions().into_iter().cloned().collect();
    // Answers freeze at zero; the button stays usable to retry a failed submit
    let locked = submitting() || time_up();
    let submit_label = if submitting() { "Submitting..." } else { "Submit Quiz" };
    let mut manual_submit = submit.clone();

    rsx! {
        div {
            class: "page quiz-page",
            div {
                class: "quiz-header card",
                div {
                    h1 { class: "page-title", "{quiz.title}" }
                    if let Some(description) = quiz.description.clone() {
                        p { class: "text-muted", "{description}" }
                    }
                    p { class: "text-muted", "{answered} of {total} answered" }
                }
                if let Some(display) = countdown.display() {
                    div {
                        class: "{timer_class}",
                        Icon { icon: FaClock, width: 16, height: 16 }
                        span { "{display}" }
                    }
                }
            }

            if time_up() {
                div { class: "alert alert-warning", "Time is up. Your answers are being submitted." }
            }
            ErrorBanner { message: submit_error() }

            div {
                class: "stack",
                for (index, question) in questions.into_iter().enumerate() {
                    QuestionCard {
                        key: "{question.id}",
                        number: index + 1,
                        question: question.clone(),
                        selected: answers.read().get(&question.id.to_string()).cloned(),
                        disabled: locked,
                        on_answer: move |value: String| {
                            answers.write().insert(question.id.to_string(), value);
                        },
                    }
                }
            }

            div {
                class: "spread",
                Link { class: "back-link", to: Route::MyQuizzes {}, "Back to quizzes" }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: submitting(),
                    onclick: move |_| manual_submit(false),
                    "{submit_label}"
                }
            }
        }
    }
}

#[component]
fn QuestionCard(
    number: usize,
    question: Question,
    selected: Option<String>,
    disabled: bool,
    on_answer: EventHandler<String>,
) -> Element {
    let group = format!("question-{}", question.id);
    let points = format!("{} pts", question.points);

    rsx! {
        div {
            class: "card question-card",
            div {
                class: "spread",
                h3 { class: "card-title", "{number}. {question.question_text}" }
                span { class: "badge badge-muted", "{points}" }
            }
            div {
                class: "question-options",
                for (index, (value, label)) in question.choices().into_iter().enumerate() {
                    Choice {
                        key: "{index}",
                        group: group.clone(),
                        checked: selected.as_deref() == Some(value.as_str()),
                        value,
                        label,
                        disabled,
                        on_select: on_answer,
                    }
                }
            }
            if selected.is_none() {
                p { class: "text-muted", "Not answered" }
            }
        }
    }
}

#[component]
fn Choice(
    group: String,
    value: String,
    label: String,
    checked: bool,
    disabled: bool,
    on_select: EventHandler<String>,
) -> Element {
    let picked = value.clone();
    rsx! {
        label {
            class: "question-option",
            input {
                r#type: "radio",
                name: "{group}",
                value: "{value}",
                checked,
                disabled,
                onchange: move |_| on_select.call(picked.clone()),
            }
            span { "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::QuestionType;

    fn question(id: i64) -> Question {
        Question {
            id,
            question_type: QuestionType::TrueFalse,
            question_text: format!("Q{}", id),
            points: 1.0,
            order: id as i32,
            options: None,
        }
    }

    #[test]
    fn test_answered_count_ignores_unknown_ids() {
        let quiz = Quiz {
            id: 1,
            title: "Quiz".into(),
            description: None,
            course_id: Some(1),
            time_limit: Some(10),
            max_attempts: 1,
            passing_score: None,
            available_until: None,
            questions: vec![question(1), question(2), question(3)],
        };
        let mut answers = Answers::new();
        assert_eq!(answered_count(&quiz, &answers), 0);
        answers.insert("2".into(), "true".into());
        answers.insert("99".into(), "false".into());
        assert_eq!(answered_count(&quiz, &answers), 1);
    }
}
