use api::{best_score, quiz_status, ApiClient, ApiError, Quiz, QuizAttempt, QuizStatus};
use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner};
use ui::{report_error, use_api, use_auth};

use crate::Route;

#[derive(Debug, Clone, PartialEq)]
struct QuizRow {
    quiz: Quiz,
    course_title: String,
    attempts: Vec<QuizAttempt>,
    status: QuizStatus,
}

/// `None` is the "All" tab.
const FILTERS: [Option<QuizStatus>; 5] = [
    None,
    Some(QuizStatus::Available),
    Some(QuizStatus::InProgress),
    Some(QuizStatus::Completed),
    Some(QuizStatus::Expired),
];

async fn load_rows(api: &ApiClient, user_id: i64) -> Result<Vec<QuizRow>, ApiError> {
    let now = chrono::Utc::now();
    let mut rows = Vec::new();
    for enrollment in api.user_enrollments(user_id).await? {
        let quizzes = match api.course_quizzes(enrollment.course_id).await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Failed to load quizzes for {}: {}", enrollment.course_title, e);
                continue;
            }
        };
        for quiz in quizzes {
            let attempts = api.my_attempts(quiz.id).await.unwrap_or_else(|e| {
                tracing::warn!("Failed to load attempts for quiz {}: {}", quiz.id, e);
                Vec::new()
            });
            let status = quiz_status(&quiz, &attempts, now);
            rows.push(QuizRow {
                quiz,
                course_title: enrollment.course_title.clone(),
                attempts,
                status,
            });
        }
    }
    Ok(rows)
}

#[component]
pub fn MyQuizzes() -> Element {
    let auth = use_auth();
    let api = use_api();
    let nav = use_navigator();
    let mut filter = use_signal(|| None::<QuizStatus>);
    let user_id = auth().user.map(|u| u.id).unwrap_or_default();

    let rows = use_resource(move || {
        let api = api.clone();
        async move {
            load_rows(&api, user_id)
                .await
                .map_err(|e| report_error(auth, &e))
        }
    });

    let body = match &*rows.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(all)) => {
            let selected = filter();
            let visible: Vec<QuizRow> = all
                .iter()
                .filter(|r| selected.is_none_or(|s| r.status == s))
                .cloned()
                .collect();
            let tabs: Vec<(Option<QuizStatus>, String)> = FILTERS
                .into_iter()
                .map(|option| {
                    let count = all
                        .iter()
                        .filter(|r| option.is_none_or(|s| r.status == s))
                        .count();
                    (option, format!("{} ({})", option.map_or("All", |s| s.label()), count))
                })
                .collect();
            rsx! {
                div {
                    class: "tabs",
                    for (option, label) in tabs {
                        button {
                            key: "{label}",
                            class: if option == selected { "tab active" } else { "tab" },
                            onclick: move |_| filter.set(option),
                            "{label}"
                        }
                    }
                }
                if visible.is_empty() {
                    div { class: "card empty-state", h3 { "No Quizzes" } p { "Nothing to show here." } }
                }
                div {
                    class: "stack",
                    for row in visible {
                        div {
                            key: "{row.quiz.id}",
                            class: "card",
                            div {
                                class: "spread",
                                div {
                                    h3 { class: "card-title", "{row.quiz.title}" }
                                    p { class: "text-muted", "{row.course_title}" }
                                }
                                span { class: row.status.css_class(), "{row.status.label()}" }
                            }
                            div {
                                class: "row text-muted",
                                if let Some(minutes) = row.quiz.time_limit {
                                    span { "{minutes} min" }
                                }
                                span { "Attempts: {row.attempts.iter().filter(|a| a.is_submitted()).count()} / {row.quiz.max_attempts}" }
                                if let Some(pass) = row.quiz.passing_score {
                                    span { "Pass: {pass}%" }
                                }
                                if let Some(best) = best_score(&row.attempts) {
                                    span { "Best score: {best}" }
                                }
                            }
                            div {
                                class: "row",
                                if row.status.can_take() {
                                    button {
                                        class: "btn btn-primary btn-sm",
                                        onclick: move |_| {
                                            nav.push(Route::TakeQuiz { quiz_id: row.quiz.id });
                                        },
                                        if row.status == QuizStatus::InProgress { "Continue" } else if row.status == QuizStatus::Completed { "Retake" } else { "Start Quiz" }
                                    }
                                } else {
                                    span {
                                        class: "text-muted",
                                        if row.status == QuizStatus::Expired { "Quiz Expired" } else { "No Attempts Remaining" }
                                    }
                                }
                                for attempt in row.attempts.iter().filter(|a| a.is_submitted()) {
                                    Link {
                                        key: "{attempt.id}",
                                        to: Route::QuizResults { attempt_id: attempt.id },
                                        "Attempt {attempt.attempt_number.unwrap_or_default()} results"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page",
            PageHeader { title: "My Quizzes", subtitle: "Quizzes from your enrolled courses" }
            {body}
        }
    }
}
