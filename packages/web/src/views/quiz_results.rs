use api::{ApiClient, ApiError, AttemptResults};
use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner, StatCard};
use ui::icons::{FaCircleCheck, FaCircleXmark};
use ui::{report_error, use_api, use_auth, use_settings, Icon};

use crate::Route;

/// Results plus the pass mark of the quiz they belong to, when it has one.
async fn load_results(
    api: &ApiClient,
    attempt_id: i64,
) -> Result<(AttemptResults, Option<f64>), ApiError> {
    let results = api.attempt_results(attempt_id).await?;
    let passing = match results.attempt.quiz_id {
        Some(quiz_id) => match api.get_quiz(quiz_id).await {
            Ok(quiz) => quiz.passing_score,
            Err(e) => {
                tracing::warn!("Could not load quiz {} for its pass mark: {}", quiz_id, e);
                None
            }
        },
        None => None,
    };
    Ok((results, passing))
}

#[component]
pub fn QuizResults(attempt_id: i64) -> Element {
    let auth = use_auth();
    let api = use_api();
    let settings = use_settings();

    let loaded = use_resource(move || {
        let api = api.clone();
        async move {
            load_results(&api, attempt_id)
                .await
                .map_err(|e| report_error(auth, &e))
        }
    });

    let body = match &*loaded.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok((results, passing))) => {
            let pass_mark = passing.unwrap_or(settings.quiz.default_passing_percentage);
            let passed = results
                .attempt
                .passed
                .unwrap_or_else(|| results.passed(pass_mark));
            let percentage = format!("{:.1}%", results.percentage());
            let score = format!(
                "{} / {}",
                results.attempt.score.unwrap_or_default(),
                results.attempt.max_score.unwrap_or_default()
            );
            let correct = format!("{} / {}", results.correct_count(), results.results.len());
            let verdict_class = if passed { "card verdict verdict-pass" } else { "card verdict verdict-fail" };
            let verdict = if passed { "Passed" } else { "Not passed" };
            let pass_label = format!("Passing score: {}%", pass_mark);

            rsx! {
                div {
                    class: "{verdict_class}",
                    h2 { "{verdict}" }
                    p { class: "text-muted", "{pass_label}" }
                }
                div {
                    class: "grid-3",
                    StatCard { label: "Score", value: score }
                    StatCard { label: "Percentage", value: percentage }
                    StatCard { label: "Correct", value: correct }
                }
                h2 { class: "section-gap", "Review" }
                div {
                    class: "stack",
                    for (index, result) in results.results.iter().enumerate() {
                        div {
                            key: "{result.question_id}",
                            class: if result.is_correct { "card review-item correct" } else { "card review-item incorrect" },
                            div {
                                class: "spread",
                                h3 { class: "card-title", "{index + 1}. {result.question_text}" }
                                if result.is_correct {
                                    span { class: "text-success", Icon { icon: FaCircleCheck, width: 18, height: 18 } }
                                } else {
                                    span { class: "text-danger", Icon { icon: FaCircleXmark, width: 18, height: 18 } }
                                }
                            }
                            p { "Your answer: {result.display_answer(result.student_answer.as_deref())}" }
                            if !result.is_correct {
                                p { class: "text-success", "Correct answer: {result.display_answer(result.correct_answer.as_deref())}" }
                            }
                            p { class: "text-muted", "{result.points_earned} / {result.points} points" }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page",
            PageHeader { title: "Quiz Results", subtitle: "Attempt #{attempt_id}" }
            {body}
            Link { class: "back-link", to: Route::MyQuizzes {}, "Back to quizzes" }
        }
    }
}
