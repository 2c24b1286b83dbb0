use std::cmp::Ordering;

use api::{parse_timestamp, ApiClient, ApiError, AttendanceSummary, Enrollment, Quiz};
use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner, StatCard};
use ui::{report_error, use_api, use_auth, use_settings};

use crate::Route;

#[derive(Debug, Clone, PartialEq)]
struct Overview {
    enrollments: Vec<Enrollment>,
    /// Open quizzes with their course title, soonest deadline first.
    quizzes: Vec<(Quiz, String)>,
    attendance: AttendanceSummary,
}

#[component]
pub fn StudentDashboard() -> Element {
    let auth = use_auth();
    let api = use_api();
    let settings = use_settings();
    let user = auth().user;
    let user_id = user.as_ref().map(|u| u.id).unwrap_or_default();
    let first_name = user.as_ref().map(|u| u.first_name().to_string()).unwrap_or_default();

    let overview = use_resource(move || {
        let api = api.clone();
        async move {
            load_overview(&api, user_id)
                .await
                .map_err(|e| report_error(auth, &e))
        }
    });

    let body = match &*overview.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(data)) => {
            let band = data.attendance.band(&settings.attendance);
            let attendance = format!("{:.1}%", data.attendance.attendance_percentage);
            rsx! {
                div {
                    class: "grid grid-3",
                    StatCard { label: "Enrolled Courses", value: data.enrollments.len().to_string() }
                    StatCard { label: "Open Quizzes", value: data.quizzes.len().to_string() }
                    div {
                        class: "card stat-card",
                        div { class: "stat-value {band.css_class()}", "{attendance}" }
                        div { class: "stat-label", "Attendance" }
                    }
                }
                div {
                    class: "grid grid-2 section-gap",
                    div {
                        class: "card",
                        h2 { class: "card-title", "My Courses" }
                        if data.enrollments.is_empty() {
                            p { class: "empty-state",
                                "You are not enrolled in any course yet. "
                                Link { to: Route::Courses {}, "Browse courses" }
                            }
                        }
                        ul {
                            class: "list",
                            for enrollment in data.enrollments.iter() {
                                li {
                                    key: "{enrollment.course_id}",
                                    Link {
                                        to: Route::CourseDetails { id: enrollment.course_id },
                                        "{enrollment.course_title}"
                                    }
                                    if let Some(code) = &enrollment.course_code {
                                        span { class: "text-muted", " {code}" }
                                    }
                                }
                            }
                        }
                    }
                    div {
                        class: "card",
                        h2 { class: "card-title", "Upcoming Quizzes" }
                        if data.quizzes.is_empty() {
                            p { class: "empty-state", "No open quizzes" }
                        }
                        ul {
                            class: "list",
                            for (quiz, course_title) in data.quizzes.iter().take(5) {
                                li {
                                    key: "{quiz.id}",
                                    div {
                                        class: "spread",
                                        div {
                                            div { "{quiz.title}" }
                                            div { class: "text-muted", "{course_title}" }
                                        }
                                        Link { to: Route::MyQuizzes {}, "View" }
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
            PageHeader {
                title: format!("Welcome back, {first_name}"),
                subtitle: "Here's what's happening in your courses",
            }
            {body}
        }
    }
}

async fn load_overview(api: &ApiClient, user_id: i64) -> Result<Overview, ApiError> {
    let enrollments = api.user_enrollments(user_id).await?;

    let now = chrono::Utc::now();
    let mut quizzes = Vec::new();
    for enrollment in &enrollments {
        match api.course_quizzes(enrollment.course_id).await {
            Ok(list) => quizzes.extend(
                list.into_iter()
                    .filter(|q| deadline(q).is_none_or(|until| until > now))
                    .map(|q| (q, enrollment.course_title.clone())),
            ),
            Err(e) => tracing::warn!(
                "Failed to load quizzes for course {}: {}",
                enrollment.course_id,
                e
            ),
        }
    }
    // dated quizzes first, soonest first
    quizzes.sort_by(|(a, _), (b, _)| match (deadline(a), deadline(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.title.cmp(&b.title),
    });

    let attendance = match api.attendance_summary(user_id, None).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!("Failed to load attendance summary: {}", e);
            AttendanceSummary::default()
        }
    };

    Ok(Overview {
        enrollments,
        quizzes,
        attendance,
    })
}

fn deadline(quiz: &Quiz) -> Option<DateTime<Utc>> {
    quiz.available_until.as_deref().and_then(parse_timestamp)
}
