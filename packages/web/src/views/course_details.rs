use api::{ApiClient, ApiError, Course, Quiz, Role};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, Spinner, SuccessBanner};
use ui::icons::{FaArrowLeft, FaTableList};
use ui::{render_markdown, report_error, use_api, use_auth, Icon};

use crate::Route;

#[derive(Debug, Clone, PartialEq)]
struct Details {
    course: Course,
    quizzes: Vec<Quiz>,
    enrolled: bool,
}

async fn load_details(api: &ApiClient, id: i64, user_id: Option<i64>) -> Result<Details, ApiError> {
    let course = api.get_course(id).await?;
    let quizzes = match api.course_quizzes(id).await {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!("Failed to load quizzes for course {}: {}", id, e);
            Vec::new()
        }
    };
    let enrolled = match user_id {
        Some(uid) => api
            .user_enrollments(uid)
            .await?
            .iter()
            .any(|e| e.course_id == id),
        None => false,
    };
    Ok(Details {
        course,
        quizzes,
        enrolled,
    })
}

#[component]
pub fn CourseDetails(id: i64) -> Element {
    let auth = use_auth();
    let api = use_api();
    let nav = use_navigator();
    let role = auth().role();
    let is_student = role == Some(Role::Student);
    let can_grade = role.is_some_and(|r| r.can_teach());
    let mut action_error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let mut details = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let student_id = auth.peek().user.as_ref().filter(|u| u.role == Role::Student).map(|u| u.id);
            async move {
                load_details(&api, id, student_id)
                    .await
                    .map_err(|e| report_error(auth, &e))
            }
        }
    });

    let toggle_enrollment = move |enrolled: bool| {
        let api = api.clone();
        busy.set(true);
        action_error.set(None);
        notice.set(None);
        spawn(async move {
            let result = if enrolled {
                api.unenroll(id).await
            } else {
                api.enroll(id).await
            };
            busy.set(false);
            match result {
                Ok(()) => {
                    notice.set(Some(if enrolled {
                        "You have left this course".to_string()
                    } else {
                        "Enrolled successfully".to_string()
                    }));
                    details.restart();
                }
                Err(e) => action_error.set(Some(report_error(auth, &e))),
            }
        });
    };

    let body = match &*details.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! {
            div {
                class: "card empty-state",
                h2 { "Course Not Found" }
                p { "{e}" }
                Button {
                    variant: ButtonVariant::Primary,
                    onclick: move |_| {
                        nav.push(Route::Courses {});
                    },
                    "Back to courses"
                }
            }
        },
        Some(Ok(data)) => {
            let enrolled = data.enrolled;
            let description = data.course.description.as_deref().map(render_markdown);
            let enroll_variant = if enrolled { ButtonVariant::Outline } else { ButtonVariant::Primary };
            rsx! {
                div {
                    class: "card",
                    div {
                        class: "spread",
                        div {
                            span { class: "badge badge-primary", "{data.course.code_or_blank()}" }
                            h1 { class: "page-title", "{data.course.title}" }
                            if let Some(hours) = data.course.credit_hours {
                                p { class: "text-muted", "{hours} credit hours" }
                            }
                        }
                        if is_student {
                            Button {
                                variant: enroll_variant,
                                disabled: busy(),
                                onclick: {
                                    let mut toggle_enrollment = toggle_enrollment.clone();
                                    move |_| toggle_enrollment(enrolled)
                                },
                                if enrolled { "Leave course" } else { "Enroll" }
                            }
                        }
                        if can_grade {
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: move |_| {
                                    nav.push(Route::CourseGradebook { course_id: id });
                                },
                                Icon { icon: FaTableList, width: 12, height: 12 }
                                "Gradebook"
                            }
                        }
                    }
                    if let Some(html) = description {
                        div { class: "markdown-body course-description", dangerous_inner_html: "{html}" }
                    } else {
                        p { class: "text-muted", "No description provided." }
                    }
                }
                div {
                    class: "card section-gap",
                    h2 { class: "card-title", "Quizzes" }
                    if data.quizzes.is_empty() {
                        p { class: "empty-state", "No quizzes for this course yet" }
                    }
                    ul {
                        class: "list",
                        for quiz in data.quizzes.iter() {
                            li {
                                key: "{quiz.id}",
                                div {
                                    class: "spread",
                                    div {
                                        div { "{quiz.title}" }
                                        div {
                                            class: "text-muted",
                                            if let Some(minutes) = quiz.time_limit {
                                                "{minutes} min · {quiz.questions.len()} questions"
                                            } else {
                                                "Untimed · {quiz.questions.len()} questions"
                                            }
                                        }
                                    }
                                    if is_student && enrolled {
                                        Link { to: Route::TakeQuiz { quiz_id: quiz.id }, "Take quiz" }
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
            button {
                class: "link-button back-link",
                onclick: move |_| {
                    nav.push(Route::Courses {});
                },
                Icon { icon: FaArrowLeft, width: 12, height: 12 }
                " Back to courses"
            }
            ErrorBanner { message: action_error() }
            SuccessBanner { message: notice() }
            {body}
        }
    }
}
