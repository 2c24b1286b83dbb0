use api::{grade_band, ApiClient, ApiError, CourseGrades};
use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner, StatCard};
use ui::{report_error, use_api, use_auth};

async fn load_grades(api: &ApiClient, user_id: i64) -> Result<Vec<CourseGrades>, ApiError> {
    let mut courses = Vec::new();
    for enrollment in api.user_enrollments(user_id).await? {
        let mut assignments = Vec::new();
        match api.course_assignments(enrollment.course_id).await {
            Ok(list) => {
                for assignment in list {
                    let submission = api.my_submission(assignment.id).await.unwrap_or_else(|e| {
                        tracing::warn!("Failed to load submission for assignment {}: {}", assignment.id, e);
                        None
                    });
                    assignments.push((assignment, submission));
                }
            }
            Err(e) => tracing::warn!("Failed to load assignments for {}: {}", enrollment.course_title, e),
        }

        let mut quizzes = Vec::new();
        match api.course_quizzes(enrollment.course_id).await {
            Ok(list) => {
                for quiz in list {
                    let attempts = api.my_attempts(quiz.id).await.unwrap_or_else(|e| {
                        tracing::warn!("Failed to load attempts for quiz {}: {}", quiz.id, e);
                        Vec::new()
                    });
                    quizzes.push((quiz, attempts));
                }
            }
            Err(e) => tracing::warn!("Failed to load quizzes for {}: {}", enrollment.course_title, e),
        }

        courses.push(CourseGrades::collect(&enrollment, &assignments, &quizzes));
    }
    Ok(courses)
}

/// Mean of the course averages that have any graded work.
fn overall_average(courses: &[CourseGrades]) -> Option<u32> {
    let averages: Vec<u32> = courses.iter().filter_map(CourseGrades::overall).collect();
    if averages.is_empty() {
        return None;
    }
    let sum: u32 = averages.iter().sum();
    Some((sum as f64 / averages.len() as f64).round() as u32)
}

fn percent_label(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |p| format!("{}%", p))
}

#[component]
pub fn MyGrades() -> Element {
    let auth = use_auth();
    let api = use_api();
    let user_id = auth().user.map(|u| u.id).unwrap_or_default();

    let grades = use_resource(move || {
        let api = api.clone();
        async move {
            load_grades(&api, user_id)
                .await
                .map_err(|e| report_error(auth, &e))
        }
    });

    let body = match &*grades.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(courses)) if courses.is_empty() => rsx! {
            div { class: "card empty-state", h3 { "No Courses" } p { "Enroll in a course to see grades here." } }
        },
        Some(Ok(courses)) => {
            let overall = percent_label(overall_average(courses));
            let graded_items: usize = courses
                .iter()
                .map(|c| c.assignments.len() + c.quizzes.len())
                .sum();
            rsx! {
                div {
                    class: "grid-3",
                    StatCard { label: "Overall Average", value: overall }
                    StatCard { label: "Courses", value: courses.len().to_string() }
                    StatCard { label: "Graded Items", value: graded_items.to_string() }
                }
                div {
                    class: "stack",
                    for course in courses.iter().cloned() {
                        CourseGradeCard { key: "{course.course_id}", course }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page",
            PageHeader { title: "My Grades", subtitle: "Graded assignments and best quiz scores" }
            {body}
        }
    }
}

#[component]
fn CourseGradeCard(course: CourseGrades) -> Element {
    let overall = course.overall();
    let overall_label = percent_label(overall);
    let band = overall
        .map(|p| grade_band(f64::from(p), 100.0).css_class())
        .unwrap_or("text-muted");

    rsx! {
        div {
            class: "card",
            div {
                class: "spread",
                div {
                    span { class: "badge badge-primary", "{course.course_code}" }
                    h3 { class: "card-title", "{course.course_title}" }
                }
                strong { class: band, "{overall_label}" }
            }
            if course.is_empty() {
                p { class: "text-muted", "Nothing graded yet." }
            } else {
                div {
                    class: "table-wrap",
                    table {
                        class: "table",
                        thead {
                            tr { th { "Item" } th { "Type" } th { "Score" } th { "Percent" } }
                        }
                        tbody {
                            for (i, a) in course.assignments.iter().enumerate() {
                                tr {
                                    key: "a{i}",
                                    td { "{a.title}" }
                                    td { "Assignment" }
                                    td { "{a.grade} / {a.max_points}" }
                                    td { "{a.percentage}%" }
                                }
                            }
                            for (i, q) in course.quizzes.iter().enumerate() {
                                tr {
                                    key: "q{i}",
                                    td { "{q.title}" }
                                    td { "Quiz" }
                                    td { "{q.score} / {q.max_score}" }
                                    td { "{q.percentage}%" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{AssignmentGrade, QuizGrade};

    fn course(assignment_pct: &[u32], quiz_pct: &[u32]) -> CourseGrades {
        CourseGrades {
            course_id: 1,
            course_title: "Maths".into(),
            course_code: "M1".into(),
            assignments: assignment_pct
                .iter()
                .map(|p| AssignmentGrade {
                    title: "A".into(),
                    max_points: 100,
                    grade: f64::from(*p),
                    percentage: *p,
                })
                .collect(),
            quizzes: quiz_pct
                .iter()
                .map(|p| QuizGrade {
                    title: "Q".into(),
                    score: f64::from(*p),
                    max_score: 100.0,
                    percentage: *p,
                })
                .collect(),
        }
    }

    #[test]
    fn test_overall_skips_ungraded_courses() {
        let courses = vec![course(&[90], &[70]), course(&[], &[]), course(&[60], &[])];
        // (80 + 60) / 2
        assert_eq!(overall_average(&courses), Some(70));
        assert_eq!(overall_average(&[course(&[], &[])]), None);
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(Some(81)), "81%");
        assert_eq!(percent_label(None), "-");
    }
}
