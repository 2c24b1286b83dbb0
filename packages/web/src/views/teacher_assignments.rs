use api::{
    due_label, format_local, local_input_to_utc, parse_grade, validate_assignment, ApiClient,
    ApiError, Assignment, GradeSubmission, NewAssignment, Submission,
};
use dioxus::prelude::*;
use ui::components::{
    Button, ButtonVariant, ErrorBanner, FormField, Input, PageHeader, Spinner, SuccessBanner,
};
use ui::{report_error, use_api, use_auth, ModalOverlay, RichTextEditor};

use super::course_picker::{taught_courses, CoursePicker};

#[derive(Debug, Clone, PartialEq)]
struct AssignmentSummary {
    assignment: Assignment,
    submissions: Vec<Submission>,
}

impl AssignmentSummary {
    fn graded(&self) -> usize {
        self.submissions.iter().filter(|s| s.is_graded()).count()
    }

    fn counts_label(&self) -> String {
        let total = self.submissions.len();
        let graded = self.graded();
        format!("{} submitted, {} graded, {} to grade", total, graded, total - graded)
    }
}

async fn load_assignments(api: &ApiClient, course_id: i64) -> Result<Vec<AssignmentSummary>, ApiError> {
    let mut list = Vec::new();
    for assignment in api.course_assignments(course_id).await? {
        let submissions = api
            .assignment_submissions(assignment.id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load submissions for assignment {}: {}", assignment.id, e);
                Vec::new()
            });
        list.push(AssignmentSummary { assignment, submissions });
    }
    Ok(list)
}

/// Ungraded work first, then by hand-in time.
fn grading_order(submissions: &mut [Submission]) {
    submissions.sort_by(|a, b| {
        a.is_graded()
            .cmp(&b.is_graded())
            .then_with(|| a.submitted_at.cmp(&b.submitted_at))
    });
}

#[component]
pub fn TeacherAssignments() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut course = use_signal(|| None::<i64>);
    let mut creating = use_signal(|| false);
    let mut reviewing = use_signal(|| None::<i64>);
    let mut notice = use_signal(|| None::<String>);

    let sections = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let courses = taught_courses(
                    &api.teacher_sections()
                        .await
                        .map_err(|e| report_error(auth, &e))?,
                );
                if course.peek().is_none() {
                    course.set(courses.first().map(|c| c.id));
                }
                Ok::<_, String>(courses)
            }
        }
    });

    let mut assignments = use_resource(move || {
        let api = api.clone();
        let selected = course();
        async move {
            match selected {
                Some(id) => load_assignments(&api, id)
                    .await
                    .map_err(|e| report_error(auth, &e)),
                None => Ok(Vec::new()),
            }
        }
    });

    let picker = match &*sections.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "card empty-state", h3 { "No Courses" } p { "You have not been assigned any sections yet." } }
        },
        Some(Ok(list)) => rsx! { CoursePicker { courses: list.clone(), selected: course } },
    };

    let now = chrono::Utc::now();
    let body = match &*assignments.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "card empty-state", h3 { "No Assignments" } p { "Create one to get started." } }
        },
        Some(Ok(list)) => {
            let cards: Vec<(i64, String, String, String)> = list
                .iter()
                .map(|summary| {
                    let a = &summary.assignment;
                    let meta = format!("{} - {} points", due_label(&a.due_date, now), a.max_points);
                    (a.id, a.title.clone(), meta, summary.counts_label())
                })
                .collect();
            rsx! {
                div {
                    class: "stack",
                    for (id, title, meta, counts) in cards {
                        div {
                            key: "{id}",
                            class: "card",
                            div {
                                class: "spread",
                                div {
                                    h3 { class: "card-title", "{title}" }
                                    p { class: "text-muted", "{meta}" }
                                }
                                Button {
                                    variant: ButtonVariant::Outline,
                                    class: "btn-sm",
                                    onclick: move |_| reviewing.set(Some(id)),
                                    "View Submissions"
                                }
                            }
                            p { class: "text-muted", "{counts}" }
                        }
                    }
                }
            }
        }
    };

    let review = reviewing().and_then(|id| {
        assignments
            .read()
            .as_ref()
            .and_then(|r| r.as_ref().ok())
            .and_then(|list| list.iter().find(|s| s.assignment.id == id).cloned())
    });

    let create_for = if creating() { course() } else { None };

    rsx! {
        div {
            class: "page",
            PageHeader {
                title: "Assignments",
                subtitle: "Create assignments and grade submissions",
                actions: rsx! {
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: course().is_none(),
                        onclick: move |_| creating.set(true),
                        "New Assignment"
                    }
                },
            }
            SuccessBanner { message: notice() }
            {picker}
            {body}
            if let Some(course_id) = create_for {
                CreateAssignmentModal {
                    course_id,
                    on_close: move |_| creating.set(false),
                    on_created: move |title: String| {
                        creating.set(false);
                        notice.set(Some(format!("Created \"{}\"", title)));
                        assignments.restart();
                    },
                }
            }
            if let Some(summary) = review {
                SubmissionsModal {
                    summary,
                    on_close: move |_| reviewing.set(None),
                    on_graded: move |_| assignments.restart(),
                }
            }
        }
    }
}

#[component]
fn CreateAssignmentModal(course_id: i64, on_close: EventHandler<()>, on_created: EventHandler<String>) -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut due = use_signal(String::new);
    let mut max_points = use_signal(|| 100u32);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |_| {
        if let Err(e) = validate_assignment(&title(), &description(), &due(), max_points()) {
            error.set(Some(e.to_string()));
            return;
        }
        let Some(due_date) = local_input_to_utc(&due()) else {
            error.set(Some("Enter a valid due date".to_string()));
            return;
        };
        let body = NewAssignment {
            course_id,
            title: title().trim().to_string(),
            description: description(),
            due_date,
            max_points: max_points(),
        };
        let api = api.clone();
        saving.set(true);
        error.set(None);
        spawn(async move {
            let result = api.create_assignment(&body).await;
            saving.set(false);
            match result {
                Ok(created) => {
                    tracing::info!("Created assignment {}", created.id);
                    on_created.call(created.title);
                }
                Err(e) => error.set(Some(report_error(auth, &e))),
            }
        });
    };

    rsx! {
        ModalOverlay {
            title: "Create Assignment",
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                ErrorBanner { message: error() }
                FormField {
                    label: "Title",
                    html_for: "assignment-title",
                    Input {
                        id: "assignment-title",
                        value: title(),
                        oninput: move |evt: FormEvent| title.set(evt.value()),
                    }
                }
                div {
                    class: "form-field",
                    span { class: "form-label", "Description" }
                    RichTextEditor {
                        content: description(),
                        placeholder: "Instructions for students...",
                        on_change: move |markdown: String| description.set(markdown),
                    }
                }
                div {
                    class: "form-row",
                    FormField {
                        label: "Due",
                        html_for: "assignment-due",
                        Input {
                            id: "assignment-due",
                            r#type: "datetime-local",
                            value: due(),
                            oninput: move |evt: FormEvent| due.set(evt.value()),
                        }
                    }
                    FormField {
                        label: "Max Points",
                        html_for: "assignment-points",
                        Input {
                            id: "assignment-points",
                            r#type: "number",
                            value: max_points().to_string(),
                            oninput: move |evt: FormEvent| max_points.set(evt.value().parse().unwrap_or(0)),
                        }
                    }
                }
            }
            div {
                class: "modal-footer",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: saving(),
                    onclick: handle_submit,
                    if saving() { "Creating..." } else { "Create Assignment" }
                }
            }
        }
    }
}

#[component]
fn SubmissionsModal(summary: AssignmentSummary, on_close: EventHandler<()>, on_graded: EventHandler<()>) -> Element {
    let mut grading = use_signal(|| None::<Submission>);
    let max_points = summary.assignment.max_points;
    let mut submissions = summary.submissions.clone();
    grading_order(&mut submissions);

    rsx! {
        ModalOverlay {
            title: summary.assignment.title.clone(),
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                p { class: "text-muted", "{summary.counts_label()}" }
                if submissions.is_empty() {
                    div { class: "empty-state", h3 { "No Submissions Yet" } p { "Students have not handed anything in." } }
                }
                div {
                    class: "stack",
                    for submission in submissions {
                        SubmissionRow {
                            key: "{submission.id}",
                            max_points,
                            submission: submission.clone(),
                            on_grade: move |s: Submission| grading.set(Some(s)),
                        }
                    }
                }
            }
            if let Some(submission) = grading() {
                GradeForm {
                    submission,
                    max_points,
                    on_close: move |_| grading.set(None),
                    on_saved: move |_| {
                        grading.set(None);
                        on_graded.call(());
                    },
                }
            }
        }
    }
}

#[component]
fn SubmissionRow(submission: Submission, max_points: u32, on_grade: EventHandler<Submission>) -> Element {
    let name = submission.student_name();
    let email = submission.student.as_ref().map(|s| s.email.clone()).unwrap_or_default();
    let at = submission.submitted_at.as_deref().map(format_local).unwrap_or_default();
    let grade = submission
        .grade
        .map(|g| format!("{} / {}", g, max_points))
        .unwrap_or_else(|| "Not graded".to_string());
    let action = if submission.is_graded() { "Regrade" } else { "Grade" };
    let picked = submission.clone();

    rsx! {
        div {
            class: "card submission-row",
            div {
                class: "spread",
                div {
                    strong { "{name}" }
                    p { class: "text-muted", "{email} {at}" }
                }
                div {
                    class: "row",
                    span { class: "text-muted", "{grade}" }
                    Button {
                        variant: ButtonVariant::Primary,
                        class: "btn-sm",
                        onclick: move |_| on_grade.call(picked.clone()),
                        "{action}"
                    }
                }
            }
            pre { class: "submission-content", "{submission.content}" }
            if let Some(feedback) = submission.feedback.clone() {
                p { class: "assignment-feedback", "{feedback}" }
            }
        }
    }
}

#[component]
fn GradeForm(submission: Submission, max_points: u32, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let auth = use_auth();
    let api = use_api();
    let start_grade = submission.grade.map(|g| g.to_string()).unwrap_or_default();
    let start_feedback = submission.feedback.clone().unwrap_or_default();
    let mut grade = use_signal(move || start_grade);
    let mut feedback = use_signal(move || start_feedback);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);
    let submission_id = submission.id;

    let handle_save = move |_| {
        let value = match parse_grade(&grade(), max_points) {
            Ok(value) => value,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let body = GradeSubmission {
            grade: value,
            feedback: feedback(),
        };
        let api = api.clone();
        saving.set(true);
        error.set(None);
        spawn(async move {
            let result = api.grade_submission(submission_id, &body).await;
            saving.set(false);
            match result {
                Ok(_) => {
                    tracing::info!("Graded submission {}", submission_id);
                    on_saved.call(());
                }
                Err(e) => error.set(Some(report_error(auth, &e))),
            }
        });
    };

    rsx! {
        div {
            class: "card grade-form",
            h3 { class: "card-title", "Grade {submission.student_name()}" }
            ErrorBanner { message: error() }
            FormField {
                label: format!("Grade (0 - {})", max_points),
                html_for: "grade-value",
                Input {
                    id: "grade-value",
                    r#type: "number",
                    value: grade(),
                    oninput: move |evt: FormEvent| grade.set(evt.value()),
                }
            }
            div {
                class: "form-field",
                label { class: "form-label", r#for: "grade-feedback", "Feedback" }
                textarea {
                    id: "grade-feedback",
                    class: "form-input",
                    rows: "4",
                    value: "{feedback}",
                    oninput: move |evt: FormEvent| feedback.set(evt.value()),
                }
            }
            div {
                class: "row",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: saving(),
                    onclick: handle_save,
                    if saving() { "Saving..." } else { "Save Grade" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(id: i64, at: &str, grade: Option<f64>) -> Submission {
        Submission {
            id,
            assignment_id: 1,
            student_id: id,
            content: "answer".into(),
            file_path: None,
            submitted_at: Some(at.into()),
            grade,
            feedback: None,
            student: None,
        }
    }

    #[test]
    fn test_ungraded_first() {
        let mut list = vec![
            submission(1, "2024-05-01T10:00:00", Some(5.0)),
            submission(2, "2024-05-02T10:00:00", None),
            submission(3, "2024-05-01T09:00:00", None),
        ];
        grading_order(&mut list);
        let ids: Vec<i64> = list.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_counts_label() {
        let summary = AssignmentSummary {
            assignment: Assignment {
                id: 1,
                course_id: 1,
                title: "Lab".into(),
                description: String::new(),
                due_date: "2024-05-01T00:00:00".into(),
                max_points: 10,
            },
            submissions: vec![
                submission(1, "2024-05-01T00:00:00", Some(8.0)),
                submission(2, "2024-05-01T00:00:00", None),
            ],
        };
        assert_eq!(summary.counts_label(), "2 submitted, 1 graded, 1 to grade");
    }
}
