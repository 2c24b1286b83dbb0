use api::{
    assignment_status, due_label, format_local, validate_submission, ApiClient, ApiError,
    Assignment, AssignmentStatus, Submission,
};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, PageHeader, Spinner, SuccessBanner};
use ui::{render_markdown, report_error, use_api, use_auth, ModalOverlay};

#[derive(Debug, Clone, PartialEq)]
struct AssignmentRow {
    assignment: Assignment,
    course_title: String,
    submission: Option<Submission>,
    status: AssignmentStatus,
}

impl AssignmentRow {
    /// A graded submission is final; anything else can be handed in again.
    fn can_submit(&self) -> bool {
        self.status != AssignmentStatus::Graded
    }
}

async fn load_rows(api: &ApiClient, user_id: i64) -> Result<Vec<AssignmentRow>, ApiError> {
    let now = chrono::Utc::now();
    let mut rows = Vec::new();
    for enrollment in api.user_enrollments(user_id).await? {
        let assignments = match api.course_assignments(enrollment.course_id).await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Failed to load assignments for {}: {}", enrollment.course_title, e);
                continue;
            }
        };
        for assignment in assignments {
            let submission = api.my_submission(assignment.id).await.unwrap_or_else(|e| {
                tracing::warn!("Failed to load submission for assignment {}: {}", assignment.id, e);
                None
            });
            let status = assignment_status(&assignment, submission.as_ref(), now);
            rows.push(AssignmentRow {
                assignment,
                course_title: enrollment.course_title.clone(),
                submission,
                status,
            });
        }
    }
    rows.sort_by(|a, b| a.assignment.due_date.cmp(&b.assignment.due_date));
    Ok(rows)
}

fn tab_counts(rows: &[AssignmentRow]) -> Vec<(Option<AssignmentStatus>, String)> {
    std::iter::once(None)
        .chain(AssignmentStatus::ALL.into_iter().map(Some))
        .map(|option| {
            let count = rows
                .iter()
                .filter(|r| option.is_none_or(|s| r.status == s))
                .count();
            (option, format!("{} ({})", option.map_or("All", |s| s.label()), count))
        })
        .collect()
}

#[component]
pub fn MyAssignments() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut filter = use_signal(|| None::<AssignmentStatus>);
    let mut submitting_to = use_signal(|| None::<AssignmentRow>);
    let mut notice = use_signal(|| None::<String>);
    let user_id = auth().user.map(|u| u.id).unwrap_or_default();

    let mut rows = use_resource(move || {
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
            let now = chrono::Utc::now();
            let tabs = tab_counts(all);
            let visible: Vec<AssignmentRow> = all
                .iter()
                .filter(|r| selected.is_none_or(|s| r.status == s))
                .cloned()
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
                    div { class: "card empty-state", h3 { "No Assignments" } p { "Nothing to show here." } }
                }
                div {
                    class: "stack",
                    for row in visible {
                        AssignmentCard {
                            key: "{row.assignment.id}",
                            due: due_label(&row.assignment.due_date, now),
                            row: row.clone(),
                            on_submit: move |row: AssignmentRow| submitting_to.set(Some(row)),
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page",
            PageHeader { title: "My Assignments", subtitle: "Assignments from your enrolled courses" }
            SuccessBanner { message: notice() }
            {body}
            if let Some(row) = submitting_to() {
                SubmitModal {
                    row,
                    on_close: move |_| submitting_to.set(None),
                    on_submitted: move |title: String| {
                        submitting_to.set(None);
                        notice.set(Some(format!("Submitted \"{}\"", title)));
                        rows.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn AssignmentCard(row: AssignmentRow, due: String, on_submit: EventHandler<AssignmentRow>) -> Element {
    let description = (!row.assignment.description.is_empty())
        .then(|| render_markdown(&row.assignment.description));
    let submitted_at = row
        .submission
        .as_ref()
        .and_then(|s| s.submitted_at.as_deref())
        .map(format_local);
    let grade = row.submission.as_ref().and_then(|s| {
        let grade = s.grade?;
        let percent = s.percentage(row.assignment.max_points).unwrap_or_default();
        Some(format!("{} / {} ({}%)", grade, row.assignment.max_points, percent))
    });
    let feedback = row.submission.as_ref().and_then(|s| s.feedback.clone());
    let action = if row.submission.is_some() { "Resubmit" } else { "Submit" };
    let can_submit = row.can_submit();
    let submit_row = row.clone();

    rsx! {
        div {
            class: "card",
            div {
                class: "spread",
                div {
                    h3 { class: "card-title", "{row.assignment.title}" }
                    p { class: "text-muted", "{row.course_title}" }
                }
                span { class: row.status.css_class(), "{row.status.label()}" }
            }
            if let Some(html) = description {
                div { class: "markdown-body", dangerous_inner_html: "{html}" }
            }
            div {
                class: "row text-muted",
                span { "{due}" }
                span { "{row.assignment.max_points} points" }
                if let Some(at) = submitted_at {
                    span { "Submitted {at}" }
                }
            }
            if let Some(grade) = grade {
                div {
                    class: "assignment-grade",
                    strong { "Grade: {grade}" }
                    if let Some(feedback) = feedback {
                        p { class: "assignment-feedback", "{feedback}" }
                    }
                }
            }
            if can_submit {
                div {
                    class: "row",
                    Button {
                        variant: ButtonVariant::Primary,
                        class: "btn-sm",
                        onclick: move |_| on_submit.call(submit_row.clone()),
                        "{action}"
                    }
                }
            }
        }
    }
}

#[component]
fn SubmitModal(row: AssignmentRow, on_close: EventHandler<()>, on_submitted: EventHandler<String>) -> Element {
    let auth = use_auth();
    let api = use_api();
    let previous = row.submission.as_ref().map(|s| s.content.clone()).unwrap_or_default();
    let mut content = use_signal(move || previous);
    let mut error = use_signal(|| None::<String>);
    let mut sending = use_signal(|| false);
    let assignment_id = row.assignment.id;
    let title = row.assignment.title.clone();

    let handle_submit = move |_| {
        let text = content();
        if let Err(e) = validate_submission(&text) {
            error.set(Some(e.to_string()));
            return;
        }
        let api = api.clone();
        let title = title.clone();
        sending.set(true);
        error.set(None);
        spawn(async move {
            let result = api.submit_assignment(assignment_id, &text).await;
            sending.set(false);
            match result {
                Ok(_) => {
                    tracing::info!("Submitted assignment {}", assignment_id);
                    on_submitted.call(title);
                }
                Err(e) => error.set(Some(report_error(auth, &e))),
            }
        });
    };

    rsx! {
        ModalOverlay {
            title: format!("Submit: {}", row.assignment.title),
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body",
                ErrorBanner { message: error() }
                div {
                    class: "form-field",
                    label { class: "form-label", r#for: "submission-content", "Your answer" }
                    textarea {
                        id: "submission-content",
                        class: "form-input",
                        rows: "10",
                        value: "{content}",
                        oninput: move |evt: FormEvent| content.set(evt.value()),
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
                    disabled: sending(),
                    onclick: handle_submit,
                    if sending() { "Submitting..." } else { "Submit" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: AssignmentStatus) -> AssignmentRow {
        AssignmentRow {
            assignment: Assignment {
                id: 1,
                course_id: 2,
                title: "Essay".into(),
                description: String::new(),
                due_date: "2024-05-01T00:00:00".into(),
                max_points: 10,
            },
            course_title: "English".into(),
            submission: None,
            status,
        }
    }

    #[test]
    fn test_tab_counts() {
        let rows = vec![
            row(AssignmentStatus::Pending),
            row(AssignmentStatus::Pending),
            row(AssignmentStatus::Graded),
        ];
        let tabs = tab_counts(&rows);
        assert_eq!(tabs[0], (None, "All (3)".to_string()));
        assert_eq!(tabs[1], (Some(AssignmentStatus::Pending), "Pending (2)".to_string()));
        assert!(tabs.contains(&(Some(AssignmentStatus::Late), "Late (0)".to_string())));
    }

    #[test]
    fn test_graded_work_is_closed() {
        assert!(row(AssignmentStatus::Late).can_submit());
        assert!(row(AssignmentStatus::Submitted).can_submit());
        assert!(!row(AssignmentStatus::Graded).can_submit());
    }
}
