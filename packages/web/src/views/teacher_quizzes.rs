use std::collections::HashMap;

use api::{
    average_percentage, format_local, ApiClient, ApiError, NewQuestion, QuestionDraft,
    QuestionType, Quiz, QuizAttempt, QuizDraft,
};
use dioxus::prelude::*;
use ui::components::{
    Button, ButtonVariant, ErrorBanner, FormField, Input, PageHeader, Spinner, SuccessBanner,
};
use ui::{platform, report_error, use_api, use_auth, ModalOverlay};

use super::course_picker::{taught_courses, CoursePicker};

/// Names of every student in the teacher's sections of one course.
async fn course_roster(api: &ApiClient, course_id: i64) -> Result<HashMap<i64, String>, ApiError> {
    let mut names = HashMap::new();
    for section in api.teacher_sections().await? {
        if section.course_id != course_id {
            continue;
        }
        for student in api.section_students(section.id).await? {
            names.insert(student.id, student.full_name);
        }
    }
    Ok(names)
}

fn student_label(names: &HashMap<i64, String>, attempt: &QuizAttempt) -> String {
    match attempt.student_id {
        Some(id) => names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Student #{}", id)),
        None => "Unknown student".to_string(),
    }
}

fn quiz_meta(quiz: &Quiz) -> String {
    let mut parts = vec![format!("{} questions", quiz.questions.len())];
    if let Some(minutes) = quiz.time_limit {
        parts.push(format!("{} min", minutes));
    }
    parts.push(format!("{} attempts allowed", quiz.max_attempts));
    if let Some(pass) = quiz.passing_score {
        parts.push(format!("pass {}%", pass));
    }
    parts.join(" - ")
}

#[component]
pub fn TeacherQuizzes() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut course = use_signal(|| None::<i64>);
    let mut creating = use_signal(|| false);
    let mut reviewing = use_signal(|| None::<Quiz>);
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

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

    let mut quizzes = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let selected = course();
            async move {
                match selected {
                    Some(id) => api
                        .course_quizzes(id)
                        .await
                        .map_err(|e| report_error(auth, &e)),
                    None => Ok(Vec::new()),
                }
            }
        }
    });

    let delete_quiz = move |quiz: Quiz| {
        if !platform::confirm(&format!("Delete quiz \"{}\"? Attempts are deleted too.", quiz.title)) {
            return;
        }
        let api = api.clone();
        spawn(async move {
            match api.delete_quiz(quiz.id).await {
                Ok(()) => {
                    tracing::info!("Deleted quiz {}", quiz.id);
                    error.set(None);
                    notice.set(Some(format!("Deleted \"{}\"", quiz.title)));
                    quizzes.restart();
                }
                Err(e) => error.set(Some(report_error(auth, &e))),
            }
        });
    };

    let picker = match &*sections.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "card empty-state", h3 { "No Courses" } p { "You have not been assigned any sections yet." } }
        },
        Some(Ok(list)) => rsx! { CoursePicker { courses: list.clone(), selected: course } },
    };

    let body = match &*quizzes.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(list)) if list.is_empty() => rsx! {
            div { class: "card empty-state", h3 { "No Quizzes" } p { "Create one to get started." } }
        },
        Some(Ok(list)) => rsx! {
            div {
                class: "stack",
                for quiz in list.iter().cloned() {
                    QuizCard {
                        key: "{quiz.id}",
                        quiz,
                        on_review: move |quiz: Quiz| reviewing.set(Some(quiz)),
                        on_delete: {
                            let mut delete_quiz = delete_quiz.clone();
                            move |quiz: Quiz| delete_quiz(quiz)
                        },
                    }
                }
            }
        },
    };

    let create_for = if creating() { course() } else { None };
    let attempts_for = reviewing().zip(course());

    rsx! {
        div {
            class: "page",
            PageHeader {
                title: "Quizzes",
                subtitle: "Build quizzes and review attempts",
                actions: rsx! {
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: course().is_none(),
                        onclick: move |_| creating.set(true),
                        "New Quiz"
                    }
                },
            }
            SuccessBanner { message: notice() }
            ErrorBanner { message: error() }
            {picker}
            {body}
            if let Some(course_id) = create_for {
                QuizBuilder {
                    course_id,
                    on_close: move |_| creating.set(false),
                    on_created: move |title: String| {
                        creating.set(false);
                        notice.set(Some(format!("Created \"{}\"", title)));
                        quizzes.restart();
                    },
                }
            }
            if let Some((quiz, course_id)) = attempts_for {
                AttemptsModal {
                    quiz,
                    course_id,
                    on_close: move |_| reviewing.set(None),
                }
            }
        }
    }
}

#[component]
fn QuizCard(quiz: Quiz, on_review: EventHandler<Quiz>, on_delete: EventHandler<Quiz>) -> Element {
    let meta = quiz_meta(&quiz);
    let until = quiz.available_until.as_deref().map(format_local);
    let review = quiz.clone();
    let delete = quiz.clone();

    rsx! {
        div {
            class: "card",
            div {
                class: "spread",
                div {
                    h3 { class: "card-title", "{quiz.title}" }
                    p { class: "text-muted", "{meta}" }
                    if let Some(until) = until {
                        p { class: "text-muted", "Open until {until}" }
                    }
                }
                div {
                    class: "row",
                    Button {
                        variant: ButtonVariant::Outline,
                        class: "btn-sm",
                        onclick: move |_| on_review.call(review.clone()),
                        "View Attempts"
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        class: "btn-sm",
                        onclick: move |_| on_delete.call(delete.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}

#[component]
fn QuizBuilder(course_id: i64, on_close: EventHandler<()>, on_created: EventHandler<String>) -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut details = use_signal(QuizDraft::default);
    let mut questions = use_signal(Vec::<NewQuestion>::new);
    let mut question = use_signal(QuestionDraft::default);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let add_question = move |_| {
        let order = questions.read().len() as i32;
        let finished = question.read().finish(order);
        match finished {
            Ok(q) => {
                questions.write().push(q);
                question.set(QuestionDraft::default());
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let handle_create = move |_| {
        let draft = details.read().clone();
        let body = match draft.to_request(course_id, questions()) {
            Ok(body) => body,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let api = api.clone();
        saving.set(true);
        error.set(None);
        spawn(async move {
            let result = api.create_quiz(&body).await;
            saving.set(false);
            match result {
                Ok(quiz) => {
                    tracing::info!("Created quiz {} with {} questions", quiz.id, body.questions.len());
                    on_created.call(quiz.title);
                }
                Err(e) => error.set(Some(report_error(auth, &e))),
            }
        });
    };

    let current = question();
    let is_mcq = current.question_type == QuestionType::Mcq;
    let option_slots: Vec<(usize, String)> = current.options.iter().cloned().enumerate().collect();
    let added: Vec<(usize, String, f64)> = questions
        .read()
        .iter()
        .enumerate()
        .map(|(i, q)| (i, q.question_text.clone(), q.points))
        .collect();
    let total: f64 = added.iter().map(|(_, _, points)| points).sum();
    let d = details();

    rsx! {
        ModalOverlay {
            title: "Create Quiz",
            on_close: move |_| on_close.call(()),
            div {
                class: "modal-body quiz-builder",
                ErrorBanner { message: error() }
                FormField {
                    label: "Title",
                    html_for: "quiz-title",
                    Input {
                        id: "quiz-title",
                        value: d.title.clone(),
                        oninput: move |evt: FormEvent| details.write().title = evt.value(),
                    }
                }
                div {
                    class: "form-field",
                    label { class: "form-label", r#for: "quiz-description", "Description" }
                    textarea {
                        id: "quiz-description",
                        class: "form-input",
                        rows: "3",
                        value: "{d.description}",
                        oninput: move |evt: FormEvent| details.write().description = evt.value(),
                    }
                }
                div {
                    class: "form-row",
                    FormField {
                        label: "Time Limit (min)",
                        html_for: "quiz-time",
                        Input {
                            id: "quiz-time",
                            r#type: "number",
                            placeholder: "Untimed",
                            value: d.time_limit.clone(),
                            oninput: move |evt: FormEvent| details.write().time_limit = evt.value(),
                        }
                    }
                    FormField {
                        label: "Max Attempts",
                        html_for: "quiz-attempts",
                        Input {
                            id: "quiz-attempts",
                            r#type: "number",
                            value: d.max_attempts.to_string(),
                            oninput: move |evt: FormEvent| details.write().max_attempts = evt.value().parse().unwrap_or(0),
                        }
                    }
                    FormField {
                        label: "Passing Score (%)",
                        html_for: "quiz-passing",
                        Input {
                            id: "quiz-passing",
                            r#type: "number",
                            value: d.passing_score.clone(),
                            oninput: move |evt: FormEvent| details.write().passing_score = evt.value(),
                        }
                    }
                }
                div {
                    class: "form-row",
                    FormField {
                        label: "Available From",
                        html_for: "quiz-from",
                        Input {
                            id: "quiz-from",
                            r#type: "datetime-local",
                            value: d.available_from.clone(),
                            oninput: move |evt: FormEvent| details.write().available_from = evt.value(),
                        }
                    }
                    FormField {
                        label: "Available Until",
                        html_for: "quiz-until",
                        Input {
                            id: "quiz-until",
                            r#type: "datetime-local",
                            value: d.available_until.clone(),
                            oninput: move |evt: FormEvent| details.write().available_until = evt.value(),
                        }
                    }
                }

                h3 { "Questions ({added.len()}, {total} points)" }
                ol {
                    class: "question-list",
                    for (i, text, points) in added {
                        li {
                            key: "{i}",
                            class: "spread",
                            span { "{text} ({points} pts)" }
                            button {
                                class: "btn btn-ghost btn-sm",
                                onclick: move |_| {
                                    let mut list = questions.write();
                                    list.remove(i);
                                    for (order, q) in list.iter_mut().enumerate() {
                                        q.order = order as i32;
                                    }
                                },
                                "Remove"
                            }
                        }
                    }
                }

                div {
                    class: "card question-editor",
                    div {
                        class: "form-row",
                        div {
                            class: "form-field",
                            label { class: "form-label", r#for: "question-type", "Type" }
                            select {
                                id: "question-type",
                                class: "form-input",
                                onchange: move |evt: FormEvent| {
                                    let mut q = question.write();
                                    q.question_type = if evt.value() == "true_false" {
                                        QuestionType::TrueFalse
                                    } else {
                                        QuestionType::Mcq
                                    };
                                    q.correct_answer.clear();
                                },
                                option { value: "mcq", selected: is_mcq, "Multiple choice" }
                                option { value: "true_false", selected: !is_mcq, "True / False" }
                            }
                        }
                        FormField {
                            label: "Points",
                            html_for: "question-points",
                            Input {
                                id: "question-points",
                                r#type: "number",
                                value: current.points.to_string(),
                                oninput: move |evt: FormEvent| question.write().points = evt.value().parse().unwrap_or(0.0),
                            }
                        }
                    }
                    div {
                        class: "form-field",
                        label { class: "form-label", r#for: "question-text", "Question" }
                        textarea {
                            id: "question-text",
                            class: "form-input",
                            rows: "2",
                            value: "{current.question_text}",
                            oninput: move |evt: FormEvent| question.write().question_text = evt.value(),
                        }
                    }
                    if is_mcq {
                        div {
                            class: "stack option-list",
                            for (i, text) in option_slots {
                                div {
                                    key: "{i}",
                                    class: "row",
                                    input {
                                        r#type: "radio",
                                        name: "correct-option",
                                        checked: current.correct_answer == i.to_string(),
                                        onchange: move |_| question.write().correct_answer = i.to_string(),
                                    }
                                    Input {
                                        placeholder: format!("Option {}", i + 1),
                                        value: text,
                                        oninput: move |evt: FormEvent| {
                                            if let Some(slot) = question.write().options.get_mut(i) {
                                                *slot = evt.value();
                                            }
                                        },
                                    }
                                }
                            }
                            button {
                                class: "btn btn-ghost btn-sm",
                                onclick: move |_| question.write().options.push(String::new()),
                                "Add option"
                            }
                        }
                    } else {
                        div {
                            class: "row",
                            for (value, text) in [("true", "True"), ("false", "False")] {
                                label {
                                    key: "{value}",
                                    class: "row",
                                    input {
                                        r#type: "radio",
                                        name: "correct-tf",
                                        checked: current.correct_answer == value,
                                        onchange: move |_| question.write().correct_answer = value.to_string(),
                                    }
                                    "{text}"
                                }
                            }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: add_question,
                        "Add Question"
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
                    onclick: handle_create,
                    if saving() { "Creating..." } else { "Create Quiz" }
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct AttemptRow {
    id: i64,
    student: String,
    attempt: String,
    score: String,
    result: &'static str,
    time_taken: String,
    submitted: String,
}

fn attempt_rows(names: &HashMap<i64, String>, attempts: &[QuizAttempt]) -> Vec<AttemptRow> {
    attempts
        .iter()
        .map(|a| AttemptRow {
            id: a.id,
            student: student_label(names, a),
            attempt: a.attempt_number.map(|n| n.to_string()).unwrap_or_else(|| "-".into()),
            score: match (a.score, a.max_score, a.percentage) {
                (Some(score), Some(max), Some(p)) => format!("{} / {} ({:.0}%)", score, max, p),
                (Some(score), Some(max), None) => format!("{} / {}", score, max),
                _ => "-".to_string(),
            },
            result: match a.passed {
                Some(true) => "Passed",
                Some(false) => "Failed",
                None if a.is_submitted() => "-",
                None => "In progress",
            },
            time_taken: a.time_taken(),
            submitted: a.submitted_at.as_deref().map(format_local).unwrap_or_default(),
        })
        .collect()
}

#[component]
fn AttemptsModal(quiz: Quiz, course_id: i64, on_close: EventHandler<()>) -> Element {
    let auth = use_auth();
    let api = use_api();
    let quiz_id = quiz.id;

    let data = use_resource(move || {
        let api = api.clone();
        async move {
            let attempts = api
                .quiz_attempts(quiz_id)
                .await
                .map_err(|e| report_error(auth, &e))?;
            let names = course_roster(&api, course_id).await.unwrap_or_else(|e| {
                tracing::warn!("Failed to load student names for course {}: {}", course_id, e);
                HashMap::new()
            });
            Ok::<_, String>((names, attempts))
        }
    });

    let body = match &*data.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok((_, attempts))) if attempts.is_empty() => rsx! {
            div { class: "empty-state", h3 { "No Attempts Yet" } p { "No student has started this quiz." } }
        },
        Some(Ok((names, attempts))) => {
            let rows = attempt_rows(names, attempts);
            let submitted = attempts.iter().filter(|a| a.is_submitted()).count();
            let average = average_percentage(attempts)
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_else(|| "-".to_string());
            rsx! {
                div {
                    class: "row text-muted",
                    span { "{attempts.len()} attempts" }
                    span { "{submitted} submitted" }
                    span { "Average {average}" }
                }
                div {
                    class: "table-wrap",
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Student" }
                                th { "Attempt" }
                                th { "Score" }
                                th { "Result" }
                                th { "Time" }
                                th { "Submitted" }
                            }
                        }
                        tbody {
                            for row in rows {
                                tr {
                                    key: "{row.id}",
                                    td { "{row.student}" }
                                    td { "{row.attempt}" }
                                    td { "{row.score}" }
                                    td { "{row.result}" }
                                    td { "{row.time_taken}" }
                                    td { "{row.submitted}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        ModalOverlay {
            title: format!("Attempts: {}", quiz.title),
            on_close: move |_| on_close.call(()),
            div { class: "modal-body", {body} }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(student_id: Option<i64>, submitted: bool, passed: Option<bool>) -> QuizAttempt {
        QuizAttempt {
            id: 1,
            quiz_id: Some(2),
            student_id,
            score: submitted.then_some(4.0),
            max_score: submitted.then_some(5.0),
            percentage: submitted.then_some(80.0),
            started_at: Some("2024-05-01T10:00:00".into()),
            submitted_at: submitted.then(|| "2024-05-01T10:12:00".to_string()),
            attempt_number: Some(1),
            passed,
        }
    }

    #[test]
    fn test_student_label_falls_back_to_id() {
        let names = HashMap::from([(7, "Ann Lee".to_string())]);
        assert_eq!(student_label(&names, &attempt(Some(7), true, None)), "Ann Lee");
        assert_eq!(student_label(&names, &attempt(Some(8), true, None)), "Student #8");
        assert_eq!(student_label(&names, &attempt(None, true, None)), "Unknown student");
    }

    #[test]
    fn test_attempt_rows() {
        let names = HashMap::new();
        let rows = attempt_rows(
            &names,
            &[attempt(Some(1), true, Some(true)), attempt(Some(2), false, None)],
        );
        assert_eq!(rows[0].score, "4 / 5 (80%)");
        assert_eq!(rows[0].result, "Passed");
        assert_eq!(rows[0].time_taken, "12 min");
        assert_eq!(rows[1].score, "-");
        assert_eq!(rows[1].result, "In progress");
        assert_eq!(rows[1].time_taken, "In progress");
    }

    #[test]
    fn test_quiz_meta() {
        let quiz = Quiz {
            id: 1,
            title: "Q".into(),
            description: None,
            course_id: Some(3),
            time_limit: Some(20),
            max_attempts: 2,
            passing_score: Some(70.0),
            available_until: None,
            questions: Vec::new(),
        };
        assert_eq!(quiz_meta(&quiz), "0 questions - 20 min - 2 attempts allowed - pass 70%");
    }
}
