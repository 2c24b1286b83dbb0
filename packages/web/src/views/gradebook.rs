use api::{grade_band, Gradebook};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, PageHeader, Spinner, StatCard};
use ui::icons::FaFileCsv;
use ui::{platform, report_error, use_api, use_auth, Icon};

use crate::Route;

#[derive(Debug, Clone, PartialEq)]
struct GradeRow {
    student_id: i64,
    name: String,
    email: String,
    /// Display text and band class per assignment column.
    cells: Vec<(String, &'static str)>,
    total: String,
    percentage: String,
    band: &'static str,
}

fn grade_rows(gradebook: &Gradebook) -> Vec<GradeRow> {
    gradebook
        .students
        .iter()
        .map(|student| GradeRow {
            student_id: student.student_id,
            name: student.student_name.clone(),
            email: student.student_email.clone(),
            cells: gradebook
                .assignments
                .iter()
                .map(|a| match student.grade_for(a.id) {
                    Some(score) => (
                        format!("{} / {}", score, a.max_points),
                        grade_band(score, a.max_points).css_class(),
                    ),
                    None => ("-".to_string(), "text-muted"),
                })
                .collect(),
            total: format!("{} / {}", student.total_points, student.max_points),
            percentage: format!("{:.1}%", student.percentage),
            band: grade_band(student.percentage, 100.0).css_class(),
        })
        .collect()
}

#[component]
pub fn CourseGradebook(course_id: i64) -> Element {
    let auth = use_auth();
    let api = use_api();

    let gradebook = use_resource(move || {
        let api = api.clone();
        async move {
            api.course_gradebook(course_id)
                .await
                .map_err(|e| report_error(auth, &e))
        }
    });

    let body = match &*gradebook.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(book)) => {
            let average = book
                .class_average()
                .map(|avg| format!("{:.1}%", avg))
                .unwrap_or_else(|| "-".to_string());
            let rows = grade_rows(book);
            let export = book.clone();
            rsx! {
                div {
                    class: "spread",
                    h2 { "{book.course_title}" }
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: book.students.is_empty(),
                        onclick: move |_| {
                            platform::download_text(&export.export_filename(), "text/csv", &export.to_csv());
                        },
                        Icon { icon: FaFileCsv, width: 14, height: 14 }
                        " Export CSV"
                    }
                }
                div {
                    class: "grid-3",
                    StatCard { label: "Students", value: book.students.len().to_string() }
                    StatCard { label: "Assignments", value: book.assignments.len().to_string() }
                    StatCard { label: "Class Average", value: average }
                }
                if rows.is_empty() {
                    div { class: "card empty-state", p { "No students enrolled yet." } }
                } else {
                    div {
                        class: "table-wrap",
                        table {
                            class: "table",
                            thead {
                                tr {
                                    th { "Student" }
                                    for assignment in book.assignments.iter() {
                                        th { key: "{assignment.id}", "{assignment.title}" }
                                    }
                                    th { "Total" }
                                    th { "Percentage" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    tr {
                                        key: "{row.student_id}",
                                        td {
                                            div { "{row.name}" }
                                            div { class: "text-muted", "{row.email}" }
                                        }
                                        for (index, (text, class)) in row.cells.into_iter().enumerate() {
                                            td { key: "{index}", class: "{class}", "{text}" }
                                        }
                                        td { "{row.total}" }
                                        td { class: "{row.band}", "{row.percentage}" }
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
            PageHeader { title: "Gradebook", subtitle: "Assignment grades for every enrolled student" }
            {body}
            Link { class: "back-link", to: Route::CourseDetails { id: course_id }, "Back to course" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{GradebookAssignment, StudentGrade};
    use std::collections::HashMap;

    #[test]
    fn test_grade_rows_mark_missing_grades() {
        let book = Gradebook {
            course_id: 3,
            course_title: "Databases".into(),
            assignments: vec![
                GradebookAssignment { id: 1, title: "ER model".into(), max_points: 10.0 },
                GradebookAssignment { id: 2, title: "SQL".into(), max_points: 20.0 },
            ],
            students: vec![StudentGrade {
                student_id: 9,
                student_name: "Ada".into(),
                student_email: "ada@school.edu".into(),
                grades: HashMap::from([("1".to_string(), Some(9.5)), ("2".to_string(), None)]),
                total_points: 9.5,
                max_points: 30.0,
                percentage: 31.67,
            }],
        };

        let rows = grade_rows(&book);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[0], ("9.5 / 10".to_string(), "text-success"));
        assert_eq!(rows[0].cells[1], ("-".to_string(), "text-muted"));
        assert_eq!(rows[0].percentage, "31.7%");
        assert_eq!(rows[0].band, "text-danger");
    }
}
