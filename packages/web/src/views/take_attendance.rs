use api::{today, ApiClient, ApiError, AttendanceSheet, AttendanceStatus};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, PageHeader, Spinner, SuccessBanner};
use ui::{report_error, use_api, use_auth};

async fn load_sheet(api: &ApiClient, section: i64, day: &str) -> Result<AttendanceSheet, ApiError> {
    let students = api.section_students(section).await?;
    let existing = api.section_records(section, day).await?;
    Ok(AttendanceSheet::new(students, &existing))
}

/// What the roster area shows for the current load state.
#[derive(Debug, Clone, PartialEq)]
enum RosterView {
    Loading,
    NoSection,
    Failed(String),
    NoStudents,
    /// The loaded sheet, with the error of a later reload that failed.
    Sheet(Option<String>),
}

fn roster_view(state: Option<&Result<bool, String>>, loaded_rows: usize) -> RosterView {
    match state {
        None => RosterView::Loading,
        Some(Err(e)) if loaded_rows > 0 => RosterView::Sheet(Some(e.clone())),
        Some(Err(e)) => RosterView::Failed(e.clone()),
        Some(Ok(false)) => RosterView::NoSection,
        Some(Ok(true)) if loaded_rows == 0 => RosterView::NoStudents,
        Some(Ok(true)) => RosterView::Sheet(None),
    }
}

#[component]
pub fn TakeAttendance() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut section = use_signal(|| None::<i64>);
    let mut day = use_signal(today);
    let mut sheet = use_signal(AttendanceSheet::default);
    // Section and day the sheet was loaded for
    let mut loaded_for = use_signal(|| None::<(i64, String)>);
    let mut saving = use_signal(|| false);
    let mut notice = use_signal(|| None::<String>);
    let mut save_error = use_signal(|| None::<String>);

    let sections = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                let list = api
                    .attendance_sections()
                    .await
                    .map_err(|e| report_error(auth, &e))?;
                // Preselect the first section
                if section.peek().is_none() {
                    section.set(list.first().map(|s| s.id));
                }
                Ok::<_, String>(list)
            }
        }
    });

    let roster = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            let selected = section();
            let day = day();
            async move {
                let Some(id) = selected else {
                    return Ok(false);
                };
                let loaded = load_sheet(&api, id, &day)
                    .await
                    .map_err(|e| report_error(auth, &e))?;
                sheet.set(loaded);
                loaded_for.set(Some((id, day)));
                notice.set(None);
                Ok::<_, String>(true)
            }
        }
    });

    let save = move |_: MouseEvent| {
        let Some((id, sheet_day)) = loaded_for() else {
            return;
        };
        let request = sheet.read().to_request(&sheet_day);
        let api = api.clone();
        saving.set(true);
        save_error.set(None);
        notice.set(None);
        spawn(async move {
            match api.mark_attendance(id, &request).await {
                Ok(()) => {
                    tracing::info!("Saved attendance for section {} ({} students)", id, request.records.len());
                    notice.set(Some("Attendance saved".to_string()));
                }
                Err(e) => save_error.set(Some(report_error(auth, &e))),
            }
            saving.set(false);
        });
    };

    let options = sections.read().clone().and_then(Result::ok).unwrap_or_default();
    let selected_value = section().map(|id| id.to_string()).unwrap_or_default();
    let counts: Vec<String> = AttendanceStatus::ALL
        .iter()
        .map(|s| format!("{}: {}", s.label(), sheet.read().count(*s)))
        .collect();
    let save_label = if saving() { "Saving..." } else { "Save Attendance" };

    let view = roster_view(roster.read().as_ref(), sheet.read().rows.len());
    let stale_note = loaded_for()
        .filter(|(id, loaded_day)| section() != Some(*id) || *loaded_day != day())
        .map(|(_, loaded_day)| format!("Showing the roster loaded for {}", loaded_day));

    let body = match view {
        RosterView::Loading => rsx! { Spinner {} },
        RosterView::Failed(e) => rsx! { ErrorBanner { message: Some(e) } },
        RosterView::NoSection => rsx! {
            div { class: "card empty-state", p { "Select a section to take attendance." } }
        },
        RosterView::NoStudents => rsx! {
            div { class: "card empty-state", p { "No students are enrolled in this section." } }
        },
        RosterView::Sheet(reload_error) => rsx! {
            ErrorBanner { message: reload_error }
            if let Some(note) = stale_note {
                p { class: "text-muted", "{note}" }
            }
            div {
                class: "toolbar",
                for status in AttendanceStatus::ALL {
                    Button {
                        key: "{status.as_str()}",
                        variant: ButtonVariant::Outline,
                        onclick: move |_| sheet.write().mark_all(status),
                        "Mark all {status.label()}"
                    }
                }
            }
            div {
                class: "row text-muted",
                for line in counts {
                    span { key: "{line}", "{line}" }
                }
            }
            table {
                class: "table",
                thead {
                    tr {
                        th { "Student" }
                        th { "Email" }
                        th { "Status" }
                    }
                }
                tbody {
                    for (student, current) in sheet.read().rows.clone() {
                        tr {
                            key: "{student.id}",
                            td { "{student.full_name}" }
                            td { class: "text-muted", "{student.email}" }
                            td {
                                div {
                                    class: "row",
                                    for status in AttendanceStatus::ALL {
                                        button {
                                            key: "{status.as_str()}",
                                            class: if status == current { status.css_class() } else { "badge badge-muted" },
                                            onclick: move |_| sheet.write().set(student.id, status),
                                            "{status.label()}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            div {
                class: "spread",
                span {}
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: saving(),
                    onclick: save,
                    "{save_label}"
                }
            }
        },
    };

    rsx! {
        div {
            class: "page",
            PageHeader { title: "Take Attendance", subtitle: "Mark attendance for a class day" }
            div {
                class: "toolbar",
                select {
                    class: "form-input",
                    value: "{selected_value}",
                    onchange: move |evt| section.set(evt.value().parse().ok()),
                    for s in options {
                        option { key: "{s.id}", value: "{s.id}", "{s.label()}" }
                    }
                }
                input {
                    class: "form-input",
                    r#type: "date",
                    value: "{day}",
                    onchange: move |evt| day.set(evt.value()),
                }
            }
            ErrorBanner { message: save_error() }
            SuccessBanner { message: notice() }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_reload_keeps_loaded_sheet() {
        let failed: Result<bool, String> = Err("Could not reach the server.".to_string());
        assert_eq!(
            roster_view(Some(&failed), 12),
            RosterView::Sheet(Some("Could not reach the server.".to_string()))
        );
        assert_eq!(
            roster_view(Some(&failed), 0),
            RosterView::Failed("Could not reach the server.".to_string())
        );
    }

    #[test]
    fn test_roster_view_states() {
        assert_eq!(roster_view(None, 3), RosterView::Loading);
        assert_eq!(roster_view(Some(&Ok(false)), 0), RosterView::NoSection);
        assert_eq!(roster_view(Some(&Ok(true)), 0), RosterView::NoStudents);
        assert_eq!(roster_view(Some(&Ok(true)), 4), RosterView::Sheet(None));
    }
}
