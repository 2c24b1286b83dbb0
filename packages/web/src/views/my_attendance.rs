use api::{ApiClient, ApiError, AttendanceRecord, AttendanceSummary};
use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner, StatCard};
use ui::{report_error, use_api, use_auth, use_settings};

async fn load_attendance(
    api: &ApiClient,
    student_id: i64,
    section: Option<i64>,
) -> Result<(Vec<AttendanceRecord>, AttendanceSummary), ApiError> {
    let records = api.my_attendance_records(section).await?;
    let summary = api.attendance_summary(student_id, section).await?;
    Ok((records, summary))
}

#[component]
pub fn MyAttendance() -> Element {
    let auth = use_auth();
    let api = use_api();
    let settings = use_settings();
    let mut section = use_signal(|| None::<i64>);
    let student_id = auth().user.map(|u| u.id).unwrap_or_default();

    let sections = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { api.my_enrollments().await.map_err(|e| report_error(auth, &e)) }
        }
    });

    let attendance = use_resource(move || {
        let api = api.clone();
        let selected = section();
        async move {
            load_attendance(&api, student_id, selected)
                .await
                .map_err(|e| report_error(auth, &e))
        }
    });

    let options = sections.read().clone().and_then(Result::ok).unwrap_or_default();

    let body = match &*attendance.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok((records, summary))) => {
            let band_class = summary.band(&settings.attendance).css_class();
            let percentage = format!("{:.1}%", summary.attendance_percentage);
            rsx! {
                div {
                    class: "grid-4",
                    div {
                        class: "card stat-card",
                        div { class: "stat-label", "Attendance" }
                        div { class: "stat-value {band_class}", "{percentage}" }
                    }
                    StatCard { label: "Present", value: summary.present.to_string() }
                    StatCard { label: "Absent", value: summary.absent.to_string() }
                    StatCard { label: "Late", value: summary.late.to_string() }
                }
                if records.is_empty() {
                    div { class: "card empty-state", p { "No attendance recorded yet." } }
                } else {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Date" }
                                th { "Course" }
                                th { "Section" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            for record in records.iter() {
                                tr {
                                    key: "{record.id}",
                                    td { "{record.day()}" }
                                    td { "{record.course_title}" }
                                    td { "{record.section_name}" }
                                    td { span { class: record.status.css_class(), "{record.status.label()}" } }
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
            PageHeader { title: "My Attendance", subtitle: "Your attendance across enrolled sections" }
            div {
                class: "toolbar",
                label { class: "form-label", r#for: "section-filter", "Section" }
                select {
                    id: "section-filter",
                    class: "form-input",
                    onchange: move |evt| section.set(evt.value().parse().ok()),
                    option { value: "", "All sections" }
                    for s in options {
                        option { key: "{s.id}", value: "{s.id}", "{s.label()}" }
                    }
                }
            }
            {body}
        }
    }
}
