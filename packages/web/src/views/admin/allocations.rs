use api::{ApiClient, ApiError, Course, Role, Section, User};
use dioxus::prelude::*;
use ui::components::{ErrorBanner, PageHeader, Spinner, SuccessBanner};
use ui::{report_error, use_api, use_auth};

#[derive(Debug, Clone, Default, PartialEq)]
struct Allocations {
    sections: Vec<Section>,
    teachers: Vec<User>,
    courses: Vec<Course>,
}

impl Allocations {
    async fn load(api: &ApiClient) -> Result<Self, ApiError> {
        Ok(Self {
            sections: api.sections().await?,
            teachers: api.admin_users(Some(Role::Teacher)).await?,
            courses: api.admin_courses().await?,
        })
    }

    fn course_title(&self, section: &Section) -> String {
        section
            .course_id
            .and_then(|id| self.courses.iter().find(|c| c.id == id))
            .map(|c| c.title.clone())
            .unwrap_or_else(|| "Unknown course".into())
    }

    fn unassigned(&self) -> usize {
        self.sections.iter().filter(|s| s.teacher_id.is_none()).count()
    }
}

#[component]
pub fn AdminAllocations() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let mut data = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { Allocations::load(&api).await.map_err(|e| report_error(auth, &e)) }
        }
    });

    let assign = move |(section_id, teacher_id): (i64, i64)| {
        let api = api.clone();
        notice.set(None);
        error.set(None);
        spawn(async move {
            match api.assign_teacher(section_id, teacher_id).await {
                Ok(()) => {
                    tracing::info!("Assigned teacher {} to section {}", teacher_id, section_id);
                    notice.set(Some("Teacher assigned".into()));
                    data.restart();
                }
                Err(e) => error.set(Some(report_error(auth, &e))),
            }
        });
    };

    let body = match &*data.read() {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e.clone()) } },
        Some(Ok(all)) if all.sections.is_empty() => rsx! {
            div { class: "card empty-state", p { "Create sections under Academic Structure first." } }
        },
        Some(Ok(all)) => {
            let rows: Vec<(Section, String)> = all
                .sections
                .iter()
                .map(|s| (s.clone(), all.course_title(s)))
                .collect();
            let summary = format!("{} of {} sections without a teacher", all.unassigned(), all.sections.len());
            rsx! {
                p { class: "text-muted", "{summary}" }
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Course" }
                            th { "Section" }
                            th { "Teacher" }
                        }
                    }
                    tbody {
                        for (section, course) in rows {
                            AllocationRow {
                                key: "{section.id}",
                                section: section.clone(),
                                course,
                                teachers: all.teachers.clone(),
                                on_assign: assign.clone(),
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
            PageHeader { title: "Course Allocations", subtitle: "Assign teachers to course sections" }
            ErrorBanner { message: error() }
            SuccessBanner { message: notice() }
            {body}
        }
    }
}

#[component]
fn AllocationRow(
    section: Section,
    course: String,
    teachers: Vec<User>,
    on_assign: EventHandler<(i64, i64)>,
) -> Element {
    let section_id = section.id;
    let current = section.teacher_id.map(|id| id.to_string()).unwrap_or_default();

    rsx! {
        tr {
            td { "{course}" }
            td { "{section.name}" }
            td {
                select {
                    class: "form-input",
                    value: "{current}",
                    onchange: move |evt| {
                        if let Ok(teacher_id) = evt.value().parse::<i64>() {
                            on_assign.call((section_id, teacher_id));
                        }
                    },
                    option { value: "", disabled: true, "Unassigned" }
                    for teacher in teachers.iter() {
                        option {
                            key: "{teacher.id}",
                            value: "{teacher.id}",
                            selected: section.teacher_id == Some(teacher.id),
                            "{teacher.full_name}"
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

    fn section(id: i64, course_id: Option<i64>, teacher_id: Option<i64>) -> Section {
        Section {
            id,
            name: format!("S{}", id),
            course_id,
            semester_id: None,
            teacher_id,
            capacity: None,
        }
    }

    #[test]
    fn test_unassigned_count_and_course_lookup() {
        let data = Allocations {
            sections: vec![section(1, Some(5), None), section(2, Some(99), Some(3))],
            teachers: Vec::new(),
            courses: vec![Course {
                id: 5,
                title: "Operating Systems".into(),
                description: None,
                code: Some("CS330".into()),
                credit_hours: Some(3),
                department_id: None,
                teacher_id: None,
                is_approved: true,
                is_published: true,
                created_at: None,
            }],
        };
        assert_eq!(data.unassigned(), 1);
        assert_eq!(data.course_title(&data.sections[0]), "Operating Systems");
        assert_eq!(data.course_title(&data.sections[1]), "Unknown course");
    }
}
