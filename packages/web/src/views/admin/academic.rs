use api::{
    AcademicKind, ApiClient, ApiError, Course, Department, NewDepartment, NewProgram, NewSection,
    NewSemester, Program, Section, Semester,
};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, ErrorBanner, FormField, Input, PageHeader, Spinner};
use ui::icons::{FaPlus, FaTrash};
use ui::{platform, report_error, use_api, use_auth, Icon};

use super::run_action;

/// Everything the academic structure screen shows, loaded together so
/// section rows can name their course and semester.
#[derive(Debug, Clone, Default, PartialEq)]
struct Academic {
    departments: Vec<Department>,
    programs: Vec<Program>,
    semesters: Vec<Semester>,
    sections: Vec<Section>,
    courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: i64,
    name: String,
    detail: String,
}

impl Academic {
    async fn load(api: &ApiClient) -> Result<Self, ApiError> {
        Ok(Self {
            departments: api.departments().await?,
            programs: api.programs().await?,
            semesters: api.semesters().await?,
            sections: api.sections().await?,
            courses: api.admin_courses().await?,
        })
    }

    fn department_name(&self, id: Option<i64>) -> String {
        id.and_then(|id| self.departments.iter().find(|d| d.id == id))
            .map(|d| d.name.clone())
            .unwrap_or_else(|| "-".into())
    }

    fn rows(&self, kind: AcademicKind) -> Vec<Row> {
        match kind {
            AcademicKind::Departments => self
                .departments
                .iter()
                .map(|d| Row {
                    id: d.id,
                    name: d.name.clone(),
                    detail: d.code.clone().unwrap_or_default(),
                })
                .collect(),
            AcademicKind::Programs => self
                .programs
                .iter()
                .map(|p| Row {
                    id: p.id,
                    name: p.name.clone(),
                    detail: format!(
                        "{} · {}",
                        p.code.as_deref().unwrap_or("-"),
                        self.department_name(p.department_id)
                    ),
                })
                .collect(),
            AcademicKind::Semesters => self
                .semesters
                .iter()
                .map(|s| Row {
                    id: s.id,
                    name: s.name.clone(),
                    detail: format!(
                        "{}{}",
                        s.year.map(|y| y.to_string()).unwrap_or_default(),
                        if s.is_active { " · Active" } else { "" }
                    ),
                })
                .collect(),
            AcademicKind::Sections => self
                .sections
                .iter()
                .map(|s| {
                    let course = s
                        .course_id
                        .and_then(|id| self.courses.iter().find(|c| c.id == id))
                        .map(|c| c.title.clone())
                        .unwrap_or_else(|| "-".into());
                    let semester = s
                        .semester_id
                        .and_then(|id| self.semesters.iter().find(|x| x.id == id))
                        .map(|x| x.name.clone())
                        .unwrap_or_else(|| "-".into());
                    let capacity = s.capacity.map(|c| format!(" · {} seats", c)).unwrap_or_default();
                    Row {
                        id: s.id,
                        name: s.name.clone(),
                        detail: format!("{} · {}{}", course, semester, capacity),
                    }
                })
                .collect(),
        }
    }
}

/// Inputs of the create form; each kind reads only its own fields.
#[derive(Debug, Clone, PartialEq)]
struct AcademicForm {
    name: String,
    code: String,
    year: String,
    is_active: bool,
    department_id: Option<i64>,
    course_id: Option<i64>,
    semester_id: Option<i64>,
    capacity: String,
}

impl Default for AcademicForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            year: String::new(),
            is_active: true,
            department_id: None,
            course_id: None,
            semester_id: None,
            capacity: "30".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum NewRecord {
    Department(NewDepartment),
    Program(NewProgram),
    Semester(NewSemester),
    Section(NewSection),
}

fn build_record(kind: AcademicKind, form: &AcademicForm) -> Result<NewRecord, &'static str> {
    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err("Name is required");
    }
    let code = form.code.trim().to_uppercase();
    match kind {
        AcademicKind::Departments => {
            if code.is_empty() {
                return Err("Code is required");
            }
            Ok(NewRecord::Department(NewDepartment { name, code }))
        }
        AcademicKind::Programs => {
            if code.is_empty() {
                return Err("Code is required");
            }
            let department_id = form.department_id.ok_or("Select a department")?;
            Ok(NewRecord::Program(NewProgram { name, code, department_id }))
        }
        AcademicKind::Semesters => {
            let year = form
                .year
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|y| (2000..=2100).contains(y))
                .ok_or("Enter a valid year")?;
            Ok(NewRecord::Semester(NewSemester {
                name,
                year,
                is_active: form.is_active,
            }))
        }
        AcademicKind::Sections => {
            let course_id = form.course_id.ok_or("Select a course")?;
            let semester_id = form.semester_id.ok_or("Select a semester")?;
            let capacity = form
                .capacity
                .trim()
                .parse::<i32>()
                .ok()
                .filter(|c| *c > 0)
                .ok_or("Capacity must be a positive number")?;
            Ok(NewRecord::Section(NewSection {
                name,
                course_id,
                semester_id,
                capacity,
            }))
        }
    }
}

async fn create(api: &ApiClient, record: NewRecord) -> Result<(), ApiError> {
    match record {
        NewRecord::Department(body) => api.create_department(&body).await.map(|_| ()),
        NewRecord::Program(body) => api.create_program(&body).await.map(|_| ()),
        NewRecord::Semester(body) => api.create_semester(&body).await.map(|_| ()),
        NewRecord::Section(body) => api.create_section(&body).await.map(|_| ()),
    }
}

fn parse_id(value: &str) -> Option<i64> {
    value.parse().ok()
}

#[component]
pub fn AdminAcademic() -> Element {
    let auth = use_auth();
    let api = use_api();
    let mut tab = use_signal(|| AcademicKind::Departments);
    let mut form = use_signal(AcademicForm::default);
    let mut form_error = use_signal(|| None::<String>);
    let error = use_signal(|| None::<String>);

    let data = use_resource({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move { Academic::load(&api).await.map_err(|e| report_error(auth, &e)) }
        }
    });

    let submit = {
        let api = api.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let draft = form.read().clone();
            match build_record(tab(), &draft) {
                Ok(record) => {
                    form_error.set(None);
                    form.set(AcademicForm::default());
                    let api = api.clone();
                    run_action(auth, error, data, async move { create(&api, record).await });
                }
                Err(message) => form_error.set(Some(message.to_string())),
            }
        }
    };

    let remove = move |row: Row| {
        let kind = tab();
        if !platform::confirm(&format!("Delete {} \"{}\"?", kind.label().to_lowercase(), row.name)) {
            return;
        }
        let api = api.clone();
        run_action(auth, error, data, async move { api.delete_academic(kind, row.id).await });
    };

    let kind = tab();
    let loaded = data.read().clone();
    let academic = loaded.clone().and_then(Result::ok).unwrap_or_default();
    let current = form();
    let heading = format!("New {}", kind.label().trim_end_matches('s').to_lowercase());

    let listing = match loaded {
        None => rsx! { Spinner {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: Some(e) } },
        Some(Ok(_)) => {
            let rows = academic.rows(kind);
            rsx! {
                if rows.is_empty() {
                    div { class: "card empty-state", p { "Nothing here yet." } }
                } else {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Details" }
                                th {}
                            }
                        }
                        tbody {
                            for row in rows {
                                AcademicRow { key: "{row.id}", row: row.clone(), on_delete: remove.clone() }
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
            PageHeader { title: "Academic Structure", subtitle: "Departments, programs, semesters and sections" }
            div {
                class: "tabs",
                for option in AcademicKind::ALL {
                    button {
                        key: "{option.path()}",
                        class: if option == kind { "tab active" } else { "tab" },
                        onclick: move |_| {
                            tab.set(option);
                            form_error.set(None);
                        },
                        "{option.label()}"
                    }
                }
            }
            ErrorBanner { message: error() }
            div {
                class: "grid-2",
                div { {listing} }
                form {
                    class: "card stack",
                    onsubmit: submit,
                    h3 { "{heading}" }
                    ErrorBanner { message: form_error() }
                    FormField {
                        label: "Name",
                        html_for: "academic-name",
                        Input {
                            id: "academic-name",
                            value: current.name.clone(),
                            oninput: move |evt: FormEvent| form.write().name = evt.value(),
                        }
                    }
                    if matches!(kind, AcademicKind::Departments | AcademicKind::Programs) {
                        FormField {
                            label: "Code",
                            html_for: "academic-code",
                            Input {
                                id: "academic-code",
                                value: current.code.clone(),
                                oninput: move |evt: FormEvent| form.write().code = evt.value().to_uppercase(),
                            }
                        }
                    }
                    if kind == AcademicKind::Programs {
                        FormField {
                            label: "Department",
                            html_for: "academic-department",
                            select {
                                id: "academic-department",
                                class: "form-input",
                                onchange: move |evt| form.write().department_id = parse_id(&evt.value()),
                                option { value: "", "Select department" }
                                for d in academic.departments.iter() {
                                    option {
                                        key: "{d.id}",
                                        value: "{d.id}",
                                        selected: current.department_id == Some(d.id),
                                        "{d.name}"
                                    }
                                }
                            }
                        }
                    }
                    if kind == AcademicKind::Semesters {
                        FormField {
                            label: "Year",
                            html_for: "academic-year",
                            Input {
                                id: "academic-year",
                                r#type: "number",
                                value: current.year.clone(),
                                oninput: move |evt: FormEvent| form.write().year = evt.value(),
                            }
                        }
                        label {
                            class: "row",
                            input {
                                r#type: "checkbox",
                                checked: current.is_active,
                                onchange: move |evt| form.write().is_active = evt.checked(),
                            }
                            span { "Active semester" }
                        }
                    }
                    if kind == AcademicKind::Sections {
                        FormField {
                            label: "Course",
                            html_for: "academic-course",
                            select {
                                id: "academic-course",
                                class: "form-input",
                                onchange: move |evt| form.write().course_id = parse_id(&evt.value()),
                                option { value: "", "Select course" }
                                for c in academic.courses.iter() {
                                    option {
                                        key: "{c.id}",
                                        value: "{c.id}",
                                        selected: current.course_id == Some(c.id),
                                        "{c.title}"
                                    }
                                }
                            }
                        }
                        FormField {
                            label: "Semester",
                            html_for: "academic-semester",
                            select {
                                id: "academic-semester",
                                class: "form-input",
                                onchange: move |evt| form.write().semester_id = parse_id(&evt.value()),
                                option { value: "", "Select semester" }
                                for s in academic.semesters.iter() {
                                    option {
                                        key: "{s.id}",
                                        value: "{s.id}",
                                        selected: current.semester_id == Some(s.id),
                                        "{s.name}"
                                    }
                                }
                            }
                        }
                        FormField {
                            label: "Capacity",
                            html_for: "academic-capacity",
                            Input {
                                id: "academic-capacity",
                                r#type: "number",
                                value: current.capacity.clone(),
                                oninput: move |evt: FormEvent| form.write().capacity = evt.value(),
                            }
                        }
                    }
                    Button {
                        r#type: "submit",
                        Icon { icon: FaPlus, width: 12, height: 12 }
                        " Create"
                    }
                }
            }
        }
    }
}

#[component]
fn AcademicRow(row: Row, on_delete: EventHandler<Row>) -> Element {
    let target = row.clone();
    rsx! {
        tr {
            td { "{row.name}" }
            td { class: "text-muted", "{row.detail}" }
            td {
                Button {
                    variant: ButtonVariant::Danger,
                    title: "Delete",
                    onclick: move |_| on_delete.call(target.clone()),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str) -> AcademicForm {
        AcademicForm {
            name: name.into(),
            ..AcademicForm::default()
        }
    }

    #[test]
    fn test_name_is_required_for_every_kind() {
        for kind in AcademicKind::ALL {
            assert_eq!(build_record(kind, &form("  ")), Err("Name is required"));
        }
    }

    #[test]
    fn test_department_code_is_upper_cased() {
        let mut f = form("Computer Science");
        f.code = " cs ".into();
        assert_eq!(
            build_record(AcademicKind::Departments, &f),
            Ok(NewRecord::Department(NewDepartment {
                name: "Computer Science".into(),
                code: "CS".into(),
            }))
        );
    }

    #[test]
    fn test_program_needs_department() {
        let mut f = form("BSc CS");
        f.code = "BSCS".into();
        assert_eq!(build_record(AcademicKind::Programs, &f), Err("Select a department"));
        f.department_id = Some(4);
        assert!(matches!(
            build_record(AcademicKind::Programs, &f),
            Ok(NewRecord::Program(NewProgram { department_id: 4, .. }))
        ));
    }

    #[test]
    fn test_semester_year_and_section_capacity() {
        let mut f = form("Fall");
        f.year = "twenty".into();
        assert_eq!(build_record(AcademicKind::Semesters, &f), Err("Enter a valid year"));
        f.year = "2026".into();
        assert!(matches!(
            build_record(AcademicKind::Semesters, &f),
            Ok(NewRecord::Semester(NewSemester { year: 2026, is_active: true, .. }))
        ));

        let mut s = form("A");
        s.course_id = Some(1);
        s.semester_id = Some(2);
        s.capacity = "0".into();
        assert_eq!(
            build_record(AcademicKind::Sections, &s),
            Err("Capacity must be a positive number")
        );
        s.capacity = "40".into();
        assert!(build_record(AcademicKind::Sections, &s).is_ok());
    }

    #[test]
    fn test_section_rows_name_course_and_semester() {
        let academic = Academic {
            semesters: vec![Semester { id: 2, name: "Fall 2026".into(), year: Some(2026), is_active: true }],
            sections: vec![Section {
                id: 7,
                name: "A".into(),
                course_id: Some(1),
                semester_id: Some(2),
                teacher_id: None,
                capacity: Some(40),
            }],
            ..Academic::default()
        };
        let rows = academic.rows(AcademicKind::Sections);
        assert_eq!(rows[0].detail, "- · Fall 2026 · 40 seats");
    }
}
