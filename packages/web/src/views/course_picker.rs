use api::TeacherSection;
use dioxus::prelude::*;

/// A course the teacher teaches, once per course however many sections.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TaughtCourse {
    pub id: i64,
    pub label: String,
}

pub(crate) fn taught_courses(sections: &[TeacherSection]) -> Vec<TaughtCourse> {
    let mut courses: Vec<TaughtCourse> = Vec::new();
    for section in sections {
        if courses.iter().any(|c| c.id == section.course_id) {
            continue;
        }
        let label = match &section.course_code {
            Some(code) => format!("{} - {}", code, section.course_title),
            None => section.course_title.clone(),
        };
        courses.push(TaughtCourse {
            id: section.course_id,
            label,
        });
    }
    courses
}

/// Course select shared by the teacher's authoring pages.
#[component]
pub(crate) fn CoursePicker(courses: Vec<TaughtCourse>, selected: Signal<Option<i64>>) -> Element {
    let mut selected = selected;
    rsx! {
        div {
            class: "form-field course-picker",
            label { class: "form-label", r#for: "course-picker", "Course" }
            select {
                id: "course-picker",
                class: "form-input",
                onchange: move |evt: FormEvent| selected.set(evt.value().parse().ok()),
                for course in courses {
                    option {
                        key: "{course.id}",
                        value: "{course.id}",
                        selected: selected() == Some(course.id),
                        "{course.label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: i64, course_id: i64, code: Option<&str>) -> TeacherSection {
        TeacherSection {
            id,
            name: format!("S{}", id),
            course_id,
            course_title: "Algebra".into(),
            course_code: code.map(String::from),
            course_description: None,
            credit_hours: None,
            semester: None,
            enrolled_count: 0,
            capacity: None,
        }
    }

    #[test]
    fn test_one_entry_per_course() {
        let courses = taught_courses(&[
            section(1, 5, Some("MTH1")),
            section(2, 5, Some("MTH1")),
            section(3, 6, None),
        ]);
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].label, "MTH1 - Algebra");
        assert_eq!(courses[1].label, "Algebra");
    }
}
