use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub department_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub is_active: bool,
}

/// A scheduled offering of a course with a teacher and a roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub semester_id: Option<i64>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub capacity: Option<i32>,
}

/// The four kinds of record managed from the academic structure screen.
///
/// The path segment doubles as the `/admin/{kind}` and `/academic/{kind}`
/// endpoint name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcademicKind {
    Departments,
    Programs,
    Semesters,
    Sections,
}

impl AcademicKind {
    pub const ALL: [AcademicKind; 4] = [
        AcademicKind::Departments,
        AcademicKind::Programs,
        AcademicKind::Semesters,
        AcademicKind::Sections,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            AcademicKind::Departments => "departments",
            AcademicKind::Programs => "programs",
            AcademicKind::Semesters => "semesters",
            AcademicKind::Sections => "sections",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AcademicKind::Departments => "Departments",
            AcademicKind::Programs => "Programs",
            AcademicKind::Semesters => "Semesters",
            AcademicKind::Sections => "Sections",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDepartment {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProgram {
    pub name: String,
    pub code: String,
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSemester {
    pub name: String,
    pub year: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSection {
    pub name: String,
    pub course_id: i64,
    pub semester_id: i64,
    pub capacity: i32,
}

/// A program intake; students belong to one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: i64,
    pub name: String,
    pub program_id: i64,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl Batch {
    /// `YYYY-MM-DD` part of the start date, as a date input expects.
    pub fn start_day(&self) -> &str {
        day_part(&self.start_date)
    }

    pub fn end_day(&self) -> Option<&str> {
        self.end_date.as_deref().map(day_part)
    }

    /// Case-insensitive match on the batch name or its program's name.
    pub fn matches(&self, needle: &str, program_name: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || program_name.to_lowercase().contains(&needle)
    }
}

fn day_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// Body for `POST /admin/batches` and `PATCH /admin/batches/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBatch {
    pub name: String,
    pub program_id: i64,
    pub start_date: String,
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_paths_are_distinct() {
        let paths: std::collections::HashSet<_> =
            AcademicKind::ALL.iter().map(|k| k.path()).collect();
        assert_eq!(paths.len(), AcademicKind::ALL.len());
    }

    #[test]
    fn test_section_with_nulls() {
        let section: Section = serde_json::from_str(
            r#"{"id":3,"name":"A","course_id":9,"semester_id":null,"teacher_id":null}"#,
        )
        .unwrap();
        assert_eq!(section.course_id, Some(9));
        assert!(section.teacher_id.is_none());
        assert!(section.capacity.is_none());
    }

    #[test]
    fn test_batch_days_and_search() {
        let batch: Batch = serde_json::from_str(
            r#"{"id":1,"name":"Fall 2024","program_id":2,"start_date":"2024-09-01T00:00:00","end_date":null}"#,
        )
        .unwrap();
        assert!(batch.is_active);
        assert_eq!(batch.start_day(), "2024-09-01");
        assert_eq!(batch.end_day(), None);
        assert!(batch.matches("fall", "Computer Science"));
        assert!(batch.matches("COMPUTER", "Computer Science"));
        assert!(!batch.matches("spring", "Computer Science"));
    }
}
