use serde::{Deserialize, Serialize};

/// A course as listed by `/courses/` and `/admin/courses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub credit_hours: Option<i32>,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Course {
    pub fn code_or_blank(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }

    /// Case-insensitive match on title or code.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.code_or_blank().to_lowercase().contains(&needle)
    }
}

/// Body for `POST /courses/` (teacher-created) and `POST /admin/courses`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCourse {
    pub title: String,
    pub code: String,
    pub credit_hours: i32,
    pub department_id: i64,
    pub description: Option<String>,
    pub is_approved: bool,
    pub is_published: bool,
}

impl NewCourse {
    /// Course codes are stored upper-case.
    pub fn new(
        title: &str,
        code: &str,
        credit_hours: i32,
        department_id: i64,
        description: &str,
    ) -> Self {
        let description = description.trim();
        Self {
            title: title.trim().to_string(),
            code: code.trim().to_uppercase(),
            credit_hours,
            department_id,
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            is_approved: true,
            is_published: false,
        }
    }
}

/// One row of `/users/{id}/enrollments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub course_id: i64,
    pub course_title: String,
    #[serde(default)]
    pub course_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_normalises_fields() {
        let draft = NewCourse::new("  Compilers ", "cs-401", 3, 2, "   ");
        assert_eq!(draft.title, "Compilers");
        assert_eq!(draft.code, "CS-401");
        assert!(draft.description.is_none());
        assert!(draft.is_approved);
        assert!(!draft.is_published);
    }

    #[test]
    fn test_course_minimal_json() {
        let course: Course =
            serde_json::from_str(r#"{"id":1,"title":"Intro","description":"d","teacher_id":4}"#)
                .unwrap();
        assert_eq!(course.code_or_blank(), "");
        assert!(!course.is_published);
        assert!(course.matches("INT"));
    }
}
