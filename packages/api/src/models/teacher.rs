use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCourse {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub credit_hours: Option<i32>,
}

/// A row of `/teacher/sections`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSection {
    pub id: i64,
    pub name: String,
    pub course_id: i64,
    pub course_title: String,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub course_description: Option<String>,
    #[serde(default)]
    pub credit_hours: Option<i32>,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub enrolled_count: u32,
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl TeacherSection {
    pub fn fill_label(&self) -> String {
        fill_label(self.enrolled_count, self.capacity)
    }
}

/// A section as embedded in the teacher dashboard, with its course nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSection {
    pub id: i64,
    pub name: String,
    pub course: SectionCourse,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub enrolled_count: u32,
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl DashboardSection {
    pub fn fill_label(&self) -> String {
        fill_label(self.enrolled_count, self.capacity)
    }
}

/// `enrolled / capacity`, or just the count when uncapped.
fn fill_label(enrolled: u32, capacity: Option<u32>) -> String {
    match capacity {
        Some(cap) => format!("{} / {}", enrolled, cap),
        None => enrolled.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTask {
    pub assignment_id: i64,
    pub assignment_title: String,
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub course_title: String,
    #[serde(default)]
    pub pending_count: u32,
    #[serde(default)]
    pub total_submissions: u32,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_courses: u32,
    #[serde(default)]
    pub total_students: u32,
    #[serde(default)]
    pub pending_tasks: u32,
    #[serde(default)]
    pub total_assignments: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherDashboard {
    #[serde(default)]
    pub assigned_sections: Vec<DashboardSection>,
    #[serde(default)]
    pub total_students: u32,
    #[serde(default)]
    pub pending_grading: Vec<PendingTask>,
    #[serde(default)]
    pub stats: DashboardStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_json() {
        let dash: TeacherDashboard = serde_json::from_str(
            r#"{"assigned_sections":[{"id":1,"name":"A","course":{"id":3,"title":"Algebra","code":"MTH1","credit_hours":3},
                 "semester":"Fall","enrolled_count":12,"capacity":30}],
                "total_students":12,"pending_grading":[],"upcoming_classes":[],
                "stats":{"total_courses":1,"total_students":12,"pending_tasks":0,"total_assignments":4}}"#,
        )
        .unwrap();
        assert_eq!(dash.assigned_sections[0].fill_label(), "12 / 30");
        assert_eq!(dash.assigned_sections[0].course.id, Some(3));
        assert_eq!(dash.stats.total_assignments, 4);
    }

    #[test]
    fn test_flat_section_json() {
        let section: TeacherSection = serde_json::from_str(
            r#"{"id":2,"name":"B","course_id":5,"course_title":"Biology","course_code":"BIO2",
                "course_description":null,"credit_hours":4,"semester":null,"enrolled_count":7,"capacity":null}"#,
        )
        .unwrap();
        assert_eq!(section.fill_label(), "7");
        assert_eq!(section.course_id, 5);
    }
}
