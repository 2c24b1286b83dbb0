use serde::{Deserialize, Serialize};

use crate::settings::AttendanceSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "badge badge-success",
            AttendanceStatus::Absent => "badge badge-danger",
            AttendanceStatus::Late => "badge badge-warning",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A student's own attendance row (`/attendance/my-records`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub date: String,
    pub status: AttendanceStatus,
    pub section_name: String,
    pub course_title: String,
    #[serde(default)]
    pub course_code: Option<String>,
}

impl AttendanceRecord {
    /// The `YYYY-MM-DD` part of the timestamp.
    pub fn day(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceBand {
    Good,
    Warning,
    Poor,
}

impl AttendanceBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            AttendanceBand::Good => "text-success",
            AttendanceBand::Warning => "text-warning",
            AttendanceBand::Poor => "text-danger",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total_classes: u32,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub attendance_percentage: f64,
}

impl AttendanceSummary {
    pub fn band(&self, settings: &AttendanceSettings) -> AttendanceBand {
        if self.attendance_percentage >= settings.good_percentage {
            AttendanceBand::Good
        } else if self.attendance_percentage >= settings.warning_percentage {
            AttendanceBand::Warning
        } else {
            AttendanceBand::Poor
        }
    }
}

/// A section the student is enrolled in, or one a teacher runs
/// (`/attendance/my-enrollments`, `/attendance/my-sections`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledSection {
    pub id: i64,
    pub name: String,
    pub course_title: String,
    #[serde(default)]
    pub course_code: Option<String>,
}

impl EnrolledSection {
    pub fn label(&self) -> String {
        match &self.course_code {
            Some(code) => format!("{} - {} ({})", code, self.course_title, self.name),
            None => format!("{} ({})", self.course_title, self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStudent {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}

/// A row of `/attendance/sections/{id}/records`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAttendanceEntry {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub marked_by: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkRecord {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkAttendance {
    /// Midnight of the class day, `YYYY-MM-DDT00:00:00`.
    pub date: String,
    pub records: Vec<MarkRecord>,
}

/// The roster a teacher edits before saving.
///
/// Every student starts `Present`; statuses already recorded for the day
/// replace the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceSheet {
    pub rows: Vec<(SectionStudent, AttendanceStatus)>,
}

impl AttendanceSheet {
    pub fn new(students: Vec<SectionStudent>, existing: &[SectionAttendanceEntry]) -> Self {
        let rows = students
            .into_iter()
            .map(|student| {
                let status = existing
                    .iter()
                    .find(|e| e.student_id == student.id)
                    .map(|e| e.status)
                    .unwrap_or_default();
                (student, status)
            })
            .collect();
        Self { rows }
    }

    pub fn set(&mut self, student_id: i64, status: AttendanceStatus) {
        if let Some(row) = self.rows.iter_mut().find(|(s, _)| s.id == student_id) {
            row.1 = status;
        }
    }

    pub fn mark_all(&mut self, status: AttendanceStatus) {
        for row in &mut self.rows {
            row.1 = status;
        }
    }

    pub fn count(&self, status: AttendanceStatus) -> usize {
        self.rows.iter().filter(|(_, s)| *s == status).count()
    }

    pub fn to_request(&self, day: &str) -> MarkAttendance {
        MarkAttendance {
            date: midnight(day),
            records: self
                .rows
                .iter()
                .map(|(student, status)| MarkRecord {
                    student_id: student.id,
                    status: *status,
                })
                .collect(),
        }
    }
}

/// The local calendar day, `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD` to the backend's midnight timestamp.
pub fn midnight(day: &str) -> String {
    format!("{}T00:00:00", day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64, name: &str) -> SectionStudent {
        SectionStudent {
            id,
            full_name: name.into(),
            email: format!("{}@school.edu", name.to_lowercase()),
        }
    }

    #[test]
    fn test_band_thresholds() {
        let settings = AttendanceSettings {
            good_percentage: 75.0,
            warning_percentage: 60.0,
        };
        let mut summary = AttendanceSummary {
            attendance_percentage: 75.0,
            ..Default::default()
        };
        assert_eq!(summary.band(&settings), AttendanceBand::Good);
        summary.attendance_percentage = 60.0;
        assert_eq!(summary.band(&settings), AttendanceBand::Warning);
        summary.attendance_percentage = 59.99;
        assert_eq!(summary.band(&settings), AttendanceBand::Poor);
    }

    #[test]
    fn test_sheet_defaults_and_existing() {
        let existing = vec![SectionAttendanceEntry {
            id: 1,
            student_id: 2,
            student_name: "Bo".into(),
            date: "2024-05-01T00:00:00".into(),
            status: AttendanceStatus::Late,
            marked_by: Some(9),
        }];
        let sheet = AttendanceSheet::new(vec![student(1, "Al"), student(2, "Bo")], &existing);
        assert_eq!(sheet.rows[0].1, AttendanceStatus::Present);
        assert_eq!(sheet.rows[1].1, AttendanceStatus::Late);
    }

    #[test]
    fn test_sheet_mark_all_and_request() {
        let mut sheet = AttendanceSheet::new(vec![student(1, "Al"), student(2, "Bo")], &[]);
        sheet.set(2, AttendanceStatus::Absent);
        assert_eq!(sheet.count(AttendanceStatus::Absent), 1);
        sheet.mark_all(AttendanceStatus::Late);
        assert_eq!(sheet.count(AttendanceStatus::Late), 2);

        let body = serde_json::to_value(sheet.to_request("2024-05-02")).unwrap();
        assert_eq!(body["date"], "2024-05-02T00:00:00");
        assert_eq!(body["records"][1]["status"], "late");
        assert_eq!(body["records"][1]["student_id"], 2);
    }

    #[test]
    fn test_record_day() {
        let record: AttendanceRecord = serde_json::from_str(
            r#"{"id":1,"date":"2024-04-03T00:00:00","status":"absent","section_name":"A","course_title":"Physics","course_code":"PHY101"}"#,
        )
        .unwrap();
        assert_eq!(record.day(), "2024-04-03");
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert_eq!(AttendanceStatus::parse("late"), Some(AttendanceStatus::Late));
        assert_eq!(AttendanceStatus::parse("excused"), None);
    }
}
