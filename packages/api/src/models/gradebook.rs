//! Course gradebook and its CSV export.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookAssignment {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub max_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentGrade {
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
    /// Keyed by assignment id. JSON object keys are strings on the wire.
    #[serde(default)]
    pub grades: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub total_points: f64,
    #[serde(default)]
    pub max_points: f64,
    #[serde(default)]
    pub percentage: f64,
}

impl StudentGrade {
    pub fn grade_for(&self, assignment_id: i64) -> Option<f64> {
        self.grades
            .get(&assignment_id.to_string())
            .copied()
            .flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    pub course_id: i64,
    pub course_title: String,
    #[serde(default)]
    pub assignments: Vec<GradebookAssignment>,
    #[serde(default)]
    pub students: Vec<StudentGrade>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeBand {
    High,
    Medium,
    Low,
}

impl GradeBand {
    pub fn css_class(&self) -> &'static str {
        match self {
            GradeBand::High => "text-success",
            GradeBand::Medium => "text-warning",
            GradeBand::Low => "text-danger",
        }
    }
}

/// `High` from 90 %, `Medium` from 70 %. A zero maximum counts as `Low`.
pub fn grade_band(score: f64, max: f64) -> GradeBand {
    if max <= 0.0 {
        return GradeBand::Low;
    }
    let pct = score / max * 100.0;
    if pct >= 90.0 {
        GradeBand::High
    } else if pct >= 70.0 {
        GradeBand::Medium
    } else {
        GradeBand::Low
    }
}

impl Gradebook {
    /// Class average of the per-student percentages.
    pub fn class_average(&self) -> Option<f64> {
        if self.students.is_empty() {
            return None;
        }
        let sum: f64 = self.students.iter().map(|s| s.percentage).sum();
        Some(sum / self.students.len() as f64)
    }

    /// Header row unquoted, data cells double-quoted, rows joined by `\n`.
    pub fn to_csv(&self) -> String {
        let mut header: Vec<String> = vec!["Student Name".into(), "Email".into()];
        header.extend(self.assignments.iter().map(|a| a.title.clone()));
        header.push("Total".into());
        header.push("Percentage".into());

        let mut lines = vec![join_row(&header)];
        for student in &self.students {
            let mut cells = vec![student.student_name.clone(), student.student_email.clone()];
            cells.extend(self.assignments.iter().map(|a| {
                student
                    .grade_for(a.id)
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| "-".to_string())
            }));
            cells.push(student.total_points.to_string());
            cells.push(format!("{:.2}%", student.percentage));
            lines.push(join_row(&cells));
        }
        lines.join("\n")
    }

    pub fn export_filename(&self) -> String {
        let title = self.course_title.split_whitespace().collect::<Vec<_>>().join("_");
        format!("gradebook_{}.csv", title)
    }
}

fn join_row(cells: &[String]) -> String {
    cells.iter().map(|c| quote(c)).collect::<Vec<_>>().join(",")
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Gradebook {
        serde_json::from_str(
            r#"{
                "course_id": 4,
                "course_title": "Data  Structures I",
                "assignments": [
                    {"id": 10, "title": "Lists", "max_points": 10},
                    {"id": 11, "title": "Trees", "max_points": 20}
                ],
                "students": [
                    {"student_id": 1, "student_name": "Ann \"Ace\" Lee", "student_email": "ann@x.edu",
                     "grades": {"10": 9, "11": null}, "total_points": 9, "max_points": 30, "percentage": 30.0},
                    {"student_id": 2, "student_name": "Ben", "student_email": "ben@x.edu",
                     "grades": {"10": 7.5, "11": 18}, "total_points": 25.5, "max_points": 30, "percentage": 85.0}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_csv_shape() {
        let csv = sample().to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            r#""Student Name","Email","Lists","Trees","Total","Percentage""#
        );
        assert_eq!(
            lines[1],
            r#""Ann ""Ace"" Lee","ann@x.edu","9","-","9","30.00%""#
        );
        assert_eq!(lines[2], r#""Ben","ben@x.edu","7.5","18","25.5","85.00%""#);
    }

    /// Splits one CSV record, honouring quoted fields and doubled quotes.
    fn fields(line: &str) -> Vec<String> {
        let mut out = vec![String::new()];
        let mut quoted = false;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' if quoted && chars.peek() == Some(&'"') => {
                    chars.next();
                    out.last_mut().unwrap().push('"');
                }
                '"' => quoted = !quoted,
                ',' if !quoted => out.push(String::new()),
                _ => out.last_mut().unwrap().push(c),
            }
        }
        out
    }

    #[test]
    fn test_csv_one_column_per_assignment() {
        let mut book = sample();
        book.assignments[0].title = "Essay, part 1".to_string();
        let csv = book.to_csv();
        let rows: Vec<Vec<String>> = csv.lines().map(fields).collect();

        let width = book.assignments.len() + 4;
        assert!(rows.iter().all(|row| row.len() == width));
        assert_eq!(rows[0][2], "Essay, part 1");
        assert_eq!(rows[1][0], "Ann \"Ace\" Lee");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(sample().export_filename(), "gradebook_Data_Structures_I.csv");
    }

    #[test]
    fn test_grade_band() {
        assert_eq!(grade_band(9.0, 10.0), GradeBand::High);
        assert_eq!(grade_band(7.0, 10.0), GradeBand::Medium);
        assert_eq!(grade_band(6.9, 10.0), GradeBand::Low);
        assert_eq!(grade_band(5.0, 0.0), GradeBand::Low);
    }

    #[test]
    fn test_class_average() {
        assert_eq!(sample().class_average(), Some(57.5));
        let empty = Gradebook {
            students: vec![],
            ..sample()
        };
        assert_eq!(empty.class_average(), None);
    }
}
