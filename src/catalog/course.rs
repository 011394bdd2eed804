use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    /// display order is catalog order, no randomization
    pub options: Vec<String>,
    pub correct_option: usize,
}

/// A quiz owned by a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: u32,
    pub title: String,
    pub passing_score: usize,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: u32,
    pub title: String,
    /// derived from the title at load, unique within the catalog
    pub slug: String,
    pub instructor: String,
    pub description: String,
    pub department: String,
    pub quizzes: Vec<Quiz>,
}

/// One row of the semester grade table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRecord {
    pub code: String,
    pub course: String,
    pub grade: String,
    pub credits: u32,
    /// None while the grade is still pending
    pub grade_points: Option<f64>,
}

/// Credit-weighted grade point average over the graded records.
///
/// Records without points (grade still pending) are excluded from both
/// sums. Returns None when nothing has been graded yet.
pub fn grade_point_average(records: &[GradeRecord]) -> Option<f64> {
    let mut weighted = 0.0;
    let mut credits = 0u32;

    for record in records {
        if let Some(points) = record.grade_points {
            weighted += points * record.credits as f64;
            credits += record.credits;
        }
    }

    if credits == 0 {
        return None;
    }

    Some(weighted / credits as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Assignment,
    Exam,
    Lecture,
    Meeting,
}

/// An entry on the academic calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: u32,
    pub title: String,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub course: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(grade: &str, credits: u32, points: Option<f64>) -> GradeRecord {
        GradeRecord {
            code: String::from("CS101"),
            course: String::from("some course"),
            grade: grade.to_string(),
            credits,
            grade_points: points,
        }
    }

    #[test]
    fn gpa_is_weighted_by_credits() {
        let records = vec![record("A", 4, Some(4.0)), record("B", 2, Some(3.0))];

        let gpa = grade_point_average(&records).unwrap();
        assert!((gpa - (22.0 / 6.0)).abs() < 1e-9);
    }

    #[test]
    fn pending_grades_are_excluded() {
        let records = vec![record("A", 4, Some(4.0)), record("Pending", 4, None)];

        assert_eq!(grade_point_average(&records), Some(4.0));
    }

    #[test]
    fn gpa_is_none_with_no_graded_records() {
        assert_eq!(grade_point_average(&[]), None);
        assert_eq!(grade_point_average(&[record("Pending", 3, None)]), None);
    }
}
