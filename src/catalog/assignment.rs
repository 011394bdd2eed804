use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::files::FileAttachment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Completed,
}

impl AssignmentStatus {
    pub fn toggled(self) -> Self {
        match self {
            AssignmentStatus::Pending => AssignmentStatus::Completed,
            AssignmentStatus::Completed => AssignmentStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A course assignment.
///
/// The catalog supplies the record with no submission data; the workspace
/// owns derived copies and is the only mutator of the submission fields.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub id: u32,
    pub title: String,
    pub course: String,
    pub due_date: NaiveDate,
    pub description: String,
    pub status: AssignmentStatus,
    pub priority: Priority,
    pub submitted_text: Option<String>,
    pub submitted_files: Vec<FileAttachment>,
}

impl Assignment {
    /// Days between `today` and the due date; negative once overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    pub fn is_pending(&self) -> bool {
        self.status == AssignmentStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(due: NaiveDate) -> Assignment {
        Assignment {
            id: 1,
            title: String::from("Programming Assignment #3"),
            course: String::from("Introduction to Computer Science"),
            due_date: due,
            description: String::new(),
            status: AssignmentStatus::Pending,
            priority: Priority::High,
            submitted_text: None,
            submitted_files: Vec::new(),
        }
    }

    #[test]
    fn days_until_due_counts_forward_and_back() {
        let due = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        let a = assignment(due);

        let week_before = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();
        assert_eq!(a.days_until_due(week_before), 7);

        assert_eq!(a.days_until_due(due), 0);

        let after = NaiveDate::from_ymd_opt(2025, 4, 18).unwrap();
        assert_eq!(a.days_until_due(after), -3);
    }

    #[test]
    fn toggled_flips_both_ways() {
        assert_eq!(
            AssignmentStatus::Pending.toggled(),
            AssignmentStatus::Completed
        );
        assert_eq!(
            AssignmentStatus::Completed.toggled(),
            AssignmentStatus::Pending
        );
    }
}
