use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Ok};
use chrono::NaiveDate;
use serde_json::Value;

use super::assignment::{Assignment, AssignmentStatus, Priority};
use super::course::{CalendarEvent, Course, EventKind, GradeRecord, Question, Quiz};
use super::Catalog;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// A catalog loaded once from JSON and held in memory.
#[derive(Debug)]
pub struct StaticCatalog {
    courses: Vec<Course>,
    assignments: Vec<Assignment>,
    grades: Vec<GradeRecord>,
    events: Vec<CalendarEvent>,
}

impl StaticCatalog {
    /// The mock catalog compiled into the crate.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).expect("embedded catalog is valid")
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .context(format!("failed to read catalog file {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let root: Value = serde_json::from_str(raw).context("catalog is not valid JSON")?;

        Ok(Self {
            courses: collect_courses(&root).context("failed to collect courses")?,
            assignments: collect_assignments(&root)
                .context("failed to collect assignments")?,
            grades: collect_grades(&root).context("failed to collect grades")?,
            events: collect_events(&root).context("failed to collect events")?,
        })
    }
}

impl Catalog for StaticCatalog {
    fn courses(&self) -> &[Course] {
        &self.courses
    }

    fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    fn grades(&self) -> &[GradeRecord] {
        &self.grades
    }

    fn events(&self) -> &[CalendarEvent] {
        &self.events
    }
}

fn collect_courses(root: &Value) -> anyhow::Result<Vec<Course>> {
    let mut slugger = github_slugger::Slugger::default();

    root.get("courses")
        .and_then(|c| c.as_array())
        .context("no courses in catalog")?
        .iter()
        .enumerate()
        .map(|(index, course)| {
            let id = get_attribute(course, "id").context(format!("course '{}' must set id", index))?;
            let title: String = get_attribute(course, "title")
                .context(format!("course '{}' must set title", index))?;
            let slug = slugger.slug(&title);

            let instructor = get_attribute(course, "instructor")
                .context(format!("course '{}' must set instructor", &title))?;
            let description = get_attribute(course, "description")
                .context(format!("course '{}' must set description", &title))?;
            let department = get_attribute(course, "department")
                .context(format!("course '{}' must set department", &title))?;

            let quizzes =
                parse_quizzes(course).context(format!("parse quizzes for course '{}'", &title))?;

            Ok(Course {
                id,
                title,
                slug,
                instructor,
                description,
                department,
                quizzes,
            })
        })
        .collect()
}

fn parse_quizzes(course: &Value) -> anyhow::Result<Vec<Quiz>> {
    let Some(quizzes) = course.get("quizzes").and_then(|q| q.as_array()) else {
        return Ok(Vec::new());
    };

    quizzes
        .iter()
        .map(|quiz| {
            let id: u32 = get_attribute(quiz, "id").context("quiz has no id")?;
            let title: String = get_attribute(quiz, "title")
                .context(format!("quiz '{}' has no title", id))?;
            let passing_score = get_attribute(quiz, "passingScore")
                .context(format!("quiz '{}' has no passingScore", &title))?;

            let questions = quiz
                .get("questions")
                .and_then(|q| q.as_array())
                .context(format!("quiz '{}' has no questions", &title))?
                .iter()
                .enumerate()
                .map(|(index, question)| {
                    let prompt: String = get_attribute(question, "question").context(format!(
                        "question '{}' in quiz '{}' has no question text",
                        index, &title
                    ))?;
                    let correct_option =
                        get_attribute(question, "correctAnswer").context(format!(
                            "question '{}' in quiz '{}' has no correctAnswer",
                            index, &title
                        ))?;

                    let options = question
                        .get("options")
                        .and_then(|o| o.as_array())
                        .context(format!(
                            "question '{}' in quiz '{}' has no options",
                            index, &title
                        ))?
                        .iter()
                        .map(|o| o.as_str().map(|s| s.to_string()))
                        .collect::<Option<Vec<String>>>()
                        .context(format!(
                            "question '{}' in quiz '{}' has a non-string option",
                            index, &title
                        ))?;

                    Ok(Question {
                        prompt,
                        options,
                        correct_option,
                    })
                })
                .collect::<anyhow::Result<Vec<Question>>>()?;

            Ok(Quiz {
                id,
                title,
                passing_score,
                questions,
            })
        })
        .collect()
}

fn collect_assignments(root: &Value) -> anyhow::Result<Vec<Assignment>> {
    root.get("assignments")
        .and_then(|a| a.as_array())
        .context("no assignments in catalog")?
        .iter()
        .enumerate()
        .map(|(index, assignment)| {
            let id = get_attribute(assignment, "id")
                .context(format!("assignment '{}' must set id", index))?;
            let title: String = get_attribute(assignment, "title")
                .context(format!("assignment '{}' must set title", index))?;
            let course = get_attribute(assignment, "course")
                .context(format!("assignment '{}' must set course", &title))?;
            let description = get_attribute(assignment, "description")
                .context(format!("assignment '{}' must set description", &title))?;

            let due_date = parse_date(assignment, "dueDate")
                .context(format!("assignment '{}' must set dueDate", &title))?;

            let status_raw: String = get_attribute(assignment, "status")
                .context(format!("assignment '{}' must set status", &title))?;
            let status = match status_raw.as_str() {
                "pending" => AssignmentStatus::Pending,
                "completed" => AssignmentStatus::Completed,
                other => anyhow::bail!("assignment '{}' has unknown status '{}'", &title, other),
            };

            let priority_raw: String = get_attribute(assignment, "priority")
                .context(format!("assignment '{}' must set priority", &title))?;
            let priority = match priority_raw.as_str() {
                "high" => Priority::High,
                "medium" => Priority::Medium,
                "low" => Priority::Low,
                other => anyhow::bail!("assignment '{}' has unknown priority '{}'", &title, other),
            };

            Ok(Assignment {
                id,
                title,
                course,
                due_date,
                description,
                status,
                priority,
                submitted_text: None,
                submitted_files: Vec::new(),
            })
        })
        .collect()
}

fn collect_grades(root: &Value) -> anyhow::Result<Vec<GradeRecord>> {
    root.get("grades")
        .and_then(|g| g.as_array())
        .context("no grades in catalog")?
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let code: String = get_attribute(record, "code")
                .context(format!("grade record '{}' must set code", index))?;
            let course = get_attribute(record, "course")
                .context(format!("grade record '{}' must set course", &code))?;
            let grade = get_attribute(record, "grade")
                .context(format!("grade record '{}' must set grade", &code))?;
            let credits = get_attribute(record, "credits")
                .context(format!("grade record '{}' must set credits", &code))?;

            // null while the grade is pending
            let grade_points = get_attribute(record, "gradePoints");

            Ok(GradeRecord {
                code,
                course,
                grade,
                credits,
                grade_points,
            })
        })
        .collect()
}

fn collect_events(root: &Value) -> anyhow::Result<Vec<CalendarEvent>> {
    root.get("events")
        .and_then(|e| e.as_array())
        .context("no events in catalog")?
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let id = get_attribute(event, "id")
                .context(format!("event '{}' must set id", index))?;
            let title: String = get_attribute(event, "title")
                .context(format!("event '{}' must set title", index))?;
            let course = get_attribute(event, "course")
                .context(format!("event '{}' must set course", &title))?;
            let description = get_attribute(event, "description")
                .context(format!("event '{}' must set description", &title))?;

            let date =
                parse_date(event, "date").context(format!("event '{}' must set date", &title))?;

            let kind_raw: String = get_attribute(event, "type")
                .context(format!("event '{}' must set type", &title))?;
            let kind = match kind_raw.as_str() {
                "assignment" => EventKind::Assignment,
                "exam" => EventKind::Exam,
                "lecture" => EventKind::Lecture,
                "meeting" => EventKind::Meeting,
                other => anyhow::bail!("event '{}' has unknown type '{}'", &title, other),
            };

            Ok(CalendarEvent {
                id,
                title,
                date,
                kind,
                course,
                description,
            })
        })
        .collect()
}

fn parse_date(value: &Value, attribute: &str) -> anyhow::Result<NaiveDate> {
    let raw: String = get_attribute(value, attribute)
        .context(format!("missing date field '{}'", attribute))?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .context(format!("'{}' is not a yyyy-mm-dd date", raw))
}

fn get_attribute<T>(value: &Value, attribute: &str) -> Option<T>
where
    T: FromStr,
{
    value.get(attribute).and_then(|v| match v {
        Value::String(s) => T::from_str(s).ok(),
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                T::from_str(&f.to_string()).ok()
            } else {
                None
            }
        }
        Value::Bool(b) => T::from_str(&b.to_string()).ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = StaticCatalog::builtin();

        assert_eq!(catalog.assignments().len(), 6);
        assert_eq!(catalog.grades().len(), 6);
        assert_eq!(catalog.events().len(), 6);
        assert!(!catalog.courses().is_empty());

        let quiz = catalog.quiz(1, 1).expect("course 1 has quiz 1");
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(quiz.passing_score, 2);
    }

    #[test]
    fn course_slugs_are_derived_from_titles() {
        let catalog = StaticCatalog::builtin();

        let course = catalog
            .course_by_slug("introduction-to-computer-science")
            .expect("slug lookup");
        assert_eq!(course.id, 1);
    }

    #[test]
    fn missing_field_names_the_record() {
        let raw = r#"{
            "courses": [],
            "assignments": [{"id": 9, "title": "Essay", "course": "History"}],
            "grades": [],
            "events": []
        }"#;

        let err = StaticCatalog::from_json(raw).unwrap_err();
        assert!(format!("{:#}", err).contains("assignment 'Essay' must set description"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let raw = r#"{
            "courses": [],
            "assignments": [{
                "id": 1,
                "title": "Essay",
                "course": "History",
                "description": "write",
                "dueDate": "2025-04-01",
                "status": "archived",
                "priority": "low"
            }],
            "grades": [],
            "events": []
        }"#;

        let err = StaticCatalog::from_json(raw).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown status 'archived'"));
    }

    #[test]
    fn pending_grade_has_no_points() {
        let catalog = StaticCatalog::builtin();

        let pending = catalog
            .grades()
            .iter()
            .find(|g| g.grade == "Pending")
            .expect("one pending grade");
        assert!(pending.grade_points.is_none());
    }
}
