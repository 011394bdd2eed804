mod assignment;
mod course;
mod load;

pub use assignment::{Assignment, AssignmentStatus, Priority};
pub use course::{
    grade_point_average, CalendarEvent, Course, EventKind, GradeRecord, Question, Quiz,
};
pub use load::StaticCatalog;

/// Read-only source of course, assignment, grade, and calendar records.
///
/// The session layers never mutate catalog-sourced records in place; they
/// derive copies and mutate those.
pub trait Catalog {
    fn courses(&self) -> &[Course];
    fn assignments(&self) -> &[Assignment];
    fn grades(&self) -> &[GradeRecord];
    fn events(&self) -> &[CalendarEvent];

    fn course(&self, id: u32) -> Option<&Course> {
        self.courses().iter().find(|c| c.id == id)
    }

    fn course_by_slug(&self, slug: &str) -> Option<&Course> {
        self.courses().iter().find(|c| c.slug == slug)
    }

    fn quiz(&self, course_id: u32, quiz_id: u32) -> Option<&Quiz> {
        self.course(course_id)?
            .quizzes
            .iter()
            .find(|q| q.id == quiz_id)
    }
}
