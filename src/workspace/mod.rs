//! Compose-and-submit lifecycle for assignments: one open detail view at a
//! time, a per-assignment store of held draft text, and a roster of
//! assignment copies derived from the catalog.

mod calc;

use std::collections::HashMap;

use log::{debug, warn};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{Assignment, AssignmentStatus, Catalog};
use crate::files::{FileAttachment, FileSelection};

/// Literal placed in the draft text when evaluation fails.
pub const ERROR_MARKER: &str = "Error";

/// The symbol palette, in display order.
pub const MATH_SYMBOLS: &[&str] = &[
    "+", "-", "×", "÷", "=", "≠", "∫", "∑", "∏", "√", "∞", "≈", "±", "≤", "≥", "π", "e", "sin",
    "cos", "tan", "arcsin", "arccos", "arctan", "log", "ln", "exp", "α", "β", "γ", "δ", "Δ", "∈",
    "∉", "∀", "∃", "∧", "∨", "¬",
];

/// The calculator key grid, row by row. `=` evaluates, everything else
/// appends.
pub const CALCULATOR_KEYS: &[&str] = &[
    "7", "8", "9", "/", "4", "5", "6", "*", "1", "2", "3", "-", "0", ".", "=", "+",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("no assignment detail view is open")]
    NoActiveSession,

    #[error("unknown assignment id {0}")]
    UnknownAssignment(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidFileError {
    #[error("file '{0}' is empty")]
    Empty(String),
}

/// What `attach_files` did with each selection in the batch.
#[derive(Debug, Default)]
pub struct AttachOutcome {
    pub attached: Vec<Uuid>,
    pub skipped: Vec<InvalidFileError>,
}

/// The in-progress draft for the assignment whose detail view is open.
#[derive(Debug)]
pub struct ActiveDraft {
    assignment_id: u32,
    text: String,
    files: Vec<FileAttachment>,
}

impl ActiveDraft {
    pub fn assignment_id(&self) -> u32 {
        self.assignment_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn files(&self) -> &[FileAttachment] {
        &self.files
    }
}

pub struct Workspace {
    assignments: Vec<Assignment>,
    drafts: HashMap<u32, String>,
    active: Option<ActiveDraft>,
}

impl Workspace {
    /// Derives the assignment roster from the catalog. Catalog records are
    /// copied, never mutated in place.
    pub fn new(catalog: &dyn Catalog) -> Self {
        Self {
            assignments: catalog.assignments().to_vec(),
            drafts: HashMap::new(),
            active: None,
        }
    }

    /// Opens the detail view for an assignment.
    ///
    /// Seeds the draft text from the last held draft for that assignment,
    /// or empty if none. The working file set always starts empty: held
    /// drafts never retain files.
    pub fn open_detail(&mut self, assignment_id: u32) -> Result<(), WorkspaceError> {
        if !self.assignments.iter().any(|a| a.id == assignment_id) {
            return Err(WorkspaceError::UnknownAssignment(assignment_id));
        }

        let text = self
            .drafts
            .get(&assignment_id)
            .cloned()
            .unwrap_or_default();

        debug!("opened detail view for assignment {}", assignment_id);
        self.active = Some(ActiveDraft {
            assignment_id,
            text,
            files: Vec::new(),
        });
        Ok(())
    }

    /// Closes the detail view without submitting or holding. Unheld edits
    /// are lost and preview handles are released.
    pub fn close_detail(&mut self) {
        if let Some(draft) = self.active.take() {
            debug!(
                "closed detail view for assignment {} ({} files discarded)",
                draft.assignment_id,
                draft.files.len()
            );
        }
    }

    /// Appends the batch of picker selections to the working file set.
    ///
    /// Empty selections are skipped and reported; the rest of the batch
    /// proceeds. Existing attachment order is preserved.
    pub fn attach_files(
        &mut self,
        selections: Vec<FileSelection>,
    ) -> Result<AttachOutcome, WorkspaceError> {
        let draft = self.active_mut()?;

        let mut outcome = AttachOutcome::default();
        for selection in selections {
            if selection.size_bytes == 0 {
                warn!("skipping empty file '{}'", selection.name);
                outcome.skipped.push(InvalidFileError::Empty(selection.name));
                continue;
            }

            let attachment = FileAttachment::from_selection(selection);
            outcome.attached.push(attachment.id);
            draft.files.push(attachment);
        }

        Ok(outcome)
    }

    /// Removes the attachment with the given id, releasing its preview.
    /// Returns false (and changes nothing) when no attachment matches.
    pub fn remove_file(&mut self, file_id: Uuid) -> Result<bool, WorkspaceError> {
        let draft = self.active_mut()?;

        let before = draft.files.len();
        draft.files.retain(|f| f.id != file_id);
        Ok(draft.files.len() != before)
    }

    pub fn set_draft_text(&mut self, text: &str) -> Result<(), WorkspaceError> {
        let draft = self.active_mut()?;
        draft.text = text.to_string();
        Ok(())
    }

    /// Appends a literal token (math symbol, digit, operator) to the end
    /// of the draft text. There is no cursor.
    pub fn append_symbol(&mut self, symbol: &str) -> Result<(), WorkspaceError> {
        let draft = self.active_mut()?;
        draft.text.push_str(symbol);
        Ok(())
    }

    /// Calculator key dispatch: `=` evaluates, any other key appends.
    pub fn press_calculator_key(&mut self, key: &str) -> Result<(), WorkspaceError> {
        if key == "=" {
            self.evaluate_expression()
        } else {
            self.append_symbol(key)
        }
    }

    /// Evaluates the draft text as arithmetic.
    ///
    /// Success replaces the text with the stringified result; any failure,
    /// including empty input, replaces it with the error marker. Never
    /// propagates the evaluation failure itself.
    pub fn evaluate_expression(&mut self) -> Result<(), WorkspaceError> {
        let draft = self.active_mut()?;

        draft.text = match calc::evaluate(&draft.text) {
            Ok(value) => value.to_string(),
            Err(err) => {
                debug!("expression rejected: {}", err);
                ERROR_MARKER.to_string()
            }
        };
        Ok(())
    }

    /// Finalizes the open assignment: marks it completed, records the
    /// draft text and files as the submission, stores the text as the held
    /// draft, and closes the detail view.
    pub fn submit(&mut self) -> Result<(), WorkspaceError> {
        let draft = self.active.take().ok_or(WorkspaceError::NoActiveSession)?;

        let assignment = self
            .assignments
            .iter_mut()
            .find(|a| a.id == draft.assignment_id)
            .expect("open drafts always reference a roster assignment");

        assignment.status = AssignmentStatus::Completed;
        assignment.submitted_text = Some(draft.text.clone());
        assignment.submitted_files = draft.files;

        self.drafts.insert(draft.assignment_id, draft.text);
        debug!("submitted assignment {}", draft.assignment_id);
        Ok(())
    }

    /// Checkpoints the draft text without completing the assignment.
    ///
    /// The detail view stays open and the working files are untouched,
    /// but files are never part of the held draft: only the text survives
    /// a reopen.
    pub fn hold(&mut self) -> Result<(), WorkspaceError> {
        let draft = self.active.as_ref().ok_or(WorkspaceError::NoActiveSession)?;

        self.drafts
            .insert(draft.assignment_id, draft.text.clone());
        debug!("held draft for assignment {}", draft.assignment_id);
        Ok(())
    }

    /// Flips an assignment between pending and completed straight from the
    /// list view, bypassing the draft flow: no text or files are touched,
    /// so a completed assignment may carry no submission record. Returns
    /// the new status, or None for an unknown id.
    pub fn toggle_status(&mut self, assignment_id: u32) -> Option<AssignmentStatus> {
        let assignment = self
            .assignments
            .iter_mut()
            .find(|a| a.id == assignment_id)?;

        assignment.status = assignment.status.toggled();
        debug!(
            "toggled assignment {} to {:?}",
            assignment_id, assignment.status
        );
        Some(assignment.status)
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn assignment(&self, assignment_id: u32) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == assignment_id)
    }

    pub fn active(&self) -> Option<&ActiveDraft> {
        self.active.as_ref()
    }

    pub fn held_draft(&self, assignment_id: u32) -> Option<&str> {
        self.drafts.get(&assignment_id).map(|s| s.as_str())
    }

    fn active_mut(&mut self) -> Result<&mut ActiveDraft, WorkspaceError> {
        self.active.as_mut().ok_or(WorkspaceError::NoActiveSession)
    }
}
