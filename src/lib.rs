//! Session-logic core for the Campus student dashboard.
//!
//! The crate is split along the system's seams: [`catalog`] is the injected
//! read-only source of course, assignment, grade, and calendar records;
//! [`quiz`] drives one multiple-choice attempt at a time; [`workspace`]
//! manages the compose-and-submit lifecycle for assignments; [`files`]
//! models picker selections and attachments. All state is session-local —
//! nothing is persisted and nothing talks to a network.

pub mod catalog;
pub mod files;
pub mod quiz;
pub mod workspace;
