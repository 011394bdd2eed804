//! End-to-end runs of both session flows against the built-in catalog,
//! exercising only the public API.

use campus::catalog::{AssignmentStatus, Catalog, StaticCatalog};
use campus::files::FileSelection;
use campus::quiz::{Progress, QuizSession};
use campus::workspace::{Workspace, ERROR_MARKER};

#[test]
fn programming_basics_quiz_full_run() {
    let catalog = StaticCatalog::builtin();
    let quiz = catalog.quiz(1, 1).expect("course 1 has quiz 1");

    let mut session = QuizSession::new();
    session.start(quiz).unwrap();

    // correct answers are 1, 1, 2; miss the middle one on purpose
    assert_eq!(session.answer(1).unwrap(), Some(true));
    assert_eq!(session.advance().unwrap(), Progress::NextQuestion(1));

    assert_eq!(session.answer(0).unwrap(), Some(false));
    assert_eq!(session.advance().unwrap(), Progress::NextQuestion(2));

    assert_eq!(session.answer(2).unwrap(), Some(true));
    let Progress::Completed(result) = session.advance().unwrap() else {
        panic!("third advance completes the quiz");
    };

    assert_eq!(result.score, 2);
    assert_eq!(result.total, 3);
    // passing score for this quiz is 2
    assert!(result.passed);
    assert!(session.attempt().is_none());
}

#[test]
fn dismissing_the_quiz_dialog_records_nothing() {
    let catalog = StaticCatalog::builtin();
    let quiz = catalog.quiz(1, 1).unwrap();

    let mut session = QuizSession::new();
    session.start(quiz).unwrap();
    session.answer(1).unwrap();
    session.dismiss();

    assert!(session.attempt().is_none());

    // a fresh start begins from scratch
    session.start(quiz).unwrap();
    let attempt = session.attempt().unwrap();
    assert_eq!(attempt.current_index(), 0);
    assert_eq!(attempt.score(), 0);
}

#[test]
fn compose_hold_and_submit_an_assignment() {
    let catalog = StaticCatalog::builtin();
    let mut workspace = Workspace::new(&catalog);

    workspace.open_detail(1).unwrap();
    workspace.set_draft_text("area = ").unwrap();
    workspace.append_symbol("π").unwrap();
    workspace.hold().unwrap();

    // reopening restores the held text but never the files
    workspace
        .attach_files(vec![FileSelection::new(
            "scratch.txt",
            "text/plain",
            vec![1, 2],
        )])
        .unwrap();
    workspace.open_detail(1).unwrap();
    assert_eq!(workspace.active().unwrap().text(), "area = π");
    assert!(workspace.active().unwrap().files().is_empty());

    workspace
        .attach_files(vec![FileSelection::new(
            "diagram.png",
            "image/png",
            vec![0xFF; 128],
        )])
        .unwrap();
    workspace.submit().unwrap();

    let assignment = workspace.assignment(1).unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Completed);
    assert!(assignment.submitted_text.as_deref().unwrap().ends_with('π'));
    assert_eq!(assignment.submitted_files.len(), 1);
    assert!(assignment.submitted_files[0].preview.is_some());

    // the catalog record itself is untouched
    assert_eq!(
        catalog.assignments()[0].status,
        AssignmentStatus::Pending
    );
}

#[test]
fn calculator_session_recovers_from_a_bad_expression() {
    let catalog = StaticCatalog::builtin();
    let mut workspace = Workspace::new(&catalog);
    workspace.open_detail(4).unwrap();

    workspace.set_draft_text("2+").unwrap();
    workspace.evaluate_expression().unwrap();
    assert_eq!(workspace.active().unwrap().text(), ERROR_MARKER);

    // the session is still usable after the error marker
    workspace.set_draft_text("(2+3)*4").unwrap();
    workspace.evaluate_expression().unwrap();
    assert_eq!(workspace.active().unwrap().text(), "20");

    workspace.submit().unwrap();
    assert_eq!(
        workspace.assignment(4).unwrap().submitted_text.as_deref(),
        Some("20")
    );
}
