use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use dotenv::dotenv;
use serde::Serialize;

use campus::catalog::{grade_point_average, Assignment, Catalog, StaticCatalog};
use campus::files::FileSelection;
use campus::quiz::{Progress, QuizResult, QuizSession};
use campus::workspace::Workspace;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub struct Config {
    pub catalog_path: Option<PathBuf>,
}

fn parse_config(mut args: impl Iterator<Item = String>) -> Config {
    // positional argument wins over the CATALOG_PATH environment variable
    let catalog_path = args
        .next()
        .or_else(|| env::var("CATALOG_PATH").ok())
        .map(PathBuf::from);

    Config { catalog_path }
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    let config = parse_config(env::args().skip(1));

    let catalog = match &config.catalog_path {
        Some(path) => StaticCatalog::from_path(path)
            .context(format!("could not load catalog from {}", path.display()))?,
        None => StaticCatalog::builtin(),
    };

    let today = Local::now().date_naive();

    print_pending_assignments(&catalog, today);

    let quiz_result = run_quiz(&catalog).context("quiz walkthrough failed")?;
    let submitted = run_submission(&catalog).context("submission walkthrough failed")?;

    print_summary(&catalog, &quiz_result, &submitted)?;

    Ok(())
}

fn print_pending_assignments(catalog: &StaticCatalog, today: NaiveDate) {
    let mut pending: Vec<&Assignment> = catalog
        .assignments()
        .iter()
        .filter(|a| a.is_pending())
        .collect();
    pending.sort_by_key(|a| a.due_date);

    println!("{BOLD}Pending assignments{RESET}");
    for assignment in &pending {
        println!(
            "  {} — {} ({})",
            assignment.title,
            assignment.course,
            due_label(assignment.days_until_due(today))
        );
    }
    println!();
}

fn due_label(days_left: i64) -> String {
    if days_left < 0 {
        format!("overdue by {} days", -days_left)
    } else if days_left == 0 {
        String::from("due today")
    } else if days_left == 1 {
        String::from("due tomorrow")
    } else {
        format!("due in {} days", days_left)
    }
}

/// Walks the first quiz of the first course start to finish, always picking
/// the correct option.
fn run_quiz(catalog: &StaticCatalog) -> anyhow::Result<QuizResult> {
    let course = catalog.courses().first().context("catalog has no courses")?;
    let quiz = course
        .quizzes
        .first()
        .context(format!("course '{}' has no quizzes", course.title))?;

    println!("{BOLD}{}{RESET} ({} questions)", quiz.title, quiz.questions.len());

    let mut session = QuizSession::new();
    session.start(quiz)?;

    loop {
        let (prompt, pick) = {
            let attempt = session.attempt().context("attempt still active")?;
            let question = attempt.current();
            (question.prompt.clone(), question.correct_option)
        };

        let correct = session.answer(pick)?.context("first answer is accepted")?;
        println!(
            "  {} -> option {} ({})",
            prompt,
            pick,
            if correct { "correct" } else { "incorrect" }
        );

        if let Progress::Completed(result) = session.advance()? {
            println!(
                "  finished with {BOLD}{}/{}{RESET}, {}\n",
                result.score,
                result.total,
                if result.passed { "passed" } else { "failed" }
            );
            return Ok(result);
        }
    }
}

/// Composes and submits the first pending assignment: held draft text, a
/// calculator round, and one attachment.
fn run_submission(catalog: &StaticCatalog) -> anyhow::Result<SubmittedAssignment> {
    let mut workspace = Workspace::new(catalog);

    let assignment_id = workspace
        .assignments()
        .iter()
        .find(|a| a.is_pending())
        .context("no pending assignment to submit")?
        .id;

    // checkpoint some text, then prove it survives a reopen
    workspace.open_detail(assignment_id)?;
    workspace.set_draft_text("work in progress")?;
    workspace.hold()?;
    workspace.open_detail(assignment_id)?;
    let restored = workspace
        .active()
        .context("detail view is open")?
        .text()
        .to_string();
    println!("{BOLD}Assignment workspace{RESET}");
    println!("  held draft restored: '{}'", restored);

    for key in ["2", "+", "2", "="] {
        workspace.press_calculator_key(key)?;
    }
    println!(
        "  calculator left the draft at: '{}'",
        workspace.active().context("detail view is open")?.text()
    );

    workspace.attach_files(vec![FileSelection::new(
        "solution.txt",
        "text/plain",
        b"linked list implementation".to_vec(),
    )])?;
    workspace.append_symbol(" items, see ")?;
    workspace.append_symbol("π")?;
    workspace.submit()?;

    let assignment = workspace
        .assignment(assignment_id)
        .context("submitted assignment is on the roster")?;
    println!(
        "  submitted '{}' with {} file(s)\n",
        assignment.title,
        assignment.submitted_files.len()
    );

    Ok(SubmittedAssignment {
        title: assignment.title.clone(),
        text: assignment.submitted_text.clone().unwrap_or_default(),
        files: assignment.submitted_files.len(),
    })
}

#[derive(Serialize, Debug)]
struct SubmittedAssignment {
    title: String,
    text: String,
    files: usize,
}

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum SummaryEntry<'a> {
    Gpa(Option<f64>),
    Quiz(&'a QuizResult),
    Submission(&'a SubmittedAssignment),
}

fn print_summary(
    catalog: &StaticCatalog,
    quiz_result: &QuizResult,
    submitted: &SubmittedAssignment,
) -> anyhow::Result<()> {
    let mut map = BTreeMap::<&str, SummaryEntry>::new();
    map.insert("gpa", SummaryEntry::Gpa(grade_point_average(catalog.grades())));
    map.insert("quiz", SummaryEntry::Quiz(quiz_result));
    map.insert("submission", SummaryEntry::Submission(submitted));

    let content = serde_yaml_ng::to_string(&map).context("failed to serialize session summary")?;

    println!("{BOLD}Session summary{RESET}");
    println!("---");
    print!("{}", content);
    println!("---");

    Ok(())
}
