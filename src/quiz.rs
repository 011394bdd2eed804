use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Question, Quiz};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuizError {
    #[error("quiz '{0}' has no questions")]
    InvalidQuiz(String),

    #[error("no quiz attempt is active")]
    NoActiveAttempt,
}

/// Final tally reported when an attempt completes. Nothing else about the
/// attempt is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub passed: bool,
}

/// Outcome of an `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// the current question has no locked-in answer; state unchanged
    AwaitingAnswer,
    /// moved on to the question at this index
    NextQuestion(usize),
    /// the attempt is finished and has been discarded
    Completed(QuizResult),
}

/// One in-progress traversal of a quiz's questions.
///
/// The attempt walks the questions in catalog order, locks in exactly one
/// answer per question, and accumulates the score. It holds a derived copy
/// of the quiz, never a live catalog reference.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    quiz: Quiz,
    current_question: usize,
    selected_answer: Option<usize>,
    answers: Vec<usize>,
    score: usize,
}

impl QuizAttempt {
    fn new(quiz: Quiz) -> Result<Self, QuizError> {
        if quiz.questions.is_empty() {
            return Err(QuizError::InvalidQuiz(quiz.title));
        }

        Ok(Self {
            quiz,
            current_question: 0,
            selected_answer: None,
            answers: Vec::new(),
            score: 0,
        })
    }

    /// Locks in an answer for the current question.
    ///
    /// The first call per question is final: it records the choice, scores
    /// it, and returns whether it was correct. Further calls before the
    /// next `advance` are no-ops returning None. An out-of-range index is
    /// accepted and simply scores as incorrect.
    pub fn answer(&mut self, option_index: usize) -> Option<bool> {
        if self.selected_answer.is_some() {
            return None;
        }

        let correct = option_index == self.current().correct_option;
        self.selected_answer = Some(option_index);
        self.answers.push(option_index);
        if correct {
            self.score += 1;
        }

        debug!(
            "question {}/{} answered with option {} ({})",
            self.current_question + 1,
            self.quiz.questions.len(),
            option_index,
            if correct { "correct" } else { "incorrect" }
        );

        Some(correct)
    }

    /// Moves past the current question once it has an answer.
    fn advance(&mut self) -> Progress {
        if self.selected_answer.is_none() {
            return Progress::AwaitingAnswer;
        }

        let next = self.current_question + 1;
        if next < self.quiz.questions.len() {
            self.current_question = next;
            self.selected_answer = None;
            Progress::NextQuestion(next)
        } else {
            Progress::Completed(self.result())
        }
    }

    fn result(&self) -> QuizResult {
        QuizResult {
            score: self.score,
            total: self.quiz.questions.len(),
            passed: self.score >= self.quiz.passing_score,
        }
    }

    pub fn current(&self) -> &Question {
        &self.quiz.questions[self.current_question]
    }

    pub fn current_index(&self) -> usize {
        self.current_question
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn recorded_answers(&self) -> &[usize] {
        &self.answers
    }

    pub fn question_count(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question + 1 == self.quiz.questions.len()
    }

    pub fn quiz_title(&self) -> &str {
        &self.quiz.title
    }
}

/// Drives at most one quiz attempt at a time, mirroring the quiz dialog:
/// starting installs an attempt, dismissing throws it away, and completing
/// the last question discards it with only the final tally surviving.
#[derive(Debug, Default)]
pub struct QuizSession {
    attempt: Option<QuizAttempt>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh attempt on the given quiz. An attempt already in
    /// progress is discarded, as when the dialog is reopened.
    pub fn start(&mut self, quiz: &Quiz) -> Result<(), QuizError> {
        if self.attempt.is_some() {
            warn!("discarding in-progress attempt to start '{}'", quiz.title);
        }

        debug!("starting quiz '{}'", quiz.title);
        self.attempt = Some(QuizAttempt::new(quiz.clone())?);
        Ok(())
    }

    pub fn answer(&mut self, option_index: usize) -> Result<Option<bool>, QuizError> {
        let attempt = self.attempt.as_mut().ok_or(QuizError::NoActiveAttempt)?;
        Ok(attempt.answer(option_index))
    }

    pub fn advance(&mut self) -> Result<Progress, QuizError> {
        let attempt = self.attempt.as_mut().ok_or(QuizError::NoActiveAttempt)?;

        let progress = attempt.advance();
        if let Progress::Completed(result) = progress {
            debug!(
                "quiz '{}' completed: {}/{}",
                attempt.quiz_title(),
                result.score,
                result.total
            );
            self.attempt = None;
        }

        Ok(progress)
    }

    /// Abandons any attempt unconditionally; no score is recorded.
    pub fn dismiss(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            debug!("dismissed attempt on '{}'", attempt.quiz_title());
        }
    }

    pub fn attempt(&self) -> Option<&QuizAttempt> {
        self.attempt.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.attempt.is_some()
    }
}
