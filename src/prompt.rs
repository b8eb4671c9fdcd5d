use std::io::{self, BufRead, Write};

use crate::error::DeployError;

pub const ACCEPT_TOKEN: &str = "yes";

/// Human confirmation gate.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> Result<bool, DeployError>;
}

impl<C: Confirm + ?Sized> Confirm for &mut C {
    fn confirm(&mut self, question: &str) -> Result<bool, DeployError> {
        (**self).confirm(question)
    }
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&mut self, question: &str) -> Result<bool, DeployError> {
        (**self).confirm(question)
    }
}

/// Only the line ending is stripped before comparison; `" yes"` declines.
pub fn is_accepted(answer: &str) -> bool {
    answer
        .trim_end_matches(['\n', '\r'])
        .eq_ignore_ascii_case(ACCEPT_TOKEN)
}

/// Asks on stdout, reads one line from stdin. EOF declines.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool, DeployError> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_accepted(&answer))
    }
}

/// Accepts every question (`--yes`).
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, question: &str) -> Result<bool, DeployError> {
        tracing::info!(question = question.trim(), "auto-approved");
        Ok(true)
    }
}
