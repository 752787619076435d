use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use finance_engine::Confirm;

use crate::error::{AppError, Result};

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().map_err(|err| AppError::Terminal(err.to_string()))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Asks on the terminal and waits for a single `y`/`n` key press.
///
/// With `assume_yes` set (the `--yes` flag) nothing is asked.
#[derive(Debug, Default)]
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl TerminalConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn ask(&self, prompt: &str) -> Result<bool> {
        let _raw = RawModeGuard::enter()?;

        let mut out = std::io::stderr();
        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!("{prompt} [y/N] "))
        )?;
        out.flush()?;

        let answer = loop {
            let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }

            if let Some(answer) = answer_for(code) {
                break answer;
            }
        };

        execute!(out, Print(if answer { "y\r\n" } else { "n\r\n" }))?;
        out.flush()?;
        Ok(answer)
    }
}

/// `y` approves; any other character, Enter or Esc declines. Other keys are
/// ignored.
fn answer_for(code: KeyCode) -> Option<bool> {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char(_) | KeyCode::Enter | KeyCode::Esc => Some(false),
        _ => None,
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            tracing::debug!("confirmation skipped: {prompt}");
            return true;
        }
        match self.ask(prompt) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!("confirmation prompt failed, treating as declined: {err}");
                false
            }
        }
    }
}
