//! Confirmation capability for destructive actions.

/// Asks the user to approve a destructive action.
///
/// Closures `FnMut(&str) -> bool` implement this trait, which keeps tests
/// short:
///
/// ```rust
/// use finance_engine::Confirm;
///
/// let mut asked = Vec::new();
/// let mut decline = |prompt: &str| {
///     asked.push(prompt.to_string());
///     false
/// };
/// assert!(!decline.confirm("Delete this entry?"));
/// assert_eq!(asked, ["Delete this entry?"]);
/// ```
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Approves everything without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Result of a confirmed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Declined,
}
