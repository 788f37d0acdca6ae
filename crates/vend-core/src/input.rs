//! # Input Sources
//!
//! The machine never reads a terminal itself. Whoever drives it hands over a
//! `TokenSource`, and the purchase flow pulls one token at a time from it:
//!
//! ```text
//! ┌──────────────┐  next_token()   ┌─────────────────┐
//! │ TokenSource  │ ◄────────────── │ VendingMachine  │
//! │ (stdin, test │ ──────────────► │   pay_for()     │
//! │  script ...) │  Some("£1")     └─────────────────┘
//! └──────────────┘  ... None = no more input
//! ```

use std::collections::VecDeque;

/// Supplies discrete string tokens, e.g. item names or coin labels.
pub trait TokenSource {
    /// Next token, or `None` once the collaborator has stopped supplying
    /// input.
    fn next_token(&mut self) -> Option<String>;
}

impl<F> TokenSource for F
where
    F: FnMut() -> Option<String>,
{
    fn next_token(&mut self) -> Option<String> {
        self()
    }
}

/// A finite, pre-recorded list of tokens.
///
/// ```rust
/// use vend_core::input::{ScriptedTokens, TokenSource};
///
/// let mut tokens = ScriptedTokens::new(["50p", "50p"]);
/// assert_eq!(tokens.next_token().as_deref(), Some("50p"));
/// assert_eq!(tokens.remaining(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedTokens {
    tokens: VecDeque<String>,
}

impl ScriptedTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedTokens {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl TokenSource for ScriptedTokens {
    fn next_token(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }
}

/// Returns the same token forever, like a customer who keeps feeding the
/// slot the same coin.
#[derive(Debug, Clone)]
pub struct RepeatToken {
    token: String,
}

impl RepeatToken {
    pub fn new(token: impl Into<String>) -> Self {
        RepeatToken {
            token: token.into(),
        }
    }
}

impl TokenSource for RepeatToken {
    fn next_token(&mut self) -> Option<String> {
        Some(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_tokens_run_out() {
        let mut tokens = ScriptedTokens::new(["£1", "20p"]);
        assert_eq!(tokens.next_token().as_deref(), Some("£1"));
        assert_eq!(tokens.next_token().as_deref(), Some("20p"));
        assert_eq!(tokens.next_token(), None);
    }

    #[test]
    fn test_repeat_token_never_runs_out() {
        let mut tokens = RepeatToken::new("£2");
        for _ in 0..10 {
            assert_eq!(tokens.next_token().as_deref(), Some("£2"));
        }
    }

    #[test]
    fn test_closure_source() {
        let mut calls = 0;
        let mut source = || {
            calls += 1;
            (calls <= 2).then(|| "10p".to_string())
        };
        assert_eq!(source.next_token().as_deref(), Some("10p"));
        assert_eq!(source.next_token().as_deref(), Some("10p"));
        assert_eq!(source.next_token(), None);
    }
}
