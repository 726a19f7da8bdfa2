//! Matcher errors.

use thiserror::Error;

/// Errors raised while building or evaluating a matcher.
///
/// A policy that simply forbids what was expected to be permitted is not an
/// error; that is an ordinary `Ok(false)` from [`crate::Matcher::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherError {
    #[error("{matcher} expects exactly {expected} action, got {given}")]
    InvalidArity {
        matcher: &'static str,
        expected: usize,
        given: usize,
    },

    #[error("'{policy}' does not define action '{action}'")]
    UnknownAction { policy: String, action: String },

    #[error("'{policy}' cannot enumerate its actions, required by only-matchers")]
    ActionsNotEnumerable { policy: String },
}

impl MatcherError {
    pub fn unknown_action(policy: impl Into<String>, action: impl Into<String>) -> Self {
        Self::UnknownAction {
            policy: policy.into(),
            action: action.into(),
        }
    }
}
