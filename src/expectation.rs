//! Bridge from matchers to Rust's test harness.
//!
//! ```
//! use policy_matchers::{StaticPolicy, expect, forbid_actions, permit_only_actions};
//!
//! let policy = StaticPolicy::new("ArticlePolicy")
//!     .with_user("alice")
//!     .with_action("show", true)
//!     .with_action("destroy", false);
//!
//! expect(&policy).to(permit_only_actions(["show"]));
//! expect(&policy).not_to(forbid_actions(["show"]));
//! ```

use thiserror::Error;

use crate::{error::MatcherError, matchers::Matcher, policy::Policy};

/// Why an expectation did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionFailure {
    /// The policy answered differently than expected.
    #[error("{0}")]
    Mismatch(String),

    /// The matcher could not be evaluated.
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

/// Create an expectation about `policy`.
pub fn expect(policy: &dyn Policy) -> Expectation<'_> {
    Expectation { policy }
}

/// A policy awaiting a matcher.
pub struct Expectation<'a> {
    policy: &'a dyn Policy,
}

impl Expectation<'_> {
    /// Panic with the matcher's failure message unless it matches.
    #[track_caller]
    pub fn to(&self, matcher: impl Matcher) {
        if let Err(failure) = self.check(matcher) {
            panic!("{failure}");
        }
    }

    /// Panic with the matcher's negated failure message if it matches.
    #[track_caller]
    pub fn not_to(&self, matcher: impl Matcher) {
        if let Err(failure) = self.check_not(matcher) {
            panic!("{failure}");
        }
    }

    #[track_caller]
    pub fn to_not(&self, matcher: impl Matcher) {
        self.not_to(matcher);
    }

    /// Non-panicking form of [`to`](Expectation::to).
    pub fn check(&self, mut matcher: impl Matcher) -> Result<(), AssertionFailure> {
        if matcher.matches(self.policy)? {
            Ok(())
        } else {
            tracing::debug!(
                policy = %self.policy.policy_name(),
                matcher = %matcher.description(),
                "Expectation failed"
            );
            Err(AssertionFailure::Mismatch(matcher.failure_message()))
        }
    }

    /// Non-panicking form of [`not_to`](Expectation::not_to).
    pub fn check_not(&self, mut matcher: impl Matcher) -> Result<(), AssertionFailure> {
        if matcher.does_not_match(self.policy)? {
            Ok(())
        } else {
            tracing::debug!(
                policy = %self.policy.policy_name(),
                matcher = %matcher.description(),
                "Negated expectation failed"
            );
            Err(AssertionFailure::Mismatch(
                matcher.failure_message_when_negated(),
            ))
        }
    }
}
