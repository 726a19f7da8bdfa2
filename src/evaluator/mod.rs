//! Evaluation of declared actions and attributes against a policy.
//!
//! Evaluators are stateless: each call queries the policy afresh and returns
//! an immutable, partitioned result. Whether a result counts as a match
//! depends on the [`Polarity`] of the assertion, so the same result serves
//! both "permit" and "forbid" matchers.

mod actions;
mod attributes;

pub use actions::{ActionMode, ActionResult, ActionSetEvaluator};
pub use attributes::{AttributeResult, AttributeSetEvaluator, PermittedSource};

/// Which way an assertion expects the policy to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Permit,
    Forbid,
}

impl Polarity {
    pub fn opposite(self) -> Self {
        match self {
            Polarity::Permit => Polarity::Forbid,
            Polarity::Forbid => Polarity::Permit,
        }
    }

    /// Verb used for the expectation ("to permit ...").
    pub fn verb(self) -> &'static str {
        match self {
            Polarity::Permit => "permit",
            Polarity::Forbid => "forbid",
        }
    }

    /// Verb used for what the policy actually did ("but forbade ...").
    pub fn observed(self) -> &'static str {
        match self {
            Polarity::Permit => "permitted",
            Polarity::Forbid => "forbade",
        }
    }
}
