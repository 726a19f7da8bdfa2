//! Failure message rendering.
//!
//! Every matcher renders through one template:
//!
//! ```text
//! expected '<policy>' [not ]to <expectation> <declared>[ <context>], but <observed> <items>[ and <observed> <items>] for '<user>'
//! ```
//!
//! The expectation verb and the observed verbs are supplied by the caller,
//! so "permit" and "forbid" matchers, negated or not, share the wording.

use std::fmt::{self, Display};

/// One "what actually happened" clause, e.g. `forbade [create]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub observed: &'static str,
    pub items: String,
}

impl Mismatch {
    pub fn new(observed: &'static str, items: impl Display) -> Self {
        Self {
            observed,
            items: items.to_string(),
        }
    }
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.observed, self.items)
    }
}

/// Renders failure messages for one policy and subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureMessageFormatter {
    policy_name: String,
    user_label: String,
}

impl FailureMessageFormatter {
    pub fn new(policy_name: impl Into<String>, user_label: impl Into<String>) -> Self {
        Self {
            policy_name: policy_name.into(),
            user_label: user_label.into(),
        }
    }

    pub fn policy_name(&self) -> &str {
        &self.policy_name
    }

    pub fn user_label(&self) -> &str {
        &self.user_label
    }

    /// Render the message.
    ///
    /// `context` is appended to the expectation as is (e.g.
    /// "on action 'create'"). Empty `mismatches` drop the "but" clause.
    pub fn format(
        &self,
        negated: bool,
        expectation: &str,
        declared: &dyn Display,
        context: Option<&str>,
        mismatches: &[Mismatch],
    ) -> String {
        let to = if negated { "not to" } else { "to" };
        let mut message = format!(
            "expected '{}' {to} {expectation} {declared}",
            self.policy_name
        );

        if let Some(context) = context {
            message.push(' ');
            message.push_str(context);
        }

        if !mismatches.is_empty() {
            let clauses = mismatches
                .iter()
                .map(Mismatch::to_string)
                .collect::<Vec<_>>()
                .join(" and ");
            message.push_str(", but ");
            message.push_str(&clauses);
        }

        message.push_str(&format!(" for '{}'", self.user_label));
        message
    }
}
