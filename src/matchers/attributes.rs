use super::{Matcher, actions::not_evaluated};
use crate::{
    attributes::AttributeSet,
    config::MessagesConfig,
    error::MatcherError,
    evaluator::{AttributeResult, AttributeSetEvaluator, Polarity},
    message::{FailureMessageFormatter, Mismatch},
    policy::Policy,
};

/// Asserts which attributes a policy permits, optionally for one action.
#[derive(Debug, Clone)]
pub struct AttributesMatcher {
    polarity: Polarity,
    attributes: AttributeSet,
    action: Option<String>,
    messages: MessagesConfig,
    last: Option<(FailureMessageFormatter, AttributeResult)>,
}

impl AttributesMatcher {
    pub fn new(polarity: Polarity, attributes: impl Into<AttributeSet>) -> Self {
        Self {
            polarity,
            attributes: attributes.into(),
            action: None,
            messages: MessagesConfig::default(),
            last: None,
        }
    }

    /// Check against the attributes permitted for `action`.
    pub fn for_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_messages(mut self, messages: MessagesConfig) -> Self {
        self.messages = messages;
        self
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Outcome of the most recent evaluation.
    pub fn result(&self) -> Option<&AttributeResult> {
        self.last.as_ref().map(|(_, result)| result)
    }

    fn expectation(&self) -> String {
        format!("{} attributes", self.polarity.verb())
    }

    fn context(&self) -> Option<String> {
        self.action
            .as_ref()
            .map(|action| format!("on action '{action}'"))
    }

    fn render(&self, negated: bool) -> String {
        let expectation = self.expectation();
        let Some((formatter, result)) = &self.last else {
            return not_evaluated(negated, &expectation, &self.attributes);
        };

        // A negated failure reports what held, a plain failure what did not.
        let observed = if negated {
            self.polarity
        } else {
            self.polarity.opposite()
        };
        let offending = result.declared_as(observed);
        let clauses = if offending.is_empty() {
            Vec::new()
        } else {
            vec![Mismatch::new(observed.observed(), offending)]
        };

        formatter.format(
            negated,
            &expectation,
            &self.attributes,
            self.context().as_deref(),
            &clauses,
        )
    }
}

impl Matcher for AttributesMatcher {
    fn matches(&mut self, policy: &dyn Policy) -> Result<bool, MatcherError> {
        let result =
            AttributeSetEvaluator::evaluate(policy, &self.attributes, self.action.as_deref());
        let matched = result.matches(self.polarity);
        let formatter =
            FailureMessageFormatter::new(policy.policy_name(), self.messages.user_label(policy));
        self.last = Some((formatter, result));
        Ok(matched)
    }

    fn failure_message(&self) -> String {
        self.render(false)
    }

    fn failure_message_when_negated(&self) -> String {
        self.render(true)
    }

    fn description(&self) -> String {
        match self.context() {
            Some(context) => format!("{} {} {context}", self.expectation(), self.attributes),
            None => format!("{} {}", self.expectation(), self.attributes),
        }
    }
}
