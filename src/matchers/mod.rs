//! Matchers: the assertion units handed to [`expect`](crate::expect).
//!
//! | Constructor | Passes when |
//! |---|---|
//! | [`permit_actions`] | every declared action is permitted |
//! | [`forbid_actions`] | every declared action is forbidden |
//! | [`permit_only_actions`] | declared actions permitted, all others forbidden |
//! | [`forbid_only_actions`] | declared actions forbidden, all others permitted |
//! | [`permit_action`] / [`forbid_action`] | as above, for exactly one action |
//! | [`permit_attributes`] / [`permit_attribute`] | every declared attribute is permitted |
//! | [`forbid_attributes`] / [`forbid_attribute`] | no declared attribute is permitted |
//!
//! Attribute matchers take an optional action context through
//! [`AttributesMatcher::for_action`].

mod actions;
mod attributes;

pub use actions::ActionsMatcher;
pub use attributes::AttributesMatcher;

use crate::{
    actions::ActionSet,
    attributes::{AttributePath, AttributeSet},
    error::MatcherError,
    evaluator::{ActionMode, Polarity},
    policy::Policy,
};

/// The hooks an assertion runner needs from a matcher.
///
/// `matches` / `does_not_match` evaluate against a policy and remember the
/// outcome; the message methods render from that remembered outcome.
pub trait Matcher {
    fn matches(&mut self, policy: &dyn Policy) -> Result<bool, MatcherError>;

    /// Strict negation of [`matches`](Matcher::matches).
    fn does_not_match(&mut self, policy: &dyn Policy) -> Result<bool, MatcherError> {
        Ok(!self.matches(policy)?)
    }

    /// Message for a failed positive assertion.
    fn failure_message(&self) -> String;

    /// Message for a failed negated assertion.
    fn failure_message_when_negated(&self) -> String;

    fn description(&self) -> String;
}

pub fn permit_actions(actions: impl Into<ActionSet>) -> ActionsMatcher {
    ActionsMatcher::new(Polarity::Permit, ActionMode::Exact, actions)
}

pub fn forbid_actions(actions: impl Into<ActionSet>) -> ActionsMatcher {
    ActionsMatcher::new(Polarity::Forbid, ActionMode::Exact, actions)
}

pub fn permit_only_actions(actions: impl Into<ActionSet>) -> ActionsMatcher {
    ActionsMatcher::new(Polarity::Permit, ActionMode::Only, actions)
}

pub fn forbid_only_actions(actions: impl Into<ActionSet>) -> ActionsMatcher {
    ActionsMatcher::new(Polarity::Forbid, ActionMode::Only, actions)
}

/// Fails with [`MatcherError::InvalidArity`] unless exactly one action is given.
pub fn permit_action(action: impl Into<ActionSet>) -> Result<ActionsMatcher, MatcherError> {
    ActionsMatcher::single("permit_action", Polarity::Permit, action)
}

/// Fails with [`MatcherError::InvalidArity`] unless exactly one action is given.
pub fn forbid_action(action: impl Into<ActionSet>) -> Result<ActionsMatcher, MatcherError> {
    ActionsMatcher::single("forbid_action", Polarity::Forbid, action)
}

pub fn permit_attribute(attribute: impl Into<AttributePath>) -> AttributesMatcher {
    AttributesMatcher::new(Polarity::Permit, attribute.into())
}

pub fn permit_attributes(attributes: impl Into<AttributeSet>) -> AttributesMatcher {
    AttributesMatcher::new(Polarity::Permit, attributes)
}

pub fn forbid_attribute(attribute: impl Into<AttributePath>) -> AttributesMatcher {
    AttributesMatcher::new(Polarity::Forbid, attribute.into())
}

pub fn forbid_attributes(attributes: impl Into<AttributeSet>) -> AttributesMatcher {
    AttributesMatcher::new(Polarity::Forbid, attributes)
}
