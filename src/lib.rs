//! Test matchers for authorization policies.
//!
//! A policy answers "may the subject perform X?" for each action it defines,
//! and may list which attributes it lets the subject assign. The matchers
//! in this crate assert those answers in tests and explain mismatches in one
//! sentence naming the policy, the offending actions or attributes, and the
//! subject.
//!
//! ```
//! use policy_matchers::{
//!     AttributePath, StaticPolicy, expect, forbid_attribute, permit_attributes,
//!     permit_only_actions,
//! };
//!
//! let policy = StaticPolicy::new("ArticlePolicy")
//!     .with_user("alice")
//!     .with_action("index", true)
//!     .with_action("show", true)
//!     .with_action("destroy", false)
//!     .with_permitted_attributes(["title", "body"])
//!     .with_permitted_attributes_for("create", [
//!         AttributePath::name("slug"),
//!         AttributePath::nested("tags", ["name"]),
//!     ]);
//!
//! expect(&policy).to(permit_only_actions(["index", "show"]));
//! expect(&policy).to(permit_attributes(["title", "body"]));
//! expect(&policy).to(
//!     permit_attributes([AttributePath::nested("tags", ["name"])]).for_action("create"),
//! );
//! expect(&policy).to(forbid_attribute("slug"));
//! ```
//!
//! The flow for every assertion is the same: the matcher hands the declared
//! set to an evaluator ([`ActionSetEvaluator`] or [`AttributeSetEvaluator`]),
//! which queries the policy and partitions the declaration; the matcher
//! decides the outcome from that partition and, on failure, renders it with
//! a [`FailureMessageFormatter`].

pub mod actions;
pub mod attributes;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod expectation;
pub mod matchers;
pub mod message;
#[cfg(feature = "logging")]
pub mod observability;
pub mod policy;

#[cfg(test)]
mod tests;

pub use actions::ActionSet;
pub use attributes::{AttributePath, AttributeSet};
pub use config::{ConfigError, MatchersConfig, MessagesConfig};
pub use error::MatcherError;
pub use evaluator::{
    ActionMode, ActionResult, ActionSetEvaluator, AttributeResult, AttributeSetEvaluator,
    PermittedSource, Polarity,
};
pub use expectation::{AssertionFailure, Expectation, expect};
pub use matchers::{
    ActionsMatcher, AttributesMatcher, Matcher, forbid_action, forbid_actions, forbid_attribute,
    forbid_attributes, forbid_only_actions, permit_action, permit_actions, permit_attribute,
    permit_attributes, permit_only_actions,
};
pub use message::{FailureMessageFormatter, Mismatch};
pub use policy::{FixtureError, Policy, PolicyFixture, StaticPolicy};
