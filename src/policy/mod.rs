//! The policy side of the matchers.
//!
//! A policy answers one boolean question per action ("may the subject
//! `show` this record?") and may list the attributes it allows to be
//! assigned, either in general or for a specific action.
//!
//! Implement [`Policy`] for your own authorization types, or build one from
//! closures and literals with [`StaticPolicy`] (in code) or [`PolicyFixture`]
//! (from TOML).

mod fixture;
mod static_policy;

pub use fixture::{FixtureError, PolicyFixture};
pub use static_policy::StaticPolicy;

use crate::attributes::AttributeSet;

/// An authorization policy under test.
///
/// Only [`policy_name`](Policy::policy_name) and [`query`](Policy::query)
/// are required. The optional accessors return `None` when the policy has
/// no such capability, which the matchers treat differently from an empty
/// answer where it matters (see each method).
pub trait Policy {
    /// Display name used in failure messages (e.g. "ArticlePolicy").
    fn policy_name(&self) -> &str;

    /// Ask whether `action` is permitted.
    ///
    /// Returns `None` when the policy does not define `action` at all. The
    /// matchers report that as an error instead of treating it as forbidden.
    fn query(&self, action: &str) -> Option<bool>;

    /// Every action this policy defines, in a stable order.
    ///
    /// Required by the only-matchers; `None` makes them fail with
    /// [`MatcherError::ActionsNotEnumerable`](crate::MatcherError::ActionsNotEnumerable).
    fn actions(&self) -> Option<Vec<String>> {
        None
    }

    /// Attributes permitted regardless of action.
    fn permitted_attributes(&self) -> Option<AttributeSet> {
        None
    }

    /// Attributes permitted for one action. `None` falls back to
    /// [`permitted_attributes`](Policy::permitted_attributes).
    fn permitted_attributes_for(&self, _action: &str) -> Option<AttributeSet> {
        None
    }

    /// Description of the subject exposed under `alias` (usually "user").
    fn subject(&self, _alias: &str) -> Option<String> {
        None
    }
}

impl<P: Policy + ?Sized> Policy for &P {
    fn policy_name(&self) -> &str {
        (**self).policy_name()
    }

    fn query(&self, action: &str) -> Option<bool> {
        (**self).query(action)
    }

    fn actions(&self) -> Option<Vec<String>> {
        (**self).actions()
    }

    fn permitted_attributes(&self) -> Option<AttributeSet> {
        (**self).permitted_attributes()
    }

    fn permitted_attributes_for(&self, action: &str) -> Option<AttributeSet> {
        (**self).permitted_attributes_for(action)
    }

    fn subject(&self, alias: &str) -> Option<String> {
        (**self).subject(alias)
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn policy_name(&self) -> &str {
        (**self).policy_name()
    }

    fn query(&self, action: &str) -> Option<bool> {
        (**self).query(action)
    }

    fn actions(&self) -> Option<Vec<String>> {
        (**self).actions()
    }

    fn permitted_attributes(&self) -> Option<AttributeSet> {
        (**self).permitted_attributes()
    }

    fn permitted_attributes_for(&self, action: &str) -> Option<AttributeSet> {
        (**self).permitted_attributes_for(action)
    }

    fn subject(&self, alias: &str) -> Option<String> {
        (**self).subject(alias)
    }
}
