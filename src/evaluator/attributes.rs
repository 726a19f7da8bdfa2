use super::Polarity;
use crate::{attributes::AttributeSet, policy::Policy};

/// Which accessor the permitted set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermittedSource {
    /// `permitted_attributes_for(action)`.
    ActionSpecific,
    /// `permitted_attributes()`.
    Generic,
    /// Neither accessor answered; everything is forbidden.
    Absent,
}

/// Declared attributes partitioned by whether the policy permits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeResult {
    /// Action context the permitted set was resolved for.
    pub action: Option<String>,
    pub source: PermittedSource,
    pub declared: AttributeSet,
    pub matched: AttributeSet,
    pub unmatched: AttributeSet,
}

impl AttributeResult {
    /// Declared attributes that fall on the `polarity` side.
    pub fn declared_as(&self, polarity: Polarity) -> &AttributeSet {
        match polarity {
            Polarity::Permit => &self.matched,
            Polarity::Forbid => &self.unmatched,
        }
    }

    pub fn matches(&self, polarity: Polarity) -> bool {
        self.declared_as(polarity.opposite()).is_empty()
    }
}

/// Checks declared attributes against a policy's permitted attributes.
pub struct AttributeSetEvaluator;

impl AttributeSetEvaluator {
    /// Partition `declared` by containment in the policy's permitted set.
    ///
    /// With an action context the action-specific accessor is preferred and
    /// the generic one is the fallback. Forbidding through one accessor says
    /// nothing about the other.
    pub fn evaluate(
        policy: &dyn Policy,
        declared: &AttributeSet,
        action: Option<&str>,
    ) -> AttributeResult {
        let (permitted, source) = resolve_permitted(policy, action);

        let mut matched = AttributeSet::new();
        let mut unmatched = AttributeSet::new();
        for path in declared {
            if permitted.covers(path) {
                matched.insert(path.clone());
            } else {
                unmatched.insert(path.clone());
            }
        }

        tracing::debug!(
            policy = %policy.policy_name(),
            action = ?action,
            source = ?source,
            permitted = %permitted,
            matched = %matched,
            unmatched = %unmatched,
            "Evaluated attributes"
        );

        AttributeResult {
            action: action.map(str::to_string),
            source,
            declared: declared.clone(),
            matched,
            unmatched,
        }
    }
}

fn resolve_permitted(policy: &dyn Policy, action: Option<&str>) -> (AttributeSet, PermittedSource) {
    if let Some(action) = action {
        if let Some(permitted) = policy.permitted_attributes_for(action) {
            return (permitted, PermittedSource::ActionSpecific);
        }
        tracing::debug!(
            policy = %policy.policy_name(),
            action,
            "No action-specific permitted attributes, using generic accessor"
        );
    }

    match policy.permitted_attributes() {
        Some(permitted) => (permitted, PermittedSource::Generic),
        None => (AttributeSet::new(), PermittedSource::Absent),
    }
}
