use super::Polarity;
use crate::{actions::ActionSet, error::MatcherError, policy::Policy};

/// Whether actions outside the declared set are checked too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionMode {
    /// Only the declared actions are queried.
    Exact,
    /// Every other action the policy defines must answer the opposite way.
    Only,
}

/// Declared actions partitioned by the policy's answers.
///
/// `permitted` and `forbidden` partition `declared` and keep its order.
/// The `extra_*` sets are only filled in [`ActionMode::Only`] and hold the
/// remaining actions in the policy's enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub mode: ActionMode,
    pub declared: ActionSet,
    pub permitted: ActionSet,
    pub forbidden: ActionSet,
    pub extra_permitted: ActionSet,
    pub extra_forbidden: ActionSet,
}

impl ActionResult {
    /// Declared actions the policy answered with `polarity`.
    pub fn declared_as(&self, polarity: Polarity) -> &ActionSet {
        match polarity {
            Polarity::Permit => &self.permitted,
            Polarity::Forbid => &self.forbidden,
        }
    }

    /// Undeclared actions the policy answered with `polarity`.
    pub fn extra_as(&self, polarity: Polarity) -> &ActionSet {
        match polarity {
            Polarity::Permit => &self.extra_permitted,
            Polarity::Forbid => &self.extra_forbidden,
        }
    }

    /// Whether the policy answered every declared action with `polarity`
    /// and, in only-mode, every other action the opposite way.
    pub fn matches(&self, polarity: Polarity) -> bool {
        let declared_ok = self.declared_as(polarity.opposite()).is_empty();
        match self.mode {
            ActionMode::Exact => declared_ok,
            ActionMode::Only => declared_ok && self.extra_as(polarity).is_empty(),
        }
    }
}

/// Queries a policy for a declared set of actions.
pub struct ActionSetEvaluator;

impl ActionSetEvaluator {
    /// Classify `declared` (and in only-mode, every other action) by the
    /// policy's answers.
    ///
    /// Predicates are invoked in declaration order, then enumeration order
    /// for the remaining actions. An action the policy does not define is an
    /// error, never a forbidden answer.
    pub fn evaluate(
        policy: &dyn Policy,
        declared: &ActionSet,
        mode: ActionMode,
    ) -> Result<ActionResult, MatcherError> {
        let mut permitted = ActionSet::new();
        let mut forbidden = ActionSet::new();
        for action in declared.iter() {
            if query(policy, action)? {
                permitted.insert(action);
            } else {
                forbidden.insert(action);
            }
        }

        let mut extra_permitted = ActionSet::new();
        let mut extra_forbidden = ActionSet::new();
        if mode == ActionMode::Only {
            let all_actions = policy
                .actions()
                .ok_or_else(|| MatcherError::ActionsNotEnumerable {
                    policy: policy.policy_name().to_string(),
                })?;

            for action in all_actions.iter().filter(|a| !declared.contains(a)) {
                if query(policy, action)? {
                    extra_permitted.insert(action.as_str());
                } else {
                    extra_forbidden.insert(action.as_str());
                }
            }
        }

        tracing::debug!(
            policy = %policy.policy_name(),
            mode = ?mode,
            declared = %declared,
            permitted = %permitted,
            forbidden = %forbidden,
            extra_permitted = %extra_permitted,
            extra_forbidden = %extra_forbidden,
            "Evaluated actions"
        );

        Ok(ActionResult {
            mode,
            declared: declared.clone(),
            permitted,
            forbidden,
            extra_permitted,
            extra_forbidden,
        })
    }
}

fn query(policy: &dyn Policy, action: &str) -> Result<bool, MatcherError> {
    let answer = policy
        .query(action)
        .ok_or_else(|| MatcherError::unknown_action(policy.policy_name(), action))?;
    tracing::trace!(policy = %policy.policy_name(), action, answer, "Queried policy");
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::StaticPolicy;

    fn article_policy() -> StaticPolicy {
        StaticPolicy::new("ArticlePolicy")
            .with_action("index", true)
            .with_action("show", true)
            .with_action("create", false)
            .with_action("update", false)
            .with_action("destroy", false)
    }

    #[test]
    fn test_exact_partitions_declared_in_order() {
        let policy = article_policy();
        let declared = ActionSet::from(["update", "show", "create", "index"]);
        let result = ActionSetEvaluator::evaluate(&policy, &declared, ActionMode::Exact).unwrap();

        assert_eq!(result.permitted, ActionSet::from(["show", "index"]));
        assert_eq!(result.forbidden, ActionSet::from(["update", "create"]));
        assert!(result.extra_permitted.is_empty());
        assert!(result.extra_forbidden.is_empty());
        assert!(!result.matches(Polarity::Permit));
        assert!(!result.matches(Polarity::Forbid));
    }

    #[test]
    fn test_exact_ignores_other_actions() {
        let policy = article_policy();
        let declared = ActionSet::from(["create", "destroy"]);
        let result = ActionSetEvaluator::evaluate(&policy, &declared, ActionMode::Exact).unwrap();

        // `show` is permitted but was not declared
        assert!(result.matches(Polarity::Forbid));
        assert!(!result.matches(Polarity::Permit));
    }

    #[test]
    fn test_only_collects_extras_in_enumeration_order() {
        let policy = article_policy();
        let declared = ActionSet::from(["show"]);
        let result = ActionSetEvaluator::evaluate(&policy, &declared, ActionMode::Only).unwrap();

        assert_eq!(result.permitted, ActionSet::from(["show"]));
        assert_eq!(result.extra_permitted, ActionSet::from(["index"]));
        assert_eq!(
            result.extra_forbidden,
            ActionSet::from(["create", "update", "destroy"])
        );
        assert!(!result.matches(Polarity::Permit));

        let declared = ActionSet::from(["show", "index"]);
        let result = ActionSetEvaluator::evaluate(&policy, &declared, ActionMode::Only).unwrap();
        assert!(result.matches(Polarity::Permit));
    }

    #[test]
    fn test_forbid_only() {
        let policy = article_policy();
        let declared = ActionSet::from(["create", "update", "destroy"]);
        let result = ActionSetEvaluator::evaluate(&policy, &declared, ActionMode::Only).unwrap();
        assert!(result.matches(Polarity::Forbid));

        let declared = ActionSet::from(["create", "update"]);
        let result = ActionSetEvaluator::evaluate(&policy, &declared, ActionMode::Only).unwrap();
        assert!(!result.matches(Polarity::Forbid));
        assert_eq!(result.extra_forbidden, ActionSet::from(["destroy"]));
    }

    #[test]
    fn test_unknown_declared_action() {
        let policy = article_policy();
        let declared = ActionSet::from(["show", "publish"]);
        let err = ActionSetEvaluator::evaluate(&policy, &declared, ActionMode::Exact).unwrap_err();
        assert_eq!(
            err,
            MatcherError::unknown_action("ArticlePolicy", "publish")
        );
    }

    #[test]
    fn test_only_requires_enumeration() {
        struct Opaque;
        impl Policy for Opaque {
            fn policy_name(&self) -> &str {
                "OpaquePolicy"
            }
            fn query(&self, _action: &str) -> Option<bool> {
                Some(true)
            }
        }

        let declared = ActionSet::from(["show"]);
        assert!(ActionSetEvaluator::evaluate(&Opaque, &declared, ActionMode::Exact).is_ok());
        let err = ActionSetEvaluator::evaluate(&Opaque, &declared, ActionMode::Only).unwrap_err();
        assert_eq!(
            err,
            MatcherError::ActionsNotEnumerable {
                policy: "OpaquePolicy".to_string()
            }
        );
    }

    #[test]
    fn test_empty_declaration() {
        let policy = article_policy();
        let declared = ActionSet::new();

        let exact = ActionSetEvaluator::evaluate(&policy, &declared, ActionMode::Exact).unwrap();
        assert!(exact.matches(Polarity::Permit));
        assert!(exact.matches(Polarity::Forbid));

        let only = ActionSetEvaluator::evaluate(&policy, &declared, ActionMode::Only).unwrap();
        assert!(!only.matches(Polarity::Permit));
        assert!(!only.matches(Polarity::Forbid));
        assert_eq!(only.extra_permitted, ActionSet::from(["index", "show"]));
    }
}
