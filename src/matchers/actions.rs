use super::Matcher;
use crate::{
    actions::ActionSet,
    config::MessagesConfig,
    error::MatcherError,
    evaluator::{ActionMode, ActionResult, ActionSetEvaluator, Polarity},
    message::{FailureMessageFormatter, Mismatch},
    policy::Policy,
};

/// Asserts how a policy answers a set of actions.
#[derive(Debug, Clone)]
pub struct ActionsMatcher {
    polarity: Polarity,
    mode: ActionMode,
    actions: ActionSet,
    messages: MessagesConfig,
    last: Option<(FailureMessageFormatter, ActionResult)>,
}

impl ActionsMatcher {
    pub fn new(polarity: Polarity, mode: ActionMode, actions: impl Into<ActionSet>) -> Self {
        Self {
            polarity,
            mode,
            actions: actions.into(),
            messages: MessagesConfig::default(),
            last: None,
        }
    }

    /// Exact-mode matcher over exactly one action.
    pub fn single(
        matcher: &'static str,
        polarity: Polarity,
        actions: impl Into<ActionSet>,
    ) -> Result<Self, MatcherError> {
        let actions = actions.into();
        if actions.len() != 1 {
            return Err(MatcherError::InvalidArity {
                matcher,
                expected: 1,
                given: actions.len(),
            });
        }
        Ok(Self::new(polarity, ActionMode::Exact, actions))
    }

    pub fn with_messages(mut self, messages: MessagesConfig) -> Self {
        self.messages = messages;
        self
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    /// Outcome of the most recent evaluation.
    pub fn result(&self) -> Option<&ActionResult> {
        self.last.as_ref().map(|(_, result)| result)
    }

    fn expectation(&self) -> String {
        match self.mode {
            ActionMode::Exact => self.polarity.verb().to_string(),
            ActionMode::Only => format!("{} only", self.polarity.verb()),
        }
    }

    /// Clauses explaining why the assertion did not hold.
    fn deviations(&self, result: &ActionResult) -> Vec<Mismatch> {
        let opposite = self.polarity.opposite();
        let mut clauses = Vec::new();
        push_clause(&mut clauses, opposite, result.declared_as(opposite));
        if self.mode == ActionMode::Only {
            push_clause(&mut clauses, self.polarity, result.extra_as(self.polarity));
        }
        clauses
    }

    /// Clauses explaining why the assertion held, for negated failures.
    fn conformances(&self, result: &ActionResult) -> Vec<Mismatch> {
        let opposite = self.polarity.opposite();
        let mut clauses = Vec::new();
        push_clause(&mut clauses, self.polarity, result.declared_as(self.polarity));
        if self.mode == ActionMode::Only {
            push_clause(&mut clauses, opposite, result.extra_as(opposite));
        }
        clauses
    }

    fn render(&self, negated: bool) -> String {
        let expectation = self.expectation();
        match &self.last {
            Some((formatter, result)) => {
                let clauses = if negated {
                    self.conformances(result)
                } else {
                    self.deviations(result)
                };
                formatter.format(negated, &expectation, &self.actions, None, &clauses)
            }
            None => not_evaluated(negated, &expectation, &self.actions),
        }
    }
}

impl Matcher for ActionsMatcher {
    fn matches(&mut self, policy: &dyn Policy) -> Result<bool, MatcherError> {
        self.last = None;
        let result = ActionSetEvaluator::evaluate(policy, &self.actions, self.mode)?;
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
        format!("{} {}", self.expectation(), self.actions)
    }
}

fn push_clause(clauses: &mut Vec<Mismatch>, observed: Polarity, actions: &ActionSet) {
    if !actions.is_empty() {
        clauses.push(Mismatch::new(observed.observed(), actions));
    }
}

pub(super) fn not_evaluated(
    negated: bool,
    expectation: &str,
    declared: &dyn std::fmt::Display,
) -> String {
    let to = if negated { "not to" } else { "to" };
    format!("expected policy {to} {expectation} {declared}, but the matcher was never evaluated")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        matchers::{
            forbid_action, forbid_actions, forbid_only_actions, permit_action, permit_actions,
            permit_only_actions,
        },
        policy::StaticPolicy,
    };

    fn article_policy() -> StaticPolicy {
        StaticPolicy::new("ArticlePolicy")
            .with_user("alice")
            .with_action("index", true)
            .with_action("show", true)
            .with_action("create", false)
            .with_action("destroy", false)
    }

    #[test]
    fn test_permit_actions_failure_message() {
        let policy = article_policy();
        let mut matcher = permit_actions(["show", "create", "destroy"]);

        assert!(!matcher.matches(&policy).unwrap());
        assert_eq!(
            matcher.failure_message(),
            "expected 'ArticlePolicy' to permit [show, create, destroy], \
             but forbade [create, destroy] for 'alice'"
        );
    }

    #[test]
    fn test_permit_actions_negated_message() {
        let policy = article_policy();
        let mut matcher = permit_actions(["index", "show"]);

        assert!(!matcher.does_not_match(&policy).unwrap());
        assert_eq!(
            matcher.failure_message_when_negated(),
            "expected 'ArticlePolicy' not to permit [index, show], \
             but permitted [index, show] for 'alice'"
        );
    }

    #[test]
    fn test_forbid_actions_failure_message() {
        let policy = article_policy();
        let mut matcher = forbid_actions(["show", "create"]);

        assert!(!matcher.matches(&policy).unwrap());
        assert_eq!(
            matcher.failure_message(),
            "expected 'ArticlePolicy' to forbid [show, create], but permitted [show] for 'alice'"
        );
    }

    #[test]
    fn test_permit_only_failure_lists_both_sides() {
        let policy = article_policy();
        let mut matcher = permit_only_actions(["show", "create"]);

        assert!(!matcher.matches(&policy).unwrap());
        assert_eq!(
            matcher.failure_message(),
            "expected 'ArticlePolicy' to permit only [show, create], \
             but forbade [create] and permitted [index] for 'alice'"
        );
    }

    #[test]
    fn test_permit_only_negated_message() {
        let policy = article_policy();
        let mut matcher = permit_only_actions(["index", "show"]);

        assert!(matcher.matches(&policy).unwrap());
        assert_eq!(
            matcher.failure_message_when_negated(),
            "expected 'ArticlePolicy' not to permit only [index, show], \
             but permitted [index, show] and forbade [create, destroy] for 'alice'"
        );
    }

    #[test]
    fn test_forbid_only() {
        let policy = article_policy();

        let mut matcher = forbid_only_actions(["create", "destroy"]);
        assert!(matcher.matches(&policy).unwrap());

        let mut matcher = forbid_only_actions(["create"]);
        assert!(!matcher.matches(&policy).unwrap());
        assert_eq!(
            matcher.failure_message(),
            "expected 'ArticlePolicy' to forbid only [create], but forbade [destroy] for 'alice'"
        );
    }

    #[test]
    fn test_single_action_arity() {
        assert!(permit_action("show").is_ok());
        assert!(forbid_action(["destroy"]).is_ok());

        let err = permit_action(["show", "create"]).unwrap_err();
        assert_eq!(
            err,
            MatcherError::InvalidArity {
                matcher: "permit_action",
                expected: 1,
                given: 2,
            }
        );

        let err = forbid_action(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, MatcherError::InvalidArity { given: 0, .. }));
    }

    #[test]
    fn test_unknown_action_propagates() {
        let policy = article_policy();
        let mut matcher = permit_actions(["show", "publish"]);
        let err = matcher.matches(&policy).unwrap_err();
        assert_eq!(err, MatcherError::unknown_action("ArticlePolicy", "publish"));
        assert!(matcher.result().is_none());
    }

    #[test]
    fn test_failed_evaluation_clears_previous_result() {
        let mut matcher = permit_actions(["show"]);
        assert!(matcher.matches(&article_policy()).unwrap());
        assert!(matcher.result().is_some());

        let err = matcher.matches(&StaticPolicy::new("CommentPolicy")).unwrap_err();
        assert_eq!(err, MatcherError::unknown_action("CommentPolicy", "show"));
        assert!(matcher.result().is_none());
        assert_eq!(
            matcher.failure_message_when_negated(),
            "expected policy not to permit [show], but the matcher was never evaluated"
        );
    }

    #[test]
    fn test_failed_only_evaluation_clears_previous_result() {
        let mut matcher = permit_only_actions(["index", "show"]);
        assert!(matcher.matches(&article_policy()).unwrap());

        struct Opaque;
        impl Policy for Opaque {
            fn policy_name(&self) -> &str {
                "OpaquePolicy"
            }
            fn query(&self, _action: &str) -> Option<bool> {
                Some(true)
            }
        }

        let err = matcher.matches(&Opaque).unwrap_err();
        assert!(matches!(err, MatcherError::ActionsNotEnumerable { .. }));
        assert!(matcher.result().is_none());
    }

    #[test]
    fn test_user_alias() {
        let policy = article_policy().with_subject("account", "acme");
        let mut matcher =
            forbid_actions(["show"]).with_messages(MessagesConfig::new("account"));

        assert!(!matcher.matches(&policy).unwrap());
        assert!(matcher.failure_message().ends_with("for 'acme'"));

        let mut matcher = forbid_actions(["show"]).with_messages(MessagesConfig::new("member"));
        matcher.matches(&policy).unwrap();
        assert!(matcher.failure_message().ends_with("for 'unknown member'"));
    }

    #[test]
    fn test_description_and_unevaluated_message() {
        let matcher = permit_only_actions(["show"]);
        assert_eq!(matcher.description(), "permit only [show]");
        assert_eq!(
            matcher.failure_message(),
            "expected policy to permit only [show], but the matcher was never evaluated"
        );
    }
}
