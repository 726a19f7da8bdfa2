use std::fmt;

use super::Policy;
use crate::attributes::AttributeSet;

type Predicate = Box<dyn Fn() -> bool>;

/// A policy assembled from registered predicates.
///
/// Actions are answered by zero-argument closures looked up by name, and
/// enumerate in registration order. Registering an action twice replaces
/// the earlier predicate but keeps its position.
///
/// ```
/// use policy_matchers::{AttributePath, StaticPolicy};
///
/// let policy = StaticPolicy::new("ArticlePolicy")
///     .with_user("alice")
///     .with_action("show", true)
///     .with_predicate("update", || false)
///     .with_permitted_attributes_for("create", ["title", "slug"])
///     .with_permitted_attributes([AttributePath::nested("tags", ["name"])]);
/// ```
pub struct StaticPolicy {
    name: String,
    subjects: Vec<(String, String)>,
    actions: Vec<(String, Predicate)>,
    permitted_attributes: Option<AttributeSet>,
    permitted_attributes_for: Vec<(String, AttributeSet)>,
}

impl StaticPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subjects: Vec::new(),
            actions: Vec::new(),
            permitted_attributes: None,
            permitted_attributes_for: Vec::new(),
        }
    }

    /// Set the subject exposed under the default "user" alias.
    pub fn with_user(self, description: impl Into<String>) -> Self {
        self.with_subject("user", description)
    }

    /// Set the subject exposed under `alias`.
    pub fn with_subject(mut self, alias: impl Into<String>, description: impl Into<String>) -> Self {
        let alias = alias.into();
        let description = description.into();
        match self.subjects.iter_mut().find(|(a, _)| *a == alias) {
            Some(entry) => entry.1 = description,
            None => self.subjects.push((alias, description)),
        }
        self
    }

    /// Register an action with a fixed answer.
    pub fn with_action(self, action: impl Into<String>, permitted: bool) -> Self {
        self.with_predicate(action, move || permitted)
    }

    /// Register an action answered by `predicate` on every query.
    pub fn with_predicate(
        mut self,
        action: impl Into<String>,
        predicate: impl Fn() -> bool + 'static,
    ) -> Self {
        let action = action.into();
        let predicate: Predicate = Box::new(predicate);
        match self.actions.iter_mut().find(|(a, _)| *a == action) {
            Some(entry) => entry.1 = predicate,
            None => self.actions.push((action, predicate)),
        }
        self
    }

    pub fn with_permitted_attributes(mut self, attributes: impl Into<AttributeSet>) -> Self {
        self.permitted_attributes = Some(attributes.into());
        self
    }

    pub fn with_permitted_attributes_for(
        mut self,
        action: impl Into<String>,
        attributes: impl Into<AttributeSet>,
    ) -> Self {
        let action = action.into();
        let attributes = attributes.into();
        match self
            .permitted_attributes_for
            .iter_mut()
            .find(|(a, _)| *a == action)
        {
            Some(entry) => entry.1 = attributes,
            None => self.permitted_attributes_for.push((action, attributes)),
        }
        self
    }
}

impl Policy for StaticPolicy {
    fn policy_name(&self) -> &str {
        &self.name
    }

    fn query(&self, action: &str) -> Option<bool> {
        self.actions
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, predicate)| predicate())
    }

    fn actions(&self) -> Option<Vec<String>> {
        Some(self.actions.iter().map(|(a, _)| a.clone()).collect())
    }

    fn permitted_attributes(&self) -> Option<AttributeSet> {
        self.permitted_attributes.clone()
    }

    fn permitted_attributes_for(&self, action: &str) -> Option<AttributeSet> {
        self.permitted_attributes_for
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, attrs)| attrs.clone())
    }

    fn subject(&self, alias: &str) -> Option<String> {
        self.subjects
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, description)| description.clone())
    }
}

impl fmt::Debug for StaticPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticPolicy")
            .field("name", &self.name)
            .field("subjects", &self.subjects)
            .field(
                "actions",
                &self.actions.iter().map(|(a, _)| a).collect::<Vec<_>>(),
            )
            .field("permitted_attributes", &self.permitted_attributes)
            .field("permitted_attributes_for", &self.permitted_attributes_for)
            .finish()
    }
}
