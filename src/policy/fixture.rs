//! Policies described in TOML.
//!
//! ```toml
//! name = "ArticlePolicy"
//! user = "alice"
//! permitted_attributes = ["title", { tags = ["name"] }]
//!
//! [actions]
//! show = true
//! create = false
//!
//! [permitted_attributes_for]
//! create = ["slug"]
//! update = []
//! ```
//!
//! Actions enumerate in file order.

use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

use super::StaticPolicy;
use crate::attributes::AttributeSet;

/// Policy fixture loading errors.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read policy fixture {1}: {0}")]
    Io(std::io::Error, std::path::PathBuf),

    #[error("Failed to parse policy fixture: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Action '{action}' must be a boolean, got {found}")]
    NonBooleanAction { action: String, found: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFixture {
    name: String,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    subjects: BTreeMap<String, String>,
    #[serde(default)]
    actions: toml::Table,
    #[serde(default)]
    permitted_attributes: Option<AttributeSet>,
    #[serde(default)]
    permitted_attributes_for: BTreeMap<String, AttributeSet>,
}

/// A validated policy description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyFixture {
    pub name: String,
    /// Subjects by alias; a top-level `user` key lands under "user".
    pub subjects: BTreeMap<String, String>,
    /// Actions with their answers, in file order.
    pub actions: Vec<(String, bool)>,
    pub permitted_attributes: Option<AttributeSet>,
    pub permitted_attributes_for: BTreeMap<String, AttributeSet>,
}

impl PolicyFixture {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| FixtureError::Io(e, path.as_ref().to_path_buf()))?;

        Self::from_str(&contents)
    }

    pub fn from_str(contents: &str) -> Result<Self, FixtureError> {
        let raw: RawFixture = toml::from_str(contents)?;

        let mut actions = Vec::with_capacity(raw.actions.len());
        for (action, value) in raw.actions {
            match value.as_bool() {
                Some(permitted) => actions.push((action, permitted)),
                None => {
                    return Err(FixtureError::NonBooleanAction {
                        found: value.type_str().to_string(),
                        action,
                    });
                }
            }
        }

        let mut subjects = raw.subjects;
        if let Some(user) = raw.user {
            subjects.insert("user".to_string(), user);
        }

        tracing::debug!(
            policy = %raw.name,
            actions = actions.len(),
            "Loaded policy fixture"
        );

        Ok(Self {
            name: raw.name,
            subjects,
            actions,
            permitted_attributes: raw.permitted_attributes,
            permitted_attributes_for: raw.permitted_attributes_for,
        })
    }

    pub fn into_policy(self) -> StaticPolicy {
        let mut policy = StaticPolicy::new(self.name);
        for (alias, description) in self.subjects {
            policy = policy.with_subject(alias, description);
        }
        for (action, permitted) in self.actions {
            policy = policy.with_action(action, permitted);
        }
        if let Some(attributes) = self.permitted_attributes {
            policy = policy.with_permitted_attributes(attributes);
        }
        for (action, attributes) in self.permitted_attributes_for {
            policy = policy.with_permitted_attributes_for(action, attributes);
        }
        policy
    }
}

impl From<PolicyFixture> for StaticPolicy {
    fn from(fixture: PolicyFixture) -> Self {
        fixture.into_policy()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{attributes::AttributePath, policy::Policy};

    const ARTICLE: &str = r#"
        name = "ArticlePolicy"
        user = "alice"
        permitted_attributes = ["title", { tags = ["name"] }]

        [subjects]
        account = "acme"

        [actions]
        update = false
        show = true
        create = false

        [permitted_attributes_for]
        create = ["slug"]
        update = []
    "#;

    #[test]
    fn test_parse_fixture() {
        let fixture = PolicyFixture::from_str(ARTICLE).unwrap();
        assert_eq!(fixture.name, "ArticlePolicy");
        assert_eq!(fixture.subjects.get("user").map(String::as_str), Some("alice"));
        assert_eq!(fixture.subjects.get("account").map(String::as_str), Some("acme"));
        assert_eq!(
            fixture.actions,
            vec![
                ("update".to_string(), false),
                ("show".to_string(), true),
                ("create".to_string(), false),
            ]
        );
        assert_eq!(
            fixture.permitted_attributes,
            Some(AttributeSet::from([
                AttributePath::name("title"),
                AttributePath::nested("tags", ["name"]),
            ]))
        );
        assert_eq!(
            fixture.permitted_attributes_for.get("update"),
            Some(&AttributeSet::new())
        );
    }

    #[test]
    fn test_into_policy() {
        let policy = PolicyFixture::from_str(ARTICLE).unwrap().into_policy();
        assert_eq!(policy.policy_name(), "ArticlePolicy");
        assert_eq!(policy.query("show"), Some(true));
        assert_eq!(policy.query("create"), Some(false));
        assert_eq!(policy.query("destroy"), None);
        assert_eq!(
            policy.actions().unwrap(),
            vec!["update".to_string(), "show".to_string(), "create".to_string()]
        );
        assert_eq!(policy.subject("user").as_deref(), Some("alice"));
        assert_eq!(
            policy.permitted_attributes_for("create"),
            Some(AttributeSet::from(["slug"]))
        );
    }

    #[test]
    fn test_non_boolean_action_rejected() {
        let err = PolicyFixture::from_str(
            r#"
            name = "ArticlePolicy"
            [actions]
            show = "yes"
        "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FixtureError::NonBooleanAction { ref action, ref found }
                if action == "show" && found == "string"
        ));
    }

    #[test]
    fn test_missing_name_rejected() {
        let err = PolicyFixture::from_str("[actions]\nshow = true").unwrap_err();
        assert!(matches!(err, FixtureError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{ARTICLE}").unwrap();

        let fixture = PolicyFixture::from_file(file.path()).unwrap();
        assert_eq!(fixture.actions.len(), 3);
    }
}
