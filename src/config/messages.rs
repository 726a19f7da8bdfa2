use serde::{Deserialize, Serialize};

use crate::policy::Policy;

/// Settings that only affect how failure messages are rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MessagesConfig {
    /// Name under which policies expose the subject they authorize
    /// (e.g. "user", "account", "member").
    #[serde(default = "default_user_alias")]
    pub user_alias: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            user_alias: default_user_alias(),
        }
    }
}

impl MessagesConfig {
    pub fn new(user_alias: impl Into<String>) -> Self {
        Self {
            user_alias: user_alias.into(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.user_alias.trim().is_empty() {
            return Err("messages.user_alias cannot be empty".into());
        }
        if self.user_alias.chars().any(char::is_whitespace) {
            return Err(format!(
                "messages.user_alias must be a single word, got '{}'",
                self.user_alias
            ));
        }
        Ok(())
    }

    /// Label for the policy's subject as it appears in failure messages.
    pub fn user_label(&self, policy: &dyn Policy) -> String {
        policy
            .subject(&self.user_alias)
            .unwrap_or_else(|| format!("unknown {}", self.user_alias))
    }
}

fn default_user_alias() -> String {
    "user".to_string()
}
