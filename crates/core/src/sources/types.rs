//! Source record types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Visibility scope of a source.
///
/// In templates the ambient scope is written as `source:`; the other scopes
/// use their own name as the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Ambient,
    User,
    Workspace,
    Stack,
}

impl Scope {
    /// Parse a template scope token (`source`, `user`, `workspace`, `stack`).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "source" => Some(Scope::Ambient),
            "user" => Some(Scope::User),
            "workspace" => Some(Scope::Workspace),
            "stack" => Some(Scope::Stack),
            _ => None,
        }
    }

    /// The token this scope is written with inside `{{ }}`.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Scope::Ambient => "source",
            Scope::User => "user",
            Scope::Workspace => "workspace",
            Scope::Stack => "stack",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Ambient => "ambient",
            Scope::User => "user",
            Scope::Workspace => "workspace",
            Scope::Stack => "stack",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, scoped datum as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub name: String,
    pub scope: Scope,
    /// Stored value, in any of the legacy or current shapes.
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Source {
    pub fn new(name: impl Into<String>, scope: Scope, value: Value) -> Self {
        Self {
            name: name.into(),
            scope,
            value,
            workspace_id: None,
            stack_id: None,
            user_id: None,
        }
    }
}

/// The enclosing context a template is resolved in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContext {
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}
