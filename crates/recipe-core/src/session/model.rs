//! Session domain model.
//!
//! A session is one open, editable request. It may be linked to a catalog
//! recipe (sharing that recipe's auth config and secret) or carry a freshly
//! generated recipe id of its own.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use strum::{Display, EnumString};

/// Reserved id for the transient session shown when a recipe is opened
/// directly. It is never inserted into the session registry.
pub const PLAYGROUND_SESSION_ID: &str = "playground";

/// HTTP method of a request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

/// Editor state for a session.
///
/// Every field is an opaque JSON document owned by the editor; the store
/// never inspects it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorState {
    #[serde(default)]
    pub url: JsonValue,
    #[serde(default)]
    pub query: JsonValue,
    #[serde(default)]
    pub body: JsonValue,
    #[serde(default)]
    pub headers: JsonValue,
}

/// Represents one open request in the playground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Display name. Not unique.
    pub name: String,
    /// Recipe this session was created from, or a generated id if unlinked
    pub recipe_id: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub editor: EditorState,
    /// Timestamp when the session was created (RFC 3339)
    pub created_at: String,
}

impl Session {
    /// Name shown in lists; unnamed sessions read as "New Session".
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "New Session"
        } else {
            &self.name
        }
    }
}

/// Template fields copied into a newly created session.
///
/// Any field left as `None` falls back to the registry's defaults: an empty
/// name, `GET`, a fresh recipe id and empty editor state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialSession {
    pub name: Option<String>,
    pub method: Option<HttpMethod>,
    pub recipe_id: Option<String>,
    pub editor: Option<EditorState>,
}

impl PartialSession {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_recipe_id(mut self, recipe_id: impl Into<String>) -> Self {
        self.recipe_id = Some(recipe_id.into());
        self
    }
}

impl From<&Session> for PartialSession {
    fn from(session: &Session) -> Self {
        Self {
            name: Some(session.name.clone()),
            method: Some(session.method),
            recipe_id: Some(session.recipe_id.clone()),
            editor: Some(session.editor.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!(HttpMethod::from_str("post").unwrap(), HttpMethod::Post);
        assert_eq!(HttpMethod::from_str("PATCH").unwrap(), HttpMethod::Patch);
        assert!(HttpMethod::from_str("TRACE").is_err());
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_session_deserializes_without_editor() {
        let json = r#"{
            "id": "s-1",
            "name": "List users",
            "recipe_id": "r-1",
            "method": "GET",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.editor, EditorState::default());
        assert_eq!(session.method, HttpMethod::Get);
        assert_eq!(session.display_name(), "List users");
    }

    #[test]
    fn test_unnamed_session_display_name() {
        let session = Session {
            id: "s-1".into(),
            name: "  ".into(),
            recipe_id: "r-1".into(),
            method: HttpMethod::Get,
            editor: EditorState::default(),
            created_at: "2024-01-01T00:00:00Z".into(),
        };
        assert_eq!(session.display_name(), "New Session");
    }
}
