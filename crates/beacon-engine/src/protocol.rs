//! Request/response contract between UI surfaces and the controller.

use beacon_store::{Alias, AliasCreate, AliasDelete, AliasUpdate};
use serde::{Deserialize, Serialize};

/// A request from a UI surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientRequest {
    /// Fetch all aliases.
    AliasesGet,
    /// Create a new alias.
    AliasCreate { alias: AliasCreate },
    /// Partially update an existing alias.
    AliasUpdate { alias: AliasUpdate },
    /// Delete an alias by id.
    AliasDelete { alias: AliasDelete },
}

impl ClientRequest {
    /// Whether handling this request mutates the alias collection (and so
    /// must be followed by a commit).
    pub fn is_mutation(&self) -> bool {
        !matches!(self, ClientRequest::AliasesGet)
    }
}

/// The controller's reply to a [`ClientRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControllerResponse {
    /// Reply to `AliasesGet`.
    Aliases { aliases: Vec<Alias> },
    /// Reply to a successful create/update/delete, carrying the affected
    /// record.
    Alias { alias: Alias },
    /// Reply to a failed request, with a human-readable message.
    Error { message: String },
}

impl ControllerResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn requests_deserialize_from_tagged_json() {
        let request: ClientRequest = serde_json::from_value(json!({
            "type": "alias_create",
            "alias": { "code": "gh", "link": "https://github.com", "note": "GitHub" },
        }))
        .unwrap();

        assert_eq!(
            request,
            ClientRequest::AliasCreate {
                alias: AliasCreate {
                    code: "gh".to_string(),
                    link: "https://github.com".to_string(),
                    note: "GitHub".to_string(),
                }
            }
        );
        assert!(request.is_mutation());
        assert!(!ClientRequest::AliasesGet.is_mutation());
    }

    #[test]
    fn update_request_tolerates_absent_fields() {
        let request: ClientRequest = serde_json::from_value(json!({
            "type": "alias_update",
            "alias": { "id": "7", "code": "new" },
        }))
        .unwrap();

        let ClientRequest::AliasUpdate { alias } = request else {
            panic!("expected update request");
        };
        assert_eq!(alias.code.as_deref(), Some("new"));
        assert_eq!(alias.link, None);
        assert_eq!(alias.note, None);
    }

    #[test]
    fn error_response_serializes_message_only() {
        let response = ControllerResponse::error("no alias found with id '7'");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            json!({ "type": "error", "message": "no alias found with id '7'" })
        );
    }
}
