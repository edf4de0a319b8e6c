//! Alias record types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined code that expands to a URL.
///
/// The serialized field names (`id`, `code`, `link`, `note`) are the
/// persisted schema; renaming any of them invalidates stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Opaque unique identifier, assigned at creation, never reused.
    pub id: String,
    /// Omnibox trigger text. Unique across all aliases, case-sensitive.
    pub code: String,
    /// Absolute URL the code expands to.
    pub link: String,
    /// Free-text description, may be empty.
    pub note: String,
}

impl Alias {
    /// Build a new alias from a create payload, assigning a fresh id.
    pub fn new(create: AliasCreate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            code: create.code,
            link: create.link,
            note: create.note,
        }
    }
}

/// Payload for creating an alias. The id is assigned by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasCreate {
    pub code: String,
    pub link: String,
    #[serde(default)]
    pub note: String,
}

/// Partial update payload. Absent fields leave the existing record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasUpdate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AliasUpdate {
    /// An update for `id` that changes nothing.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: None,
            link: None,
            note: None,
        }
    }

    /// Fold a later update into this one. Fields present in `later` win.
    pub fn merge(&mut self, later: AliasUpdate) {
        if later.code.is_some() {
            self.code = later.code;
        }
        if later.link.is_some() {
            self.link = later.link;
        }
        if later.note.is_some() {
            self.note = later.note;
        }
    }

    /// Apply the present fields to an existing record in place.
    pub fn apply(&self, alias: &mut Alias) {
        if let Some(code) = &self.code {
            alias.code = code.clone();
        }
        if let Some(link) = &self.link {
            alias.link = link.clone();
        }
        if let Some(note) = &self.note {
            alias.note = note.clone();
        }
    }
}

/// Payload for deleting an alias by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDelete {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_alias_gets_fresh_id() {
        let create = AliasCreate {
            code: "gh".to_string(),
            link: "https://github.com".to_string(),
            note: "GitHub".to_string(),
        };
        let a = Alias::new(create.clone());
        let b = Alias::new(create);

        assert_eq!(a.code, "gh");
        assert_eq!(a.link, "https://github.com");
        assert_eq!(a.note, "GitHub");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn merge_later_fields_win() {
        let mut pending = AliasUpdate {
            id: "x".to_string(),
            code: Some("old".to_string()),
            link: None,
            note: Some("first".to_string()),
        };
        pending.merge(AliasUpdate {
            id: "x".to_string(),
            code: Some("new".to_string()),
            link: Some("https://example.com".to_string()),
            note: None,
        });

        assert_eq!(pending.code.as_deref(), Some("new"));
        assert_eq!(pending.link.as_deref(), Some("https://example.com"));
        // Absent in the later update, so the earlier value survives
        assert_eq!(pending.note.as_deref(), Some("first"));
    }

    #[test]
    fn merge_into_empty_update_takes_all_fields() {
        let mut pending = AliasUpdate::empty("x");
        assert_eq!(pending, AliasUpdate {
            id: "x".to_string(),
            code: None,
            link: None,
            note: None,
        });

        pending.merge(AliasUpdate {
            id: "x".to_string(),
            code: Some("gh".to_string()),
            link: Some("https://github.com".to_string()),
            note: Some("GitHub".to_string()),
        });

        assert_eq!(pending.code.as_deref(), Some("gh"));
        assert_eq!(pending.link.as_deref(), Some("https://github.com"));
        assert_eq!(pending.note.as_deref(), Some("GitHub"));
    }

    #[test]
    fn apply_skips_absent_fields() {
        let mut alias = Alias {
            id: "x".to_string(),
            code: "gh".to_string(),
            link: "https://github.com".to_string(),
            note: "GitHub".to_string(),
        };
        let update = AliasUpdate {
            id: "x".to_string(),
            code: None,
            link: None,
            note: Some("my forge".to_string()),
        };
        update.apply(&mut alias);

        assert_eq!(alias.code, "gh");
        assert_eq!(alias.link, "https://github.com");
        assert_eq!(alias.note, "my forge");
    }

    #[test]
    fn alias_serializes_with_persisted_field_names() {
        let alias = Alias {
            id: "1".to_string(),
            code: "hn".to_string(),
            link: "https://news.ycombinator.com".to_string(),
            note: "".to_string(),
        };
        let json = serde_json::to_value(&alias).unwrap();

        assert_eq!(json["id"], "1");
        assert_eq!(json["code"], "hn");
        assert_eq!(json["link"], "https://news.ycombinator.com");
        assert_eq!(json["note"], "");
    }

    #[test]
    fn update_deserializes_with_absent_fields() {
        let update: AliasUpdate = serde_json::from_str(r#"{"id":"7","note":"hi"}"#).unwrap();
        assert_eq!(update.id, "7");
        assert_eq!(update.code, None);
        assert_eq!(update.link, None);
        assert_eq!(update.note.as_deref(), Some("hi"));
    }
}
