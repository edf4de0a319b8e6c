//! Omnibox event and suggestion types.

use beacon_store::Alias;
use serde::{Deserialize, Serialize};

/// Where a submitted alias should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Disposition {
    /// Replace the current tab.
    CurrentTab,
    /// Open a new focused tab.
    NewForegroundTab,
    /// Open a new unfocused tab.
    NewBackgroundTab,
}

/// An inbound omnibox event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OmniboxEvent {
    /// The input text changed; the caller wants suggestions.
    Change { text: String },
    /// The input was submitted.
    Enter {
        text: String,
        disposition: Disposition,
    },
}

/// A completion offered for display, pairing the code with its note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub content: String,
    pub description: String,
}

impl From<&Alias> for Suggestion {
    fn from(alias: &Alias) -> Self {
        Self {
            content: alias.code.clone(),
            description: alias.note.clone(),
        }
    }
}

/// What handling an omnibox event produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmniboxOutcome {
    /// Completions for the current input, sorted by code.
    Suggestions(Vec<Suggestion>),
    /// A submission resolved and navigation was dispatched.
    Navigated(Alias),
    /// A submission resolved to nothing. Not an error.
    None,
}
