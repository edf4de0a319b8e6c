//! The single mutation path over the alias collection.

use std::sync::Arc;

use beacon_store::{Alias, AliasCreate, AliasDelete, AliasUpdate, RecordSet};
use tracing::{debug, info};
use url::Url;

use crate::omnibox::{Disposition, OmniboxEvent, OmniboxOutcome, Suggestion};
use crate::resolver;
use crate::{EngineError, Tabs};

/// Routes omnibox events and CRUD requests to the alias collection,
/// enforcing the invariants the collection itself does not: non-empty
/// codes, absolute-URL links, and code uniqueness.
pub struct Controller {
    aliases: RecordSet<Alias>,
    tabs: Arc<dyn Tabs>,
}

impl Controller {
    pub fn new(aliases: RecordSet<Alias>, tabs: Arc<dyn Tabs>) -> Self {
        Self { aliases, tabs }
    }

    /// A snapshot of all aliases. Order is unspecified at this layer;
    /// sorting is a presentation concern.
    pub async fn aliases(&self) -> Vec<Alias> {
        self.aliases.get().await
    }

    /// Validate and append a new alias, assigning it a fresh id.
    pub async fn create_alias(&self, create: AliasCreate) -> Result<Alias, EngineError> {
        validate_code(&create.code)?;
        validate_link(&create.link)?;
        self.check_unique(&create.code, None).await?;

        let alias = Alias::new(create);
        self.aliases.create([alias.clone()]).await;
        info!(code = %alias.code, id = %alias.id, "created alias");
        Ok(alias)
    }

    /// Apply a partial update to an existing alias. Absent fields are left
    /// untouched; a changed code is re-checked for uniqueness against all
    /// other records.
    pub async fn update_alias(&self, update: AliasUpdate) -> Result<Alias, EngineError> {
        let existing = self
            .find_by_id(&update.id)
            .await
            .ok_or_else(|| EngineError::NotFound {
                id: update.id.clone(),
            })?;

        if let Some(code) = &update.code {
            validate_code(code)?;
            if *code != existing.code {
                self.check_unique(code, Some(&update.id)).await?;
            }
        }
        if let Some(link) = &update.link {
            validate_link(link)?;
        }

        self.aliases
            .modify(|alias| alias.id == update.id, |alias| update.apply(alias))
            .await;

        let updated = self
            .find_by_id(&update.id)
            .await
            .ok_or_else(|| EngineError::NotFound {
                id: update.id.clone(),
            })?;
        info!(code = %updated.code, id = %updated.id, "updated alias");
        Ok(updated)
    }

    /// Remove an alias by id.
    pub async fn delete_alias(&self, delete: AliasDelete) -> Result<Alias, EngineError> {
        let existing = self
            .find_by_id(&delete.id)
            .await
            .ok_or_else(|| EngineError::NotFound {
                id: delete.id.clone(),
            })?;

        self.aliases.delete(|alias| alias.id == delete.id).await;
        info!(code = %existing.code, id = %existing.id, "deleted alias");
        Ok(existing)
    }

    /// Handle an omnibox event: suggestions for input changes, resolution
    /// and navigation for submissions. Unmatched submissions are a silent
    /// no-op, not an error.
    pub async fn handle_omnibox(&self, event: OmniboxEvent) -> Result<OmniboxOutcome, EngineError> {
        match event {
            OmniboxEvent::Change { text } => {
                let aliases = self.aliases.get().await;
                let mut matches = resolver::completions(&aliases, &text);
                matches.sort_by(|a, b| a.code.cmp(&b.code));
                debug!(%text, count = matches.len(), "omnibox completions");
                Ok(OmniboxOutcome::Suggestions(
                    matches.into_iter().map(Suggestion::from).collect(),
                ))
            }
            OmniboxEvent::Enter { text, disposition } => {
                let aliases = self.aliases.get().await;
                let Some(alias) = resolver::best_alias(&aliases, &text) else {
                    debug!(%text, "no alias resolved for submission");
                    return Ok(OmniboxOutcome::None);
                };
                info!(code = %alias.code, link = %alias.link, ?disposition, "resolved alias");
                match disposition {
                    Disposition::CurrentTab => self.tabs.update_current(&alias.link).await?,
                    Disposition::NewForegroundTab => self.tabs.create(&alias.link, true).await?,
                    Disposition::NewBackgroundTab => self.tabs.create(&alias.link, false).await?,
                }
                Ok(OmniboxOutcome::Navigated(alias.clone()))
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Option<Alias> {
        self.aliases
            .find(|alias| alias.id == id)
            .await
            .into_iter()
            .next()
    }

    /// Reject `code` if any record other than `except_id` already holds it.
    async fn check_unique(&self, code: &str, except_id: Option<&str>) -> Result<(), EngineError> {
        let taken = self
            .aliases
            .find(|alias| alias.code == code && Some(alias.id.as_str()) != except_id)
            .await;
        if taken.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Conflict {
                code: code.to_string(),
            })
        }
    }
}

fn validate_code(code: &str) -> Result<(), EngineError> {
    if code.is_empty() {
        return Err(EngineError::Validation(
            "alias code must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_link(link: &str) -> Result<(), EngineError> {
    // Url::parse without a base only accepts absolute URLs
    Url::parse(link).map_err(|err| {
        EngineError::Validation(format!("alias link must be an absolute URL: {err}"))
    })?;
    Ok(())
}
