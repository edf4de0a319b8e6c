//! Dispatch harness tying the controller to the persistence boundary.

use std::sync::Arc;

use beacon_store::{AliasContext, SyncedCache};
use tracing::warn;

use crate::omnibox::{OmniboxEvent, OmniboxOutcome};
use crate::protocol::{ClientRequest, ControllerResponse};
use crate::{Controller, EngineError, Tabs};

/// Owns the alias context and a lazily-built controller, and sequences
/// every mutating operation with a commit back to storage.
///
/// The controller sits behind a [`SyncedCache`] so that a burst of events
/// arriving before first initialization (one per omnibox keystroke) shares
/// a single storage read.
pub struct Worker {
    context: Arc<AliasContext>,
    controller: SyncedCache<Arc<Controller>, EngineError>,
}

impl Worker {
    pub fn new(context: AliasContext, tabs: Arc<dyn Tabs>) -> Self {
        let context = Arc::new(context);
        let controller = SyncedCache::new({
            let context = context.clone();
            move || {
                let context = context.clone();
                let tabs = tabs.clone();
                async move {
                    let aliases = context.fetch().await?;
                    Ok(Arc::new(Controller::new(aliases, tabs)))
                }
            }
        });
        Self { context, controller }
    }

    /// Handle an omnibox event and commit any resulting changes.
    #[tracing::instrument(skip(self, event))]
    pub async fn handle_omnibox(&self, event: OmniboxEvent) -> Result<OmniboxOutcome, EngineError> {
        let controller = self.controller.value().await?;
        let outcome = controller.handle_omnibox(event).await?;
        self.context.commit().await?;
        Ok(outcome)
    }

    /// Handle a CRUD request from a UI surface. Mutations are committed
    /// before the response is returned; failures become error responses
    /// rather than crossing the boundary as `Err`.
    #[tracing::instrument(skip(self, request))]
    pub async fn handle_request(&self, request: ClientRequest) -> ControllerResponse {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "request failed");
                ControllerResponse::error(err.to_string())
            }
        }
    }

    async fn dispatch(&self, request: ClientRequest) -> Result<ControllerResponse, EngineError> {
        let controller = self.controller.value().await?;
        let commit = request.is_mutation();
        let response = match request {
            ClientRequest::AliasesGet => ControllerResponse::Aliases {
                aliases: controller.aliases().await,
            },
            ClientRequest::AliasCreate { alias } => ControllerResponse::Alias {
                alias: controller.create_alias(alias).await?,
            },
            ClientRequest::AliasUpdate { alias } => ControllerResponse::Alias {
                alias: controller.update_alias(alias).await?,
            },
            ClientRequest::AliasDelete { alias } => ControllerResponse::Alias {
                alias: controller.delete_alias(alias).await?,
            },
        };
        if commit {
            self.context.commit().await?;
        }
        Ok(response)
    }

    /// Drop both the alias cache and the controller built over it. The
    /// next event re-reads from storage, as after a process restart.
    pub async fn clear(&self) {
        self.context.clear().await;
        self.controller.clear().await;
    }
}
