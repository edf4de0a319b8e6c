//! End-to-end tests over the worker, controller, and memory storage,
//! exercising the full create/resolve/commit flow.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use beacon_engine::{
    ClientRequest, ControllerResponse, Disposition, EngineError, OmniboxEvent, OmniboxOutcome,
    Tabs, Worker,
};
use beacon_store::{Alias, AliasContext, AliasCreate, AliasUpdate, MemoryStorage};

/// Records every navigation instead of driving a browser.
#[derive(Default)]
struct RecordingTabs {
    urls: Mutex<Vec<String>>,
}

impl RecordingTabs {
    fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tabs for RecordingTabs {
    async fn update_current(&self, url: &str) -> Result<(), EngineError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn create(&self, url: &str, _active: bool) -> Result<(), EngineError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

fn harness(storage: Arc<MemoryStorage>) -> (Worker, Arc<RecordingTabs>) {
    let tabs = Arc::new(RecordingTabs::default());
    let worker = Worker::new(AliasContext::new(storage), tabs.clone());
    (worker, tabs)
}

async fn add(worker: &Worker, code: &str, link: &str) -> Alias {
    let response = worker
        .handle_request(ClientRequest::AliasCreate {
            alias: AliasCreate {
                code: code.to_string(),
                link: link.to_string(),
                note: String::new(),
            },
        })
        .await;
    match response {
        ControllerResponse::Alias { alias } => alias,
        other => panic!("create failed: {other:?}"),
    }
}

async fn resolve(worker: &Worker, text: &str) -> OmniboxOutcome {
    worker
        .handle_omnibox(OmniboxEvent::Enter {
            text: text.to_string(),
            disposition: Disposition::CurrentTab,
        })
        .await
        .unwrap()
}

fn navigated_code(outcome: OmniboxOutcome) -> Option<String> {
    match outcome {
        OmniboxOutcome::Navigated(alias) => Some(alias.code),
        _ => None,
    }
}

#[tokio::test]
async fn growing_alias_set_changes_resolution() {
    let (worker, tabs) = harness(Arc::new(MemoryStorage::new()));
    add(&worker, "gh", "https://github.com").await;

    // Exact match and unique prefix both resolve
    assert_eq!(navigated_code(resolve(&worker, "gh").await).as_deref(), Some("gh"));
    assert_eq!(navigated_code(resolve(&worker, "g").await).as_deref(), Some("gh"));

    // A sibling code makes the prefix ambiguous, but not the exact match
    add(&worker, "git", "https://git-scm.com").await;
    assert_eq!(resolve(&worker, "g").await, OmniboxOutcome::None);
    assert_eq!(navigated_code(resolve(&worker, "gh").await).as_deref(), Some("gh"));

    assert_eq!(
        tabs.urls(),
        vec![
            "https://github.com".to_string(),
            "https://github.com".to_string(),
            "https://github.com".to_string(),
        ]
    );
}

#[tokio::test]
async fn full_crud_session_survives_restart() {
    let storage = Arc::new(MemoryStorage::new());

    let (worker, _) = harness(storage.clone());
    let gh = add(&worker, "gh", "https://github.com").await;
    add(&worker, "hn", "https://news.ycombinator.com").await;

    let response = worker
        .handle_request(ClientRequest::AliasUpdate {
            alias: AliasUpdate {
                id: gh.id.clone(),
                code: None,
                link: None,
                note: Some("my forge".to_string()),
            },
        })
        .await;
    assert!(matches!(response, ControllerResponse::Alias { .. }));

    // A fresh worker over the same storage simulates a process restart
    let (restarted, _) = harness(storage);
    let ControllerResponse::Aliases { aliases } =
        restarted.handle_request(ClientRequest::AliasesGet).await
    else {
        panic!("expected aliases response");
    };

    assert_eq!(aliases.len(), 2);
    let persisted_gh = aliases.iter().find(|a| a.id == gh.id).unwrap();
    assert_eq!(persisted_gh.note, "my forge");
}

#[tokio::test]
async fn duplicate_create_reports_conflict_without_side_effects() {
    let (worker, _) = harness(Arc::new(MemoryStorage::new()));
    add(&worker, "gh", "https://github.com").await;

    let response = worker
        .handle_request(ClientRequest::AliasCreate {
            alias: AliasCreate {
                code: "gh".to_string(),
                link: "https://gitlab.com".to_string(),
                note: String::new(),
            },
        })
        .await;

    assert_eq!(
        response,
        ControllerResponse::error("an alias with code 'gh' already exists")
    );

    let ControllerResponse::Aliases { aliases } =
        worker.handle_request(ClientRequest::AliasesGet).await
    else {
        panic!("expected aliases response");
    };
    assert_eq!(aliases.len(), 1);
    assert_eq!(aliases[0].link, "https://github.com");
}

#[tokio::test]
async fn suggestions_come_back_sorted_with_notes() {
    let (worker, _) = harness(Arc::new(MemoryStorage::new()));
    for (code, link, note) in [
        ("wiki", "https://en.wikipedia.org", "Wikipedia"),
        ("gh", "https://github.com", "GitHub"),
        ("git", "https://git-scm.com", "Git"),
    ] {
        let response = worker
            .handle_request(ClientRequest::AliasCreate {
                alias: AliasCreate {
                    code: code.to_string(),
                    link: link.to_string(),
                    note: note.to_string(),
                },
            })
            .await;
        assert!(matches!(response, ControllerResponse::Alias { .. }));
    }

    let outcome = worker
        .handle_omnibox(OmniboxEvent::Change {
            text: "g".to_string(),
        })
        .await
        .unwrap();

    let OmniboxOutcome::Suggestions(suggestions) = outcome else {
        panic!("expected suggestions");
    };
    let pairs: Vec<_> = suggestions
        .iter()
        .map(|s| (s.content.as_str(), s.description.as_str()))
        .collect();
    assert_eq!(pairs, vec![("gh", "GitHub"), ("git", "Git")]);
}

#[tokio::test]
async fn unmatched_submission_does_not_navigate() {
    let (worker, tabs) = harness(Arc::new(MemoryStorage::new()));
    add(&worker, "gh", "https://github.com").await;

    assert_eq!(resolve(&worker, "zzz").await, OmniboxOutcome::None);
    assert!(tabs.urls().is_empty());
}
