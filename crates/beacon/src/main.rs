//! Beacon: omnibox alias manager.
//!
//! Main binary with subcommands:
//! - `list` / `add` / `update` / `remove`: alias CRUD
//! - `complete` / `resolve`: omnibox matching against the stored aliases
//! - `init`: create the data file, optionally with starter aliases
//! - `omni`: interactive omnibox simulator

use std::io::BufRead;
use std::sync::Arc;

use async_trait::async_trait;
use beacon_engine::{
    ClientRequest, ControllerResponse, Disposition, EngineError, OmniboxEvent, OmniboxOutcome,
    Suggestion, Tabs, Worker,
};
use beacon_store::{AliasContext, AliasCreate, AliasDelete, AliasUpdate, JsonFileStorage};
use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "Omnibox alias manager", long_about = None)]
struct Cli {
    /// Path of the JSON data file
    #[arg(long, env = "BEACON_DATA", default_value = "beacon.json", global = true)]
    data: String,

    #[command(subcommand)]
    command: Commands,
}

/// How to open a resolved alias, mirroring the omnibox dispositions.
#[derive(Clone, Copy, ValueEnum)]
enum OpenIn {
    Current,
    Foreground,
    Background,
}

impl From<OpenIn> for Disposition {
    fn from(open: OpenIn) -> Self {
        match open {
            OpenIn::Current => Disposition::CurrentTab,
            OpenIn::Foreground => Disposition::NewForegroundTab,
            OpenIn::Background => Disposition::NewBackgroundTab,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List all aliases, sorted by code
    List,

    /// Create a new alias
    Add {
        /// Trigger code, unique among all aliases
        code: String,

        /// Absolute URL the code expands to
        link: String,

        /// Free-text description
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Update fields of an existing alias
    Update {
        /// Id of the alias to update
        id: String,

        /// New trigger code
        #[arg(long)]
        code: Option<String>,

        /// New link URL
        #[arg(long)]
        link: Option<String>,

        /// New description
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete an alias
    Remove {
        /// Id of the alias to delete
        id: String,
    },

    /// Show completions for omnibox input
    Complete {
        /// Partial omnibox text
        text: String,
    },

    /// Resolve omnibox input to its best alias
    Resolve {
        /// Submitted omnibox text
        text: String,

        /// Where the navigation would open
        #[arg(long, value_enum, default_value = "current")]
        open: OpenIn,
    },

    /// Initialize the data file
    Init {
        /// Start from the example alias set instead of an empty one
        #[arg(long)]
        seed: bool,
    },

    /// Interactive omnibox simulator (one input per line)
    Omni,
}

/// Tabs collaborator that prints navigations instead of driving a browser.
struct PrintTabs;

#[async_trait]
impl Tabs for PrintTabs {
    async fn update_current(&self, url: &str) -> Result<(), EngineError> {
        println!("-> {url}");
        Ok(())
    }

    async fn create(&self, url: &str, active: bool) -> Result<(), EngineError> {
        let kind = if active { "new tab" } else { "background tab" };
        println!("-> {url} ({kind})");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "beacon=warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let storage = Arc::new(JsonFileStorage::new(&cli.data));
    let context = match &cli.command {
        Commands::Init { seed: true } => {
            AliasContext::with_seed(storage, beacon_store::example_aliases())
        }
        _ => AliasContext::new(storage),
    };
    let worker = Worker::new(context, Arc::new(PrintTabs));

    match cli.command {
        Commands::List => {
            let response = worker.handle_request(ClientRequest::AliasesGet).await;
            let ControllerResponse::Aliases { mut aliases } = response else {
                return Err(miette::miette!("unexpected response to list"));
            };
            aliases.sort_by(|a, b| a.code.cmp(&b.code));
            for alias in aliases {
                print_alias(&alias);
            }
        }

        Commands::Add { code, link, note } => {
            let response = worker
                .handle_request(ClientRequest::AliasCreate {
                    alias: AliasCreate { code, link, note },
                })
                .await;
            report(response)?;
        }

        Commands::Update {
            id,
            code,
            link,
            note,
        } => {
            let response = worker
                .handle_request(ClientRequest::AliasUpdate {
                    alias: AliasUpdate {
                        id,
                        code,
                        link,
                        note,
                    },
                })
                .await;
            report(response)?;
        }

        Commands::Remove { id } => {
            let response = worker
                .handle_request(ClientRequest::AliasDelete {
                    alias: AliasDelete { id },
                })
                .await;
            report(response)?;
        }

        Commands::Complete { text } => {
            let outcome = worker
                .handle_omnibox(OmniboxEvent::Change { text })
                .await
                .map_err(|e| miette::miette!("{}", e))?;
            if let OmniboxOutcome::Suggestions(suggestions) = outcome {
                print_suggestions(&suggestions);
            }
        }

        Commands::Resolve { text, open } => {
            let outcome = worker
                .handle_omnibox(OmniboxEvent::Enter {
                    text,
                    disposition: open.into(),
                })
                .await
                .map_err(|e| miette::miette!("{}", e))?;
            if outcome == OmniboxOutcome::None {
                println!("no alias matched");
            }
        }

        Commands::Init { seed } => {
            // An omnibox event materializes the collection (seeded or
            // empty) and commits, which writes the data file
            let outcome = worker
                .handle_omnibox(OmniboxEvent::Change {
                    text: String::new(),
                })
                .await
                .map_err(|e| miette::miette!("{}", e))?;
            let count = match outcome {
                OmniboxOutcome::Suggestions(suggestions) => suggestions.len(),
                _ => 0,
            };
            println!(
                "initialized {} with {count} alias(es){}",
                cli.data,
                if seed { " (seeded)" } else { "" }
            );
        }

        Commands::Omni => {
            println!("type to see completions; prefix with '!' to submit; ctrl-d to quit");
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line.map_err(|e| miette::miette!("{}", e))?;
                let (submit, text) = match line.strip_prefix('!') {
                    Some(rest) => (true, rest.to_string()),
                    None => (false, line),
                };
                let event = if submit {
                    OmniboxEvent::Enter {
                        text,
                        disposition: Disposition::CurrentTab,
                    }
                } else {
                    OmniboxEvent::Change { text }
                };
                match worker
                    .handle_omnibox(event)
                    .await
                    .map_err(|e| miette::miette!("{}", e))?
                {
                    OmniboxOutcome::Suggestions(suggestions) => print_suggestions(&suggestions),
                    OmniboxOutcome::Navigated(alias) => {
                        tracing::info!(code = %alias.code, "navigated")
                    }
                    OmniboxOutcome::None => println!("no alias matched"),
                }
            }
        }
    }

    Ok(())
}

fn print_alias(alias: &beacon_store::Alias) {
    println!("{:<12} {:<40} {}  [{}]", alias.code, alias.link, alias.note, alias.id);
}

fn print_suggestions(suggestions: &[Suggestion]) {
    for suggestion in suggestions {
        println!("{:<12} {}", suggestion.content, suggestion.description);
    }
}

/// Print a CRUD response; error responses become process failures.
fn report(response: ControllerResponse) -> Result<()> {
    match response {
        ControllerResponse::Alias { alias } => {
            print_alias(&alias);
            Ok(())
        }
        ControllerResponse::Aliases { aliases } => {
            for alias in aliases {
                print_alias(&alias);
            }
            Ok(())
        }
        ControllerResponse::Error { message } => Err(miette::miette!("{}", message)),
    }
}
