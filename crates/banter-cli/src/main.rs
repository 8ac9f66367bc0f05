mod commands;
mod logger;
mod render;

use std::sync::Arc;

use anyhow::Result;
use banter_client::ReqwestClient;
use banter_feed::middleware::{ApiMiddleware, Dispatcher, LoggingMiddleware, SessionMiddleware};
use banter_feed::{Action, Store};
use banter_session::{FileCredentialStore, MemoryCredentialStore, SessionMonitor};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use commands::Command;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let log_file = logger::init();
    log::info!("Starting banter");

    let api_url = std::env::var("BANTER_API_URL")
        .unwrap_or_else(|_| banter_client::DEFAULT_API_URL.to_string());
    log::info!("Talking to {}", api_url);

    let monitor = Arc::new(match FileCredentialStore::open() {
        Ok(store) => SessionMonitor::new(store),
        Err(err) => {
            log::warn!(
                "Credential file unavailable ({}), keeping credentials in memory",
                err
            );
            SessionMonitor::new(MemoryCredentialStore::default())
        }
    });
    let client = Arc::new(ReqwestClient::new(&api_url));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(tx);

    let mut store = Store::default();
    // Order matters: logging sees everything, the session middleware
    // settles credentials before the API middleware uses them.
    store.add_middleware(LoggingMiddleware);
    store.add_middleware(SessionMiddleware::new(monitor.clone()));
    store.add_middleware(ApiMiddleware::new(client, monitor));

    println!(
        "banter {} (log: {})",
        env!("CARGO_PKG_VERSION"),
        log_file.display()
    );
    println!("Type 'help' for commands.");

    store
        .dispatch_async(Action::RestoreSession, &dispatcher)
        .await;
    store.dispatch_async(Action::FetchFeed, &dispatcher).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while store.state().running {
        tokio::select! {
            queued = rx.recv() => {
                let Some(action) = queued else { break };
                step(&mut store, &dispatcher, action).await;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => handle_line(&mut store, &dispatcher, &line).await,
                    None => break,
                }
            }
        }
    }

    log::info!("Exiting banter");
    Ok(())
}

async fn handle_line(store: &mut Store, dispatcher: &Dispatcher, line: &str) {
    match commands::parse(line) {
        Command::Dispatch(action) => step(store, dispatcher, action).await,
        Command::Help => println!("{}", commands::HELP),
        Command::WhoAmI => render::whoami(store.state()),
        Command::Usage(usage) => println!("{}", usage),
        Command::Unknown(verb) => println!("Unknown command '{}', try 'help'", verb),
    }
}

/// Run one action through the store and print what it changed
async fn step(store: &mut Store, dispatcher: &Dispatcher, action: Action) {
    let status_before = store.state().status.clone();
    store.dispatch_async(action.clone(), dispatcher).await;
    if store.state().status != status_before {
        render::status(store.state());
    }
    render::after_action(&action, store.state());
}
