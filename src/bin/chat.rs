//! Terminal chat client
//!
//! Reads prompts line by line from stdin and drives one conversation
//! against the ask service. Output comes from the controller's event stream.

use parley::config::ClientConfig;
use parley::{
    ControllerEvent, ConvState, ConversationController, Entry, HttpBackend, LoggingBackend,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't mix with the conversation
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env()?;
    let backend = HttpBackend::new(&config.backend_url, config.request_timeout)?;
    println!("Parley chat ({}). Ctrl-D to quit.", backend.url());
    let controller = ConversationController::new(LoggingBackend::new(Arc::new(backend)));
    let mut events = controller.subscribe();

    println!("Start the conversation...");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                if controller.is_awaiting_reply() {
                    println!("(still waiting for the last reply, message dropped)");
                    continue;
                }
                controller.submit(&line);
            }
            event = events.recv() => {
                if !render_event(event) {
                    break;
                }
            }
        }
    }

    // Let an outstanding reply land before exiting (piped input)
    while controller.is_awaiting_reply() {
        let event = events.recv().await;
        let idle = matches!(event, Ok(ControllerEvent::StateChanged(ConvState::Idle)));
        if !render_event(event) || idle {
            break;
        }
    }

    Ok(())
}

/// Print one controller event. Returns false once the stream is closed.
fn render_event(event: Result<ControllerEvent, RecvError>) -> bool {
    match event {
        Ok(ControllerEvent::EntryAppended(entry)) => {
            println!("{}", render_entry(&entry));
            true
        }
        Ok(ControllerEvent::StateChanged(ConvState::AwaitingReply)) => {
            println!("Agent is typing...");
            true
        }
        Ok(ControllerEvent::StateChanged(ConvState::Idle)) => true,
        Err(RecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "Display fell behind the conversation");
            true
        }
        Err(RecvError::Closed) => false,
    }
}

fn render_entry(entry: &Entry) -> String {
    format!("{}: {}", entry.origin().label(), entry.text())
}
