//! Terminal front end for the support assistant
//!
//! Reads one message per line from stdin and prints the transcript as it
//! grows. `/health`, `/escalate` and `/quit` are handled locally.

use support_chat::{
    start_session, ClientConfig, HttpAssistant, LoggingAssistant, MessageEntry, Sender,
    SessionContext, SessionEvent, SessionId, SubmitOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they do not interleave with the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "support_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let http = HttpAssistant::new(&config)?;

    let mut context = SessionContext::new(SessionId::create());
    if let Some(greeting) = &config.greeting {
        context = context.with_greeting(greeting.clone());
    }

    tracing::info!(
        api_url = %http.base_url(),
        session_id = %context.session_id,
        "Starting chat session"
    );

    let handle = start_session(context, LoggingAssistant::new(http.clone()));
    let mut events = handle.subscribe();

    println!("AI Customer Support  ({})", handle.session_id());
    println!("Type a message and press Enter. Commands: /health /escalate /quit");
    for entry in handle.view().timeline.iter() {
        print_entry(entry);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/health" => match http.health().await {
                Ok(status) if status.is_ok() => println!("Service is up"),
                Ok(status) => println!("Service reported status {:?}", status.status),
                Err(e) => println!("Service unreachable: {e}"),
            },
            "/escalate" => match http.escalate(handle.session_id()).await {
                Ok(reply) => println!("Summary for agent:\n{}", reply.summary),
                Err(e) => println!("Could not escalate: {e}"),
            },
            _ => match handle.submit(line).await? {
                // Input is not read again until the reply is in
                SubmitOutcome::Accepted => render_until_idle(&mut events).await,
                SubmitOutcome::Dropped(reason) => {
                    tracing::debug!(reason = %reason, "Input ignored");
                }
            },
        }
    }

    Ok(())
}

/// Print notifications for the current exchange until busy clears
async fn render_until_idle(events: &mut broadcast::Receiver<SessionEvent>) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::MessageAppended { entry, .. }) => print_entry(&entry),
            Ok(SessionEvent::BusyChanged(true)) => println!("  ..."),
            Ok(SessionEvent::BusyChanged(false)) => return,
            Ok(SessionEvent::BannerChanged(Some(message))) => eprintln!("⚠️ {message}"),
            Ok(SessionEvent::BannerChanged(None)) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Transcript output lagged");
            }
            Err(RecvError::Closed) => return,
        }
    }
}

fn print_entry(entry: &MessageEntry) {
    let time = entry
        .created_at
        .with_timezone(&chrono::Local)
        .format("%I:%M %p");
    let who = match entry.sender {
        Sender::User => "You",
        Sender::Assistant => "Assistant",
    };
    println!("[{time}] {who}: {}", entry.text);
}
