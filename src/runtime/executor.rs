//! Session runtime executor

use super::traits::AssistantClient;
use super::{Inbound, SessionEvent, SessionView};

use crate::assistant::ChatRequest;
use crate::error_surface::ErrorSurface;
use crate::state_machine::{transition, Effect, Event, Phase, SessionContext, TransitionError};
use crate::timeline::{MessageEntry, Timeline};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Owns the controller state and applies events to it one at a time
pub struct SessionRuntime<A>
where
    A: AssistantClient + 'static,
{
    context: SessionContext,
    phase: Phase,
    timeline: Timeline,
    banner: ErrorSurface,
    assistant: Arc<A>,
    event_rx: mpsc::Receiver<Inbound>,
    /// Weak so that dropping every handle ends the loop
    event_tx: mpsc::WeakSender<Inbound>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
    view_tx: watch::Sender<SessionView>,
}

impl<A> SessionRuntime<A>
where
    A: AssistantClient + 'static,
{
    pub(crate) fn new(
        context: SessionContext,
        assistant: A,
        event_rx: mpsc::Receiver<Inbound>,
        event_tx: mpsc::WeakSender<Inbound>,
        broadcast_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        let mut timeline = Timeline::new();
        if let Some(greeting) = &context.greeting {
            timeline.append(MessageEntry::assistant(greeting.clone(), Utc::now()));
        }

        let (view_tx, _) = watch::channel(SessionView {
            session_id: context.session_id.clone(),
            timeline: timeline.snapshot(),
            busy: false,
            last_error: None,
        });

        Self {
            context,
            phase: Phase::Idle,
            timeline,
            banner: ErrorSurface::new(),
            assistant: Arc::new(assistant),
            event_rx,
            event_tx,
            broadcast_tx,
            view_tx,
        }
    }

    pub(crate) fn watch_view(&self) -> watch::Receiver<SessionView> {
        self.view_tx.subscribe()
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.context.session_id, "Starting session runtime");

        while let Some(inbound) = self.event_rx.recv().await {
            let outcome = self.process_event(inbound.event);
            if let Some(ack) = inbound.ack {
                // The submitter may have gone away; nothing to do then
                let _ = ack.send(outcome);
            }
        }

        tracing::info!(session_id = %self.context.session_id, "Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        let event_name = event.name();

        // Pure state transition
        let result = match transition(&self.phase, event) {
            Ok(r) => r,
            Err(e) => {
                if e.is_validation() {
                    tracing::debug!(
                        session_id = %self.context.session_id,
                        reason = %e,
                        "Submission dropped"
                    );
                } else {
                    tracing::warn!(
                        session_id = %self.context.session_id,
                        event = event_name,
                        error = %e,
                        "Ignoring event"
                    );
                }
                return Err(e);
            }
        };

        let was_busy = self.phase.is_busy();
        let mut notifications = Vec::new();
        let mut pending_request = None;

        for effect in result.effects {
            match effect {
                Effect::ClearBanner => {
                    if self.banner.current().is_some() {
                        self.banner.clear();
                        notifications.push(SessionEvent::BannerChanged(None));
                    }
                }
                Effect::AppendMessage(entry) => {
                    let index = self.timeline.append(entry.clone());
                    notifications.push(SessionEvent::MessageAppended { index, entry });
                }
                Effect::ShowBanner(message) => {
                    self.banner.set(message.clone());
                    notifications.push(SessionEvent::BannerChanged(Some(message)));
                }
                Effect::RequestReply { query } => {
                    pending_request = Some(query);
                }
            }
        }

        // Commit the phase last, so busy clears after the reply is recorded
        let old_phase = std::mem::replace(&mut self.phase, result.new_state);
        tracing::debug!(
            session_id = %self.context.session_id,
            event = event_name,
            from = old_phase.name(),
            to = self.phase.name(),
            "Transition"
        );
        if was_busy != self.phase.is_busy() {
            notifications.push(SessionEvent::BusyChanged(self.phase.is_busy()));
        }

        self.publish_view();
        for notification in notifications {
            // No subscribers is fine
            let _ = self.broadcast_tx.send(notification);
        }

        if let Some(query) = pending_request {
            self.spawn_request(query);
        }

        Ok(())
    }

    fn publish_view(&self) {
        self.view_tx.send_replace(SessionView {
            session_id: self.context.session_id.clone(),
            timeline: self.timeline.snapshot(),
            busy: self.phase.is_busy(),
            last_error: self.banner.current().map(str::to_string),
        });
    }

    /// Issue the remote call on its own task. It reports back exactly one
    /// reply event whatever happens, including a panic in the client.
    fn spawn_request(&mut self, query: String) {
        let Some(event_tx) = self.event_tx.upgrade() else {
            // Every handle is gone; settle the request locally
            let _ = self.process_event(Event::reply_failed("session closed before request"));
            return;
        };

        let request = ChatRequest {
            session_id: self.context.session_id.clone(),
            query,
        };
        let assistant = Arc::clone(&self.assistant);
        let session_id = self.context.session_id.clone();

        tracing::info!(
            session_id = %session_id,
            query_len = request.query.len(),
            "Sending query"
        );

        tokio::spawn(async move {
            let call = tokio::spawn(async move { assistant.reply(&request).await });

            let event = match call.await {
                Ok(Ok(reply)) => Event::reply_received(reply.response),
                Ok(Err(e)) => {
                    tracing::warn!(
                        session_id = %session_id,
                        kind = ?e.kind,
                        error = %e,
                        "Assistant request failed"
                    );
                    Event::reply_failed(e.to_string())
                }
                Err(join_error) => {
                    tracing::error!(
                        session_id = %session_id,
                        error = %join_error,
                        "Assistant request aborted"
                    );
                    Event::reply_failed(format!("request task failed: {join_error}"))
                }
            };

            if event_tx.send(Inbound { event, ack: None }).await.is_err() {
                tracing::debug!(session_id = %session_id, "Runtime gone before reply arrived");
            }
        });
    }
}
