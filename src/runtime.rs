//! Runtime for driving a conversation session
//!
//! One task owns the controller state and processes events in order. The
//! presentation layer talks to it through a [`SessionHandle`].

mod executor;
pub mod traits;


pub use traits::*;

use executor::SessionRuntime;

use crate::session::SessionId;
use crate::state_machine::{Event, SessionContext, TransitionError};
use crate::timeline::{MessageEntry, TimelineSnapshot};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

const EVENT_CHANNEL_CAPACITY: usize = 32;
const BROADCAST_CHANNEL_CAPACITY: usize = 128;

/// Change notifications for observers, sent after each mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    MessageAppended { index: usize, entry: MessageEntry },
    BusyChanged(bool),
    BannerChanged(Option<String>),
}

/// Read-only snapshot of the controller state
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session_id: SessionId,
    pub timeline: TimelineSnapshot,
    pub busy: bool,
    pub last_error: Option<String>,
}

/// What happened to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// User entry appended and a request is in flight
    Accepted,
    /// Silently dropped; nothing changed
    Dropped(TransitionError),
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session runtime has stopped")]
    Closed,
}

/// Event plus an optional acknowledgement channel
#[derive(Debug)]
pub(crate) struct Inbound {
    pub event: Event,
    pub ack: Option<oneshot::Sender<Result<(), TransitionError>>>,
}

/// Handle to interact with a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    event_tx: mpsc::Sender<Inbound>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
    view_rx: watch::Receiver<SessionView>,
}

impl SessionHandle {
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Submit user text.
    ///
    /// Resolves once the submission has been accepted or dropped, never
    /// waiting on the remote reply.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the runtime task is gone.
    pub async fn submit(&self, text: impl Into<String>) -> Result<SubmitOutcome, SessionError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.event_tx
            .send(Inbound {
                event: Event::submit(text),
                ack: Some(ack_tx),
            })
            .await
            .map_err(|_| SessionError::Closed)?;

        match ack_rx.await.map_err(|_| SessionError::Closed)? {
            Ok(()) => Ok(SubmitOutcome::Accepted),
            Err(reason) => Ok(SubmitOutcome::Dropped(reason)),
        }
    }

    /// Current state snapshot
    #[must_use]
    pub fn view(&self) -> SessionView {
        self.view_rx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Wait until the view satisfies `predicate`
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the runtime stops first.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&SessionView) -> bool,
    ) -> Result<SessionView, SessionError> {
        let mut view_rx = self.view_rx.clone();
        let view = view_rx
            .wait_for(predicate)
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(view.clone())
    }

    /// Wait until no request is in flight
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the runtime stops first.
    pub async fn wait_until_idle(&self) -> Result<SessionView, SessionError> {
        self.wait_for(|view| !view.busy).await
    }
}

/// Start a session runtime in the background.
///
/// Must be called from within a tokio runtime. The task stops once every
/// handle is dropped and no request is in flight.
#[must_use]
pub fn start_session<A>(context: SessionContext, assistant: A) -> SessionHandle
where
    A: AssistantClient + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (broadcast_tx, _) = broadcast::channel(BROADCAST_CHANNEL_CAPACITY);

    let session_id = context.session_id.clone();
    let runtime = SessionRuntime::new(
        context,
        assistant,
        event_rx,
        event_tx.downgrade(),
        broadcast_tx.clone(),
    );
    let view_rx = runtime.watch_view();

    tokio::spawn(async move {
        runtime.run().await;
    });

    SessionHandle {
        session_id,
        event_tx,
        broadcast_tx,
        view_rx,
    }
}
