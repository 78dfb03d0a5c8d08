//! Conversation session controller for a remote support assistant
//!
//! Keeps the transcript of one chat session, drives a single request per user
//! turn and surfaces failures. Rendering is left to the caller, which reads
//! [`runtime::SessionView`] snapshots and listens for
//! [`runtime::SessionEvent`] notifications.

pub mod assistant;
pub mod config;
pub mod error_surface;
pub mod runtime;
pub mod session;
pub mod state_machine;
pub mod timeline;

pub use assistant::{HttpAssistant, LoggingAssistant};
pub use config::ClientConfig;
pub use runtime::{start_session, SessionError, SessionEvent, SessionHandle, SessionView, SubmitOutcome};
pub use session::SessionId;
pub use state_machine::SessionContext;
pub use timeline::{MessageEntry, Sender};
