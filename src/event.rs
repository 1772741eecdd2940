//! System events recorded by the service layer

use std::sync::mpsc;

use chrono::{DateTime, Utc};
use compact_str::{CompactString, ToCompactString};
use tracing::error;

use crate::client::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub struct SystemEvent {
    /// Service operation that failed, e.g. `get_all_releases`
    pub operation: &'static str,
    pub kind: SystemEventKind,
    pub message: CompactString,
    /// HTTP status when the failure came from a response
    pub status: Option<u16>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SystemEventKind {
    Transport,
    Status,
    Decode,
    Configuration,
}

impl SystemEvent {
    pub fn api_failure(operation: &'static str, err: &ClientError) -> Self {
        let (kind, status) = match err {
            ClientError::Http(e) => match e.status() {
                Some(status) => (SystemEventKind::Status, Some(status.as_u16())),
                None => (SystemEventKind::Transport, None),
            },
            ClientError::JsonParse { .. } => (SystemEventKind::Decode, None),
            ClientError::Config(_)
            | ClientError::ConfigValidation { .. }
            | ClientError::InvalidUrl { .. } => (SystemEventKind::Configuration, None),
        };

        Self {
            operation,
            kind,
            message: err.to_compact_string(),
            status,
            occurred_at: Utc::now(),
        }
    }
}

/// Destination for system events
pub trait EventSink {
    fn record(&self, event: SystemEvent);
}

impl EventSink for mpsc::Sender<SystemEvent> {
    fn record(&self, event: SystemEvent) {
        let _ = self.send(event);
    }
}

/// Writes events to the active `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: SystemEvent) {
        error!(
            target: "audiosalad_sdk::system_event",
            operation = event.operation,
            kind = ?event.kind,
            status = ?event.status,
            occurred_at = %event.occurred_at,
            "{}",
            event.message
        );
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn record(&self, event: SystemEvent) {
        (**self).record(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&self, event: SystemEvent) {
        (**self).record(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for std::sync::Arc<S> {
    fn record(&self, event: SystemEvent) {
        (**self).record(event)
    }
}
