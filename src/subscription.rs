//! Messages posted by the preview frame
//!
//! The preview page reports text selections back to the playground. A
//! [`HostPort`] hands out exactly one [`Subscription`]; the coordinator takes
//! it at startup and drops it on shutdown, after which senders are refused.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounding box of a selection inside the preview frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A message from the preview frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HostEvent {
    /// The user selected text in the rendered preview
    Selection {
        text: String,
        #[serde(default)]
        rect: SelectionRect,
    },
    /// Any other message type; ignored
    #[serde(other)]
    Unknown,
}

impl HostEvent {
    /// Parse a posted JSON message
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    #[error("host messages already have a subscriber")]
    AlreadySubscribed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host message subscription has been torn down")]
pub struct Disconnected;

/// Sending half, held by whatever bridges the preview frame
#[derive(Debug, Clone)]
pub struct HostSender {
    tx: Sender<HostEvent>,
}

impl HostSender {
    pub fn post(&self, event: HostEvent) -> Result<(), Disconnected> {
        self.tx.send(event).map_err(|_| Disconnected)
    }

    /// Parse and post a raw JSON message; unknown message types are dropped
    pub fn post_json(&self, json: &str) -> Result<(), Disconnected> {
        match HostEvent::from_json(json) {
            Ok(HostEvent::Unknown) => Ok(()),
            Ok(event) => self.post(event),
            Err(e) => {
                tracing::debug!("Ignoring malformed host message: {}", e);
                Ok(())
            }
        }
    }
}

/// Registration point for host messages
#[derive(Debug)]
pub struct HostPort {
    tx: Sender<HostEvent>,
    rx: Option<Receiver<HostEvent>>,
}

impl Default for HostPort {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPort {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx: Some(rx) }
    }

    pub fn sender(&self) -> HostSender {
        HostSender {
            tx: self.tx.clone(),
        }
    }

    /// Take the single subscription
    pub fn subscribe(&mut self) -> Result<Subscription, SubscribeError> {
        let rx = self.rx.take().ok_or(SubscribeError::AlreadySubscribed)?;
        Ok(Subscription { rx })
    }

    pub fn is_subscribed(&self) -> bool {
        self.rx.is_none()
    }
}

/// Receiving half; dropping it tears the channel down
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<HostEvent>,
}

impl Subscription {
    /// Everything posted since the last drain, in order
    pub fn drain(&self) -> Vec<HostEvent> {
        self.rx.try_iter().collect()
    }
}
