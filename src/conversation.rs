use chrono::{DateTime, Local};
use log::{debug, info};
use uuid::Uuid;

use crate::mock;
use crate::models::{DeliveryStatus, Message, Sender};

/// Message history for the conversation currently on screen.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Throws away whatever was there and starts over from the seed history.
    /// Called on every contact selection, including re-selecting the same one.
    pub fn reset(&mut self, now: DateTime<Local>) {
        self.messages = mock::seed_messages(now);
        debug!("Conversation reset to {} seed messages", self.messages.len());
    }

    /// Appends a message from the local user.
    ///
    /// Text that is empty after trimming is ignored and `None` comes back.
    /// Otherwise the text is stored as typed and a copy of the new message
    /// is returned so the caller can clear its input and schedule the reply.
    pub fn send_message(&mut self, text: &str, now: DateTime<Local>) -> Option<Message> {
        if text.trim().is_empty() {
            return None;
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            sender: Sender::Me,
            created_at: now,
            delivery_status: DeliveryStatus::Sent,
        };
        info!("Sending message {} ({} chars)", message.id, message.text.chars().count());
        self.messages.push(message.clone());
        Some(message)
    }

    /// Appends an already-built message, e.g. a delayed auto-reply.
    pub fn receive(&mut self, message: Message) {
        debug!("Received message {} from {:?}", message.id, message.sender);
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
