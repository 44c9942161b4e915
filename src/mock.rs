// Hardcoded contacts, seed history and the canned auto-reply. Nothing here
// talks to a server; every conversation starts from the same five messages.

use chrono::{DateTime, Duration as ChronoDuration, Local};
use std::time::Duration;
use uuid::Uuid;

use crate::models::{Contact, DeliveryStatus, Message, Sender};

pub const AUTO_REPLY_TEXT: &str = "That's interesting! Tell me more 😊";

pub const AUTO_REPLY_DELAY: Duration = Duration::from_millis(1500);

// (id, text, sender, seconds before now, status)
const SEED: [(&str, &str, Sender, i64, DeliveryStatus); 5] = [
    ("1", "Hey! How are you?", Sender::Peer, 3600, DeliveryStatus::Read),
    ("2", "I'm good! Just working on a new project", Sender::Me, 3500, DeliveryStatus::Read),
    ("3", "That's awesome! What kind of project?", Sender::Peer, 3400, DeliveryStatus::Read),
    ("4", "A messaging app with a neon theme", Sender::Me, 3300, DeliveryStatus::Delivered),
    ("5", "Wow! Sounds really cool 🔥", Sender::Peer, 3200, DeliveryStatus::Read),
];

fn contact(id: &str, name: &str, preview: &str, label: &str, unread: u32, online: bool) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        last_message_preview: preview.to_string(),
        last_timestamp_label: label.to_string(),
        unread_count: unread,
        online,
    }
}

/// The fixed contact list shown on the chats screen.
pub fn contacts() -> Vec<Contact> {
    vec![
        contact("1", "Alex Morgan", "Hey! How are you doing?", "10:30 AM", 2, true),
        contact("2", "Sam Rivera", "See you tomorrow!", "9:15 AM", 0, false),
        contact("3", "Jordan Lee", "Thanks for your help 😊", "Yesterday", 1, true),
        contact("4", "Casey Taylor", "Did you check the file?", "Yesterday", 0, false),
        contact("5", "Morgan Blake", "Perfect! Let's do it", "Tuesday", 0, true),
    ]
}

/// The history every conversation opens with, timestamped relative to `now`.
pub fn seed_messages(now: DateTime<Local>) -> Vec<Message> {
    SEED.iter()
        .map(|(id, text, sender, secs_ago, status)| Message {
            id: id.to_string(),
            text: text.to_string(),
            sender: *sender,
            created_at: now - ChronoDuration::seconds(*secs_ago),
            delivery_status: *status,
        })
        .collect()
}

pub fn auto_reply(now: DateTime<Local>) -> Message {
    Message {
        id: Uuid::new_v4().to_string(),
        text: AUTO_REPLY_TEXT.to_string(),
        sender: Sender::Peer,
        created_at: now,
        delivery_status: DeliveryStatus::Sent,
    }
}
