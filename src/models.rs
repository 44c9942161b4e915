use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub last_message_preview: String,
    pub last_timestamp_label: String,
    pub unread_count: u32,
    pub online: bool,
}

impl Contact {
    /// First letter of every word in the name, e.g. "Alex Morgan" -> "AM".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }

    pub fn presence_label(&self) -> &'static str {
        if self.online {
            "Online"
        } else {
            "Offline"
        }
    }

    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Me,   // The local user
    Peer, // The contact on the other end
}

/// Delivery label attached to a message when it is created. Nothing ever
/// moves a message from one state to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

impl DeliveryStatus {
    pub fn glyph(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "✓",
            DeliveryStatus::Delivered | DeliveryStatus::Read => "✓✓",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub created_at: DateTime<Local>,
    pub delivery_status: DeliveryStatus,
}

impl Message {
    pub fn is_mine(&self) -> bool {
        self.sender == Sender::Me
    }

    /// 12-hour clock label such as "09:05 PM".
    pub fn time_label(&self) -> String {
        self.created_at.format("%I:%M %p").to_string()
    }
}
