// Re-export needed modules for the binary and integration tests
pub mod conversation;
pub mod mock;
pub mod models;
pub mod responder;
pub mod settings;
pub mod theme;
pub mod view;

// Re-export main types for convenience
pub use conversation::ConversationStore;
pub use models::*;
pub use responder::AutoResponder;
pub use settings::{Settings, SettingsError};
pub use theme::{Palette, ThemeName};
pub use view::{View, ViewController};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn message(sender: Sender, status: DeliveryStatus) -> Message {
        Message {
            id: "msg123".to_string(),
            text: "Hello, world!".to_string(),
            sender,
            created_at: Local::now(),
            delivery_status: status,
        }
    }

    #[test]
    fn test_contact_initials() {
        let contacts = mock::contacts();
        let initials: Vec<String> = contacts.iter().map(|c| c.initials()).collect();
        assert_eq!(initials, vec!["AM", "SR", "JL", "CT", "MB"]);

        let single = Contact {
            name: "Cher".to_string(),
            ..contacts[0].clone()
        };
        assert_eq!(single.initials(), "C");
    }

    #[test]
    fn test_contact_presence_and_unread() {
        let contacts = mock::contacts();
        assert_eq!(contacts[0].presence_label(), "Online");
        assert_eq!(contacts[1].presence_label(), "Offline");
        assert!(contacts[0].has_unread());
        assert!(!contacts[1].has_unread());
    }

    #[test]
    fn test_delivery_glyphs() {
        assert_eq!(DeliveryStatus::Sent.glyph(), "✓");
        assert_eq!(DeliveryStatus::Delivered.glyph(), "✓✓");
        assert_eq!(DeliveryStatus::Read.glyph(), "✓✓");
    }

    #[test]
    fn test_message_ownership() {
        assert!(message(Sender::Me, DeliveryStatus::Sent).is_mine());
        assert!(!message(Sender::Peer, DeliveryStatus::Read).is_mine());
    }

    #[test]
    fn test_time_label_is_twelve_hour() {
        let mut msg = message(Sender::Me, DeliveryStatus::Sent);

        msg.created_at = Local.with_ymd_and_hms(2024, 6, 15, 21, 5, 0).unwrap();
        assert_eq!(msg.time_label(), "09:05 PM");

        msg.created_at = Local.with_ymd_and_hms(2024, 6, 15, 0, 30, 0).unwrap();
        assert_eq!(msg.time_label(), "12:30 AM");
    }
}
