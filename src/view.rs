use log::debug;

use crate::models::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Chats,
    Conversation,
}

/// Which screen is showing and, on the conversation screen, who with.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    current_view: View,
    selected_contact: Option<Contact>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to the conversation screen for `contact`.
    ///
    /// Always counts as a contact change, even when the same contact is
    /// opened again, so callers reseed the conversation every time.
    pub fn open_chat(&mut self, contact: Contact) {
        debug!("Opening chat with {} ({})", contact.name, contact.id);
        self.current_view = View::Conversation;
        self.selected_contact = Some(contact);
    }

    pub fn back_to_chats(&mut self) {
        debug!("Returning to chat list");
        self.current_view = View::Chats;
        self.selected_contact = None;
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.selected_contact.as_ref()
    }
}
