// Common test utilities for integration tests
// This module contains shared code for all integration tests

#![allow(dead_code)]

use std::sync::Once;

use chrono::Local;
use log::LevelFilter;

use neonchat::{mock, Contact, ConversationStore, ViewController};

// Initialize logging once
static INIT_LOGGER: Once = Once::new();

/// Set up the logger for the tests
pub fn setup_logging() {
    INIT_LOGGER.call_once(|| {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

/// View controller and conversation store wired together the way the UI does it
pub struct TestSession {
    pub view: ViewController,
    pub store: ConversationStore,
    pub contacts: Vec<Contact>,
}

impl TestSession {
    pub fn new() -> Self {
        setup_logging();
        TestSession {
            view: ViewController::new(),
            store: ConversationStore::new(),
            contacts: mock::contacts(),
        }
    }

    /// Opens the chat with the contact at `index` and reseeds the store.
    pub fn open(&mut self, index: usize) {
        let contact = self.contacts[index].clone();
        self.view.open_chat(contact);
        self.store.reset(Local::now());
    }

    pub fn texts(&self) -> Vec<String> {
        self.store.messages().iter().map(|m| m.text.clone()).collect()
    }
}

pub fn seed_texts() -> Vec<String> {
    mock::seed_messages(Local::now())
        .into_iter()
        .map(|m| m.text)
        .collect()
}
