#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::{Contact, ContactId, Message};

/// View-model for the chat page.
///
/// The controller owns the authoritative copy and publishes a clone after
/// every change; components only read it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatState {
    /// Resolved session username, if known.
    pub username: Option<String>,
    pub contacts: Vec<Contact>,
    pub loading_contacts: bool,
    pub selected: Option<Contact>,
    /// Full history with `selected`, oldest first.
    pub messages: Vec<Message>,
    /// Bumped every time `messages` is replaced.
    pub message_revision: u64,
    /// Composer text as typed.
    pub draft: String,
    pub sending: bool,
    /// Last user-visible failure.
    pub error: Option<ErrorNotice>,
    /// Set once the session ended, by logout or a `401`. Nothing new is
    /// selected or sent afterwards.
    pub session_expired: bool,
}

/// Backend call behind an error banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    LoadContacts,
    LoadMessages,
    SendMessage,
    Logout,
}

impl Operation {
    pub fn failure_label(self) -> &'static str {
        match self {
            Self::LoadContacts => "loading contacts failed",
            Self::LoadMessages => "loading messages failed",
            Self::SendMessage => "sending message failed",
            Self::Logout => "logging out failed",
        }
    }
}

/// A failed call as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorNotice {
    pub operation: Operation,
    pub message: String,
}

impl ErrorNotice {
    pub fn new(operation: Operation, detail: impl std::fmt::Display) -> Self {
        Self {
            operation,
            message: format!("{}: {detail}", operation.failure_label()),
        }
    }
}

/// Whether a message was authored by the session user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    /// CSS classes for the message row.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Sent => "message sent",
            Self::Received => "message received",
        }
    }
}

/// One rendered message row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRow {
    pub direction: Direction,
    pub content: String,
    pub time_label: String,
}

/// Classify by exact string equality with the session username.
pub fn classify(sender: &str, username: Option<&str>) -> Direction {
    if username == Some(sender) {
        Direction::Sent
    } else {
        Direction::Received
    }
}

impl ChatState {
    /// Header label for the conversation pane.
    pub fn chat_with_label(&self) -> String {
        match &self.selected {
            Some(contact) => format!("Chat with {}", contact.username),
            None => "Select a contact to start chatting".to_owned(),
        }
    }

    /// The composer is enabled once a contact is selected.
    pub fn input_enabled(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_id(&self) -> Option<&ContactId> {
        self.selected.as_ref().map(|c| &c.id)
    }

    pub fn is_selected(&self, id: &ContactId) -> bool {
        self.selected_id() == Some(id)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// Drop the current error if `operation` produced it.
    pub fn clear_error_from(&mut self, operation: Operation) {
        if matches!(&self.error, Some(e) if e.operation == operation) {
            self.error = None;
        }
    }

    /// Recipient and trimmed body for a send, or `None` if sending is not allowed.
    pub fn outgoing(&self) -> Option<(ContactId, String)> {
        if self.sending || self.session_expired {
            return None;
        }
        let id = self.selected_id()?;
        let content = self.draft.trim();
        if content.is_empty() {
            return None;
        }
        Some((id.clone(), content.to_owned()))
    }

    pub fn can_send(&self) -> bool {
        self.outgoing().is_some()
    }

    pub fn message_rows(&self) -> Vec<MessageRow> {
        let username = self.username.as_deref();
        self.messages
            .iter()
            .map(|msg| MessageRow {
                direction: classify(&msg.sender, username),
                content: msg.content.clone(),
                time_label: msg.timestamp.time_label(),
            })
            .collect()
    }
}
