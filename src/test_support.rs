//! Test doubles for the controller's collaborators.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::net::api::{ApiError, ChatApi};
use crate::net::types::{Contact, ContactId, Message, Timestamp};
use crate::poll::{Scheduler, Subscription, Tick};
use crate::util::navigate::Navigator;
use crate::util::storage::SessionStore;

pub fn contact(id: &str, username: &str) -> Contact {
    Contact {
        id: ContactId::new(id),
        username: username.to_owned(),
    }
}

pub fn message(sender: &str, content: &str) -> Message {
    Message {
        sender: sender.to_owned(),
        content: content.to_owned(),
        timestamp: Timestamp::Text("2024-03-05 14:07:09.000001".to_owned()),
    }
}

// =============================================================================
// FakeApi
// =============================================================================

/// A backend call observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Logout,
    Contacts,
    Messages(String),
    Send { contact: String, content: String },
}

/// Scriptable in-memory backend that records every call.
#[derive(Default)]
pub struct FakeApi {
    calls: RefCell<Vec<Call>>,
    contacts: RefCell<Vec<Contact>>,
    contacts_error: RefCell<Option<ApiError>>,
    conversations: RefCell<HashMap<String, Vec<Message>>>,
    messages_error: RefCell<Option<ApiError>>,
    send_error: RefCell<Option<ApiError>>,
    logout_error: RefCell<Option<ApiError>>,
    gates: RefCell<VecDeque<oneshot::Receiver<Vec<Message>>>>,
}

impl FakeApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set_contacts(&self, contacts: Vec<Contact>) {
        *self.contacts.borrow_mut() = contacts;
    }

    pub fn fail_contacts(&self, err: ApiError) {
        *self.contacts_error.borrow_mut() = Some(err);
    }

    pub fn set_conversation(&self, contact_id: &str, messages: Vec<Message>) {
        self.conversations
            .borrow_mut()
            .insert(contact_id.to_owned(), messages);
    }

    pub fn fail_messages(&self, err: ApiError) {
        *self.messages_error.borrow_mut() = Some(err);
    }

    pub fn clear_messages_failure(&self) {
        self.messages_error.borrow_mut().take();
    }

    pub fn fail_send(&self, err: ApiError) {
        *self.send_error.borrow_mut() = Some(err);
    }

    pub fn fail_logout(&self, err: ApiError) {
        *self.logout_error.borrow_mut() = Some(err);
    }

    /// Hold the next `messages` call until the returned sender fires.
    pub fn gate_next_messages(&self) -> oneshot::Sender<Vec<Message>> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn message_loads(&self, contact_id: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Messages(id) if id == contact_id))
            .count()
    }

    pub fn sends(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Send { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl ChatApi for FakeApi {
    async fn logout(&self) -> Result<(), ApiError> {
        self.record(Call::Logout);
        self.logout_error.borrow().clone().map_or(Ok(()), Err)
    }

    async fn contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.record(Call::Contacts);
        if let Some(err) = self.contacts_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.contacts.borrow().clone())
    }

    async fn messages(&self, contact_id: &ContactId) -> Result<Vec<Message>, ApiError> {
        self.record(Call::Messages(contact_id.to_string()));
        let gate = self.gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            return match gate.await {
                Ok(messages) => Ok(messages),
                Err(_) => Err(ApiError::Network("gate dropped".to_owned())),
            };
        }
        if let Some(err) = self.messages_error.borrow().clone() {
            return Err(err);
        }
        let conversations = self.conversations.borrow();
        let messages = conversations.get(contact_id.as_str()).cloned();
        Ok(messages.unwrap_or_default())
    }

    async fn send_message(&self, contact_id: &ContactId, content: &str) -> Result<(), ApiError> {
        self.record(Call::Send {
            contact: contact_id.to_string(),
            content: content.to_owned(),
        });
        if let Some(err) = self.send_error.borrow().clone() {
            return Err(err);
        }
        Ok(())
    }
}

// =============================================================================
// ManualScheduler
// =============================================================================

struct Timer {
    period: Duration,
    tick: Tick,
    cancelled: Rc<Cell<bool>>,
}

/// Scheduler whose timers only tick when the test calls [`ManualScheduler::fire`].
#[derive(Default)]
pub struct ManualScheduler {
    timers: RefCell<Vec<Timer>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Tick every live timer once. Returns how many ticked.
    pub fn fire(&self) -> usize {
        let mut timers = self.timers.borrow_mut();
        let mut fired = 0;
        for timer in timers.iter_mut().filter(|t| !t.cancelled.get()) {
            (timer.tick)();
            fired += 1;
        }
        fired
    }

    /// Timers ever armed.
    pub fn armed(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn active(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|t| !t.cancelled.get())
            .count()
    }

    pub fn cancelled(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|t| t.cancelled.get())
            .count()
    }

    pub fn last_period(&self) -> Option<Duration> {
        self.timers.borrow().last().map(|t| t.period)
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, period: Duration, tick: Tick) -> Subscription {
        let cancelled = Rc::new(Cell::new(false));
        self.timers.borrow_mut().push(Timer {
            period,
            tick,
            cancelled: Rc::clone(&cancelled),
        });
        Subscription::new(move || cancelled.set(true))
    }
}

// =============================================================================
// RecordingNavigator
// =============================================================================

#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_owned());
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.set(key, value);
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
