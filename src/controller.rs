//! Chat controller: the single owner of session, selection and polling state.
//!
//! ARCHITECTURE
//! ============
//! Components never call the backend directly. Every DOM event lands on a
//! [`ChatController`] method, which updates its [`ChatState`], talks to the
//! injected [`ChatApi`], and publishes a fresh snapshot to the observer (in
//! the app, a Leptos signal). All collaborators arrive through [`ChatEnv`], so
//! tests swap in fakes for the backend, storage, timer, executor and
//! navigation.
//!
//! CONCURRENCY
//! ===========
//! Single-threaded. State sits in `RefCell`s and no borrow is held across an
//! `.await`. The polling tick holds a `Weak` back-reference, so dropping the
//! last controller handle also cancels its timer. Message loads go through
//! [`InFlight`]: selecting a contact aborts loads for the previous one, and a
//! response that arrives after a newer one was applied is dropped.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::future::Abortable;
use futures::task::{LocalSpawn, LocalSpawnExt};

use crate::config::ClientConfig;
use crate::net::api::{ApiError, ChatApi};
use crate::net::http::HttpChatApi;
use crate::net::inflight::InFlight;
use crate::net::types::Contact;
use crate::poll::{IntervalScheduler, Poller, Scheduler, Tick};
use crate::state::chat::{ChatState, ErrorNotice, Operation};
use crate::state::session::{SessionError, resolve_session_identity};
use crate::util::navigate::{BrowserNavigator, Navigator};
use crate::util::spawn::BrowserSpawner;
use crate::util::storage::{BrowserSessionStorage, SessionStore};

/// Everything the controller needs from the outside world.
pub struct ChatEnv {
    pub api: Rc<dyn ChatApi>,
    pub store: Rc<dyn SessionStore>,
    pub scheduler: Rc<dyn Scheduler>,
    pub spawner: Rc<dyn LocalSpawn>,
    pub navigator: Rc<dyn Navigator>,
    pub config: ClientConfig,
}

impl ChatEnv {
    /// Collaborators backed by the page: `fetch`, `sessionStorage`,
    /// `setInterval`, the microtask queue and `window.location`.
    pub fn browser(config: ClientConfig) -> Self {
        Self {
            api: Rc::new(HttpChatApi::new(&config)),
            store: Rc::new(BrowserSessionStorage),
            scheduler: Rc::new(IntervalScheduler),
            spawner: Rc::new(BrowserSpawner),
            navigator: Rc::new(BrowserNavigator),
            config,
        }
    }
}

type Observer = Box<dyn Fn(&ChatState)>;

/// Cheap-to-clone handle to the chat page's controller.
#[derive(Clone)]
pub struct ChatController {
    inner: Rc<Inner>,
}

struct Inner {
    env: ChatEnv,
    state: RefCell<ChatState>,
    observer: Observer,
    poller: RefCell<Poller>,
    loads: RefCell<InFlight>,
}

impl ChatController {
    /// Create a controller. `observer` receives a snapshot after every change.
    pub fn new(env: ChatEnv, observer: impl Fn(&ChatState) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                env,
                state: RefCell::new(ChatState::default()),
                observer: Box::new(observer),
                poller: RefCell::new(Poller::default()),
                loads: RefCell::new(InFlight::default()),
            }),
        }
    }

    pub fn snapshot(&self) -> ChatState {
        self.inner.state.borrow().clone()
    }

    pub fn is_polling(&self) -> bool {
        self.inner.poller.borrow().is_active()
    }

    // =========================================================================
    // EVENT ENTRY POINTS
    // =========================================================================

    /// Page load: spawn [`Self::initialize`] with the page's username hint.
    pub fn start(&self, hint: Option<String>) {
        let this = self.clone();
        self.spawn(async move { this.initialize(hint).await });
    }

    /// Send button / Enter key: spawn [`Self::send_message`].
    pub fn request_send(&self) {
        let this = self.clone();
        self.spawn(async move { this.send_message().await });
    }

    /// Logout button: spawn [`Self::logout`].
    pub fn request_logout(&self) {
        let this = self.clone();
        self.spawn(async move { this.logout().await });
    }

    pub fn set_draft(&self, draft: String) {
        self.update(|s| s.draft = draft);
    }

    /// Switch the conversation to `contact` and restart polling.
    ///
    /// The previous timer is cancelled and its pending loads aborted before
    /// anything for the new contact is issued.
    pub fn select_contact(&self, contact: Contact) {
        if self.inner.state.borrow().session_expired {
            return;
        }
        log::debug!("selecting contact {} ({})", contact.username, contact.id);

        self.inner.poller.borrow_mut().stop();
        let aborted = self.inner.loads.borrow_mut().reset();
        if aborted > 0 {
            log::debug!("aborted {aborted} message loads for previous contact");
        }

        self.update(|s| {
            s.selected = Some(contact);
            s.messages.clear();
            s.message_revision += 1;
            s.error = None;
        });

        self.spawn_load();

        let weak = Rc::downgrade(&self.inner);
        let tick: Tick = Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                ChatController { inner }.spawn_load();
            }
        });
        let env = &self.inner.env;
        self.inner
            .poller
            .borrow_mut()
            .start(&*env.scheduler, env.config.poll_interval, tick);
    }

    /// Stop polling and abort pending loads. Returns `true` if a timer was active.
    pub fn shutdown(&self) -> bool {
        let stopped = self.inner.poller.borrow_mut().stop();
        self.inner.loads.borrow_mut().reset();
        stopped
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Resolve the session username and load contacts, concurrently.
    pub async fn initialize(&self, page_username: Option<String>) {
        futures::future::join(
            self.resolve_identity(page_username.as_deref()),
            self.load_contacts(),
        )
        .await;
    }

    /// Replace the contact list with the backend's.
    pub async fn load_contacts(&self) {
        self.update(|s| s.loading_contacts = true);
        let result = self.inner.env.api.contacts().await;
        self.update(|s| s.loading_contacts = false);

        match result {
            Ok(contacts) => {
                log::debug!("loaded {} contacts", contacts.len());
                self.update(|s| s.contacts = contacts);
            }
            Err(e) => self.report(Operation::LoadContacts, &e),
        }
    }

    /// Replace the message list with the selected contact's full history.
    /// No-op without a selection. A successful load clears an error left by
    /// an earlier failed load.
    pub async fn load_messages(&self) {
        let selected = self.inner.state.borrow().selected_id().cloned();
        let Some(contact_id) = selected else {
            return;
        };

        let (ticket, registration) = self.inner.loads.borrow_mut().begin();
        let api = Rc::clone(&self.inner.env.api);
        let load = Abortable::new(api.messages(&contact_id), registration);
        let Ok(result) = load.await else {
            log::debug!("message load for {contact_id} aborted");
            return;
        };

        if !self.inner.loads.borrow_mut().settle(ticket) {
            log::debug!("dropping stale message list for {contact_id}");
            return;
        }

        match result {
            Ok(messages) => self.update(|s| {
                s.messages = messages;
                s.message_revision += 1;
                s.clear_error_from(Operation::LoadMessages);
            }),
            Err(e) => self.report(Operation::LoadMessages, &e),
        }
    }

    /// Post the trimmed draft to the selected contact, then reload.
    /// No-op for a blank draft, no selection, a send already in flight or an
    /// ended session.
    pub async fn send_message(&self) {
        let Some((contact_id, content)) = self.inner.state.borrow().outgoing() else {
            return;
        };

        self.update(|s| s.sending = true);
        let result = self.inner.env.api.send_message(&contact_id, &content).await;
        self.update(|s| s.sending = false);

        match result {
            Ok(()) => {
                self.update(|s| {
                    s.draft.clear();
                    s.error = None;
                });
                self.load_messages().await;
            }
            Err(e) => self.report(Operation::SendMessage, &e),
        }
    }

    /// End the session, clear cached state and leave for the login page.
    pub async fn logout(&self) {
        match self.inner.env.api.logout().await {
            Ok(()) => {
                log::debug!("logged out");
                self.shutdown();
                self.update(|s| s.session_expired = true);
                let env = &self.inner.env;
                env.store.clear();
                env.navigator.redirect(&env.config.login_path);
            }
            Err(e) => self.report(Operation::Logout, &e),
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    async fn resolve_identity(&self, page_username: Option<&str>) {
        let env = &self.inner.env;
        let key = &env.config.username_key;
        let resolve = resolve_session_identity(&*env.store, &*env.api, key, page_username);
        match resolve.await {
            Ok(identity) => self.update(|s| s.username = Some(identity.into_username())),
            Err(SessionError::NotAuthenticated) => self.expire_session(),
            Err(e) => log::warn!("{e}"),
        }
    }

    /// Log a failed call and surface it, or expire the session on `401`.
    fn report(&self, operation: Operation, err: &ApiError) {
        if *err == ApiError::Unauthorized {
            self.expire_session();
            return;
        }
        let notice = ErrorNotice::new(operation, err);
        log::warn!("{}", notice.message);
        self.update(|s| s.error = Some(notice));
    }

    fn expire_session(&self) {
        if self.inner.state.borrow().session_expired {
            return;
        }
        let login_path = &self.inner.env.config.login_path;
        log::warn!("session expired; redirecting to {login_path}");
        self.shutdown();
        self.update(|s| s.session_expired = true);
        self.inner.env.store.clear();
        self.inner.env.navigator.redirect(login_path);
    }

    fn spawn_load(&self) {
        let this = self.clone();
        self.spawn(async move { this.load_messages().await });
    }

    fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        if let Err(e) = self.inner.env.spawner.spawn_local(task) {
            log::warn!("failed to spawn chat task: {e}");
        }
    }

    fn update(&self, f: impl FnOnce(&mut ChatState)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        (self.inner.observer)(&snapshot);
    }
}
