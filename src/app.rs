//! Root application component and shared context.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos_meta::{Title, provide_meta_context};

use crate::config::ClientConfig;
use crate::controller::{ChatController, ChatEnv};
use crate::pages::chat::ChatPage;
use crate::state::chat::ChatState;

/// Controller shared through context. The controller is `!Send`, so it lives
/// in local arena storage.
pub type ControllerHandle = StoredValue<ChatController, LocalStorage>;

/// Root application component.
///
/// Builds the controller against the browser and provides it, together with
/// the reactive `ChatState` it publishes into, to every child component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let chat = RwSignal::new(ChatState::default());
    let env = ChatEnv::browser(ClientConfig::from_document());
    let controller = ChatController::new(env, move |state: &ChatState| chat.set(state.clone()));
    let controller: ControllerHandle = StoredValue::new_local(controller);

    provide_context(chat);
    provide_context(controller);

    view! {
        <Title text="Messenger"/>
        <ChatPage/>
    }
}
