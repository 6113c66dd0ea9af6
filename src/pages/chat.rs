//! Chat page: session header, contact list, conversation and composer.

use leptos::prelude::*;

use crate::app::ControllerHandle;
use crate::components::composer::Composer;
use crate::components::contact_list::ContactList;
use crate::components::message_list::MessageList;
use crate::components::session_header::SessionHeader;
use crate::state::chat::ChatState;
use crate::util::dom::page_username;

/// Chat page. Starts the controller on mount and stops polling on cleanup.
#[component]
pub fn ChatPage() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let controller = expect_context::<ControllerHandle>();

    // Read the server-rendered username before our own header replaces it.
    controller.get_value().start(page_username());

    on_cleanup(move || {
        if let Some(controller) = controller.try_get_value() {
            controller.shutdown();
        }
    });

    let error = move || chat.with(|c| c.error_message().map(str::to_owned));

    view! {
        <div class="chat-page">
            <SessionHeader/>
            <Show when=move || error().is_some()>
                <div class="chat-page__error" role="alert">
                    {move || error().unwrap_or_default()}
                </div>
            </Show>
            <div class="chat-page__body">
                <ContactList/>
                <div class="chat-page__conversation">
                    <MessageList/>
                    <Composer/>
                </div>
            </div>
        </div>
    }
}
