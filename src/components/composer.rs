//! Message input and send button.

use leptos::prelude::*;

use crate::app::ControllerHandle;
use crate::state::chat::ChatState;

/// Composer. Disabled until a contact is selected; Enter sends.
#[component]
pub fn Composer() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let controller = expect_context::<ControllerHandle>();

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            controller.get_value().request_send();
        }
    };

    let on_click = move |_| controller.get_value().request_send();

    let input_disabled = move || !chat.with(ChatState::input_enabled);
    let can_send = move || chat.with(ChatState::can_send);

    view! {
        <div class="composer">
            <input
                id="message-input"
                class="composer__input"
                type="text"
                placeholder="Type a message..."
                prop:value=move || chat.with(|c| c.draft.clone())
                disabled=input_disabled
                on:input=move |ev| controller.get_value().set_draft(event_target_value(&ev))
                on:keydown=on_keydown
            />
            <button
                id="send-button"
                class="btn btn--primary composer__send"
                on:click=on_click
                disabled=move || !can_send()
            >
                "Send"
            </button>
        </div>
    }
}
