//! Header showing the session username and the logout button.

use leptos::prelude::*;

use crate::app::ControllerHandle;
use crate::state::chat::ChatState;

#[component]
pub fn SessionHeader() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let controller = expect_context::<ControllerHandle>();

    let username = move || chat.with(|c| c.username.clone().unwrap_or_default());
    let on_logout = move |_| controller.get_value().request_logout();

    view! {
        <header class="session-header">
            <span id="username" class="session-header__username">{username}</span>
            <button id="logout" class="btn session-header__logout" on:click=on_logout>
                "Logout"
            </button>
        </header>
    }
}
