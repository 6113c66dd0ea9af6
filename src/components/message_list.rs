//! Conversation pane: "chat with" label and the message history.

use leptos::prelude::*;

use crate::state::chat::ChatState;

/// Message history for the selected contact. Scrolls to the newest message
/// every time the list is replaced.
#[component]
pub fn MessageList() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();
    let revision = Memo::new(move |_| chat.with(|c| c.message_revision));

    Effect::new(move || {
        let _ = revision.get();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <section class="conversation">
            <h2 id="chat-with" class="conversation__title">
                {move || chat.with(ChatState::chat_with_label)}
            </h2>
            <div id="messages" class="conversation__messages" node_ref=messages_ref>
                {move || {
                    let (selected, rows) = chat
                        .with(|c| (c.selected.is_some(), c.message_rows()));
                    if selected && rows.is_empty() {
                        return view! {
                            <div class="conversation__empty">"No messages yet"</div>
                        }
                        .into_any();
                    }

                    rows.into_iter()
                        .map(|row| {
                            view! {
                                <div class=row.direction.css_class()>
                                    <div class="message-content">{row.content}</div>
                                    <div class="message-timestamp">{row.time_label}</div>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </section>
    }
}
