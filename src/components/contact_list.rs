//! Clickable contact list.

use leptos::prelude::*;

use crate::app::ControllerHandle;
use crate::state::chat::ChatState;

/// Contact list, fully re-rendered whenever the contacts or selection change.
#[component]
pub fn ContactList() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let controller = expect_context::<ControllerHandle>();

    view! {
        <aside class="contact-panel">
            <h2 class="contact-panel__title">"Contacts"</h2>
            <ul id="contact-list" class="contact-panel__list">
                {move || {
                    let state = chat.get();
                    if state.contacts.is_empty() {
                        let note = if state.loading_contacts {
                            "Loading contacts..."
                        } else {
                            "No contacts yet"
                        };
                        return view! { <li class="contact-panel__empty">{note}</li> }.into_any();
                    }

                    state
                        .contacts
                        .iter()
                        .map(|contact| {
                            let class = if state.is_selected(&contact.id) {
                                "contact-panel__item contact-panel__item--active"
                            } else {
                                "contact-panel__item"
                            };
                            let user_id = contact.id.to_string();
                            let name = contact.username.clone();
                            let contact = contact.clone();
                            let on_click = move |_| {
                                controller.get_value().select_contact(contact.clone());
                            };
                            view! {
                                <li class=class data-user-id=user_id on:click=on_click>
                                    {name}
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </ul>
        </aside>
    }
}
