//! Reusable card component for chat list items.
//!
//! DESIGN
//! ======
//! Keeps chat presentation consistent between the profile page and the
//! group chat search while centralizing navigation affordances.

use leptos::prelude::*;

use crate::net::types::Chat;

/// A card representing a chat, with an optional join action.
#[component]
pub fn ChatCard(
    chat: Chat,
    /// Label of the navigation link.
    #[prop(default = "Open chat")]
    open_label: &'static str,
    #[prop(optional)] show_type: bool,
    #[prop(optional)] on_join: Option<Callback<i64>>,
) -> impl IntoView {
    let id = chat.id;
    let href = format!("/chat/{id}");
    let name = chat.display_name();
    let type_label = chat.kind.label();
    let count = chat.participant_count();
    let interests = chat.interest_labels();

    view! {
        <div class="chat-card">
            <div class="chat-card__header">
                <span class="chat-card__name">{name}</span>
                <Show when=move || show_type>
                    <span class="chat-card__type">{type_label}</span>
                </Show>
            </div>
            <span class="chat-card__count">{format!("{count} participants")}</span>
            <div class="chat-card__interests">
                {interests
                    .into_iter()
                    .map(|label| view! { <span class="chip">{label}</span> })
                    .collect_view()}
            </div>
            <div class="chat-card__actions">
                <a class="btn" href=href>{open_label}</a>
                {on_join
                    .map(|on_join| {
                        view! {
                            <button class="btn btn--primary" on:click=move |_| on_join.run(id)>
                                "Join"
                            </button>
                        }
                    })}
            </div>
        </div>
    }
}
