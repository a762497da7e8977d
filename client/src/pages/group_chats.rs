//! Group chat search page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route. Loads interests and an unfiltered chat list once a
//! signed-in session is restored; "Search" refetches with the current
//! filters. A 401 from any call sends the user to `/login`.

#[cfg(test)]
#[path = "group_chats_test.rs"]
mod group_chats_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::chat_card::ChatCard;
use crate::components::interest_picker::InterestPicker;
use crate::net::error::ApiError;
use crate::net::types::{Chat, GroupChatFilters, Interest};
use crate::state::auth::AuthState;
use crate::util::auth::{install_unauth_redirect, when_signed_in};

pub(crate) const CHATS_FAILED: &str = "Failed to load chats";
pub(crate) const INTERESTS_FAILED: &str = "Failed to load interests";
pub(crate) const JOIN_FAILED: &str = "Failed to join chat";

/// How the page reacts to a failed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListFailure {
    RedirectLogin,
    Show(&'static str),
}

pub fn list_failure(err: &ApiError, message: &'static str) -> ListFailure {
    if err.is_unauthorized() { ListFailure::RedirectLogin } else { ListFailure::Show(message) }
}

/// Minimum participant filter; blank or invalid input means no minimum.
pub fn parse_min_participants(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

#[component]
pub fn GroupChatsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate.clone());

    let chats = RwSignal::new(Vec::<Chat>::new());
    let options = RwSignal::new(Vec::<Interest>::new());
    let name = RwSignal::new(String::new());
    let min_participants = RwSignal::new(String::new());
    let selected = RwSignal::new(Vec::<String>::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    // Applies a failure decision: redirect or inline message.
    let fail = {
        let navigate = navigate.clone();
        move |err: ApiError, message: &'static str| {
            leptos::logging::warn!("group chats: {err}");
            match list_failure(&err, message) {
                ListFailure::RedirectLogin => navigate("/login", leptos_router::NavigateOptions::default()),
                ListFailure::Show(text) => error.set(Some(text.to_owned())),
            }
        }
    };

    let search = {
        let fail = fail.clone();
        move || {
            let filters = GroupChatFilters {
                name: name.get_untracked(),
                min_participants: parse_min_participants(&min_participants.get_untracked()),
                interests: selected.get_untracked(),
            };
            loading.set(true);
            error.set(None);
            let fail = fail.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::group_chats(&filters).await {
                    Ok(list) => chats.set(list),
                    Err(e) => fail(e, CHATS_FAILED),
                }
                loading.set(false);
            });
        }
    };

    when_signed_in(auth, {
        let fail = fail.clone();
        let search = search.clone();
        move || {
            let fail = fail.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::interests().await {
                    Ok(list) => options.set(list),
                    Err(e) => fail(e, INTERESTS_FAILED),
                }
            });
            search();
        }
    });

    let on_search = {
        let search = search.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            search();
        }
    };

    let on_join = Callback::new({
        let navigate = navigate.clone();
        let fail = fail.clone();
        move |chat_id: i64| {
            let navigate = navigate.clone();
            let fail = fail.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::join_chat(chat_id).await {
                    Ok(()) => navigate(&format!("/chat/{chat_id}"), leptos_router::NavigateOptions::default()),
                    Err(e) => fail(e, JOIN_FAILED),
                }
            });
        }
    });

    let on_create = {
        let navigate = navigate.clone();
        move |_| navigate("/create-chat", leptos_router::NavigateOptions::default())
    };

    view! {
        <div class="group-chats-page">
            <header class="group-chats-page__header">
                <h1>"Group chats"</h1>
                <button class="btn btn--primary" on:click=on_create>"Create new chat"</button>
            </header>
            <form class="panel" on:submit=on_search>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Chat name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="number"
                    min="0"
                    placeholder="Minimum participants"
                    prop:value=move || min_participants.get()
                    on:input=move |ev| min_participants.set(event_target_value(&ev))
                />
                <InterestPicker options=options selected=selected />
                <button class="btn" type="submit" disabled=move || loading.get()>"Search"</button>
            </form>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !loading.get()
                fallback=move || view! { <p>"Loading chats..."</p> }
            >
                <div class="card-grid">
                    {move || {
                        let list = chats.get();
                        if list.is_empty() {
                            return view! { <p class="muted">"No chats found."</p> }.into_any();
                        }
                        list.into_iter()
                            .map(|chat| view! { <ChatCard chat=chat open_label="View" on_join=on_join /> })
                            .collect_view()
                            .into_any()
                    }}
                </div>
            </Show>
        </div>
    }
}
