//! Chat room page: message history, send form, join and leave actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route keyed by `/chat/:id`. The message list is refreshed by a
//! 5s poll and by live-feed events; both re-read the list over REST. Poll and
//! socket loops stop when the page unmounts.
//!
//! ERROR HANDLING
//! ==============
//! Failure handling is decided by the pure `load_chat_failure`,
//! `join_failure` and `leave_action` functions so every branch is unit
//! tested; the component only applies the decision.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::message_list::MessageList;
use crate::net::error::ApiError;
use crate::net::types::{Chat, LeaveOutcome};
use crate::state::auth::AuthState;
use crate::state::chat::ChatRoomState;
use crate::util::auth::{AuthGate, auth_gate};

pub(crate) const CHAT_NOT_FOUND: &str = "Chat not found";
pub(crate) const CHAT_LOAD_FAILED: &str = "Failed to load chat";
pub(crate) const ALREADY_JOINED: &str = "Already joined this chat";
pub(crate) const JOIN_FAILED: &str = "Failed to join chat";
pub(crate) const NOT_A_MEMBER: &str = "You are not a member of this chat";
pub(crate) const LEAVE_FAILED: &str = "Failed to leave chat";
pub(crate) const SEND_FAILED: &str = "Failed to send message";
pub(crate) const WAITING_FOR_PARTNER: &str = "Looking for a partner...";
pub(crate) const PARTNER_FOUND: &str = "Partner found!";

/// Route the chat room falls back to after load and join failures.
pub const CHAT_LIST_ROUTE: &str = "/group-chats";
/// Where users land after their anonymous account is gone.
pub const ANONYMOUS_REGISTER_ROUTE: &str = "/anonymous-chat?register=1";

#[cfg(feature = "hydrate")]
const POLL_INTERVAL_SECS: u64 = 5;

// =============================================================================
// DECISIONS
// =============================================================================

/// What to do when the chat cannot be loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadFailure {
    RedirectLogin,
    /// Show `message`, then go back to the chat list.
    BackToList { message: &'static str },
}

pub fn load_chat_failure(err: &ApiError) -> LoadFailure {
    match err.status() {
        Some(401) => LoadFailure::RedirectLogin,
        Some(404) => LoadFailure::BackToList { message: CHAT_NOT_FOUND },
        _ => LoadFailure::BackToList { message: CHAT_LOAD_FAILED },
    }
}

/// What to do when joining fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinFailure {
    /// The user is already a member: treat as participant and reload.
    AlreadyJoined,
    Message(String),
    /// The chat is gone: show "Chat not found" and go back to the list.
    BackToList,
}

pub fn join_failure(err: &ApiError) -> JoinFailure {
    match err.status() {
        Some(400) => match err.server_message() {
            Some(ALREADY_JOINED) => JoinFailure::AlreadyJoined,
            Some(message) => JoinFailure::Message(message.to_owned()),
            None => JoinFailure::Message(JOIN_FAILED.to_owned()),
        },
        Some(404) => JoinFailure::BackToList,
        _ => JoinFailure::Message(JOIN_FAILED.to_owned()),
    }
}

/// What to do after a leave request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeaveAction {
    /// Forget the session and show the anonymous registration form.
    ClearSessionAndRegister,
    GoToProfile,
    Show(&'static str),
}

pub fn leave_action(result: &Result<LeaveOutcome, ApiError>) -> LeaveAction {
    match result {
        Ok(outcome) if outcome.user_deleted => LeaveAction::ClearSessionAndRegister,
        Ok(_) => LeaveAction::GoToProfile,
        Err(err) => match err.status() {
            Some(401) => LeaveAction::ClearSessionAndRegister,
            Some(404) => LeaveAction::Show(CHAT_NOT_FOUND),
            Some(400) => LeaveAction::Show(NOT_A_MEMBER),
            _ => LeaveAction::Show(LEAVE_FAILED),
        },
    }
}

/// What the initial-load effect does for the current auth snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryStep {
    Wait,
    RedirectLogin,
    Load { user_id: i64 },
}

/// Decide the initial-load step. Once the room has `settled` on a signed-in
/// user, later sign-outs are left to the leave and logout flows.
pub fn entry_step(state: &AuthState, settled: bool) -> EntryStep {
    match auth_gate(state) {
        AuthGate::Pending => EntryStep::Wait,
        AuthGate::SignedIn(user_id) => EntryStep::Load { user_id },
        AuthGate::SignedOut if settled => EntryStep::Wait,
        AuthGate::SignedOut => EntryStep::RedirectLogin,
    }
}

/// Trimmed message text, or `None` when it must not be sent.
pub fn outgoing_message(text: &str, is_participant: bool) -> Option<String> {
    let text = text.trim();
    (is_participant && !text.is_empty()).then(|| text.to_owned())
}

/// Banner for anonymous chats; group chats have none.
pub fn partner_banner(state: &ChatRoomState) -> Option<&'static str> {
    if !state.is_anonymous() {
        return None;
    }
    Some(if state.waiting_for_partner() { WAITING_FOR_PARTNER } else { PARTNER_FOUND })
}

/// Document title for the room; the app name alone until the chat loads.
pub fn page_title(chat: Option<&Chat>) -> String {
    chat.map_or_else(|| "Chatroom".to_owned(), |c| format!("{} | Chatroom", c.display_name()))
}

pub fn parse_chat_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok().filter(|id| *id > 0)
}

// =============================================================================
// DATA LOADING
// =============================================================================

/// Re-read chat and messages; participation is recomputed from `user_id`.
async fn reload_room(
    chat_id: i64,
    user_id: Option<i64>,
    room: RwSignal<ChatRoomState>,
) -> Result<(), ApiError> {
    let chat = crate::net::api::get_chat(chat_id).await?;
    let messages = crate::net::api::chat_messages(chat_id).await?;
    room.update(|r| {
        r.set_chat(chat, user_id);
        r.replace_messages(messages);
    });
    Ok(())
}

/// Background refresh used by the poll and the live feed. Errors are logged.
#[cfg(feature = "hydrate")]
async fn refresh_quietly(chat_id: i64, user_id: Option<i64>, room: RwSignal<ChatRoomState>) {
    if let Err(e) = reload_room(chat_id, user_id, room).await {
        leptos::logging::warn!("chat {chat_id} refresh failed: {e}");
    }
}

// =============================================================================
// PAGE
// =============================================================================

#[component]
pub fn ChatPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let params = use_params_map();

    let room = RwSignal::new(ChatRoomState { loading: true, ..ChatRoomState::default() });
    let input = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let loaded_for = RwSignal::new(None::<i64>);

    let chat_id = Memo::new(move |_| parse_chat_id(params.with(|p| p.get("id")).as_deref()));
    let viewer_id = Signal::derive(move || auth.with(AuthState::user_id));

    let show_error = move |message: &str| room.update(|r| r.error = Some(message.to_owned()));

    // Initial load once auth is settled. Without a known user the page goes to /login.
    // After the first signed-in load auth is read untracked.
    let settled = RwSignal::new(false);
    {
        let navigate = navigate.clone();
        Effect::new(move || {
            let is_settled = settled.get_untracked();
            let state = if is_settled { auth.get_untracked() } else { auth.get() };
            let user_id = match entry_step(&state, is_settled) {
                EntryStep::Wait => return,
                EntryStep::RedirectLogin => {
                    navigate("/login", NavigateOptions::default());
                    return;
                }
                EntryStep::Load { user_id } => user_id,
            };
            settled.set(true);
            let Some(id) = chat_id.get() else {
                show_error(CHAT_NOT_FOUND);
                navigate(CHAT_LIST_ROUTE, NavigateOptions::default());
                return;
            };
            if loaded_for.get_untracked() == Some(id) {
                return;
            }
            loaded_for.set(Some(id));

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                room.update(|r| r.loading = true);
                let result = reload_room(id, Some(user_id), room).await;
                room.update(|r| r.loading = false);
                if let Err(e) = result {
                    leptos::logging::warn!("chat {id} load failed: {e}");
                    match load_chat_failure(&e) {
                        LoadFailure::RedirectLogin => navigate("/login", NavigateOptions::default()),
                        LoadFailure::BackToList { message } => {
                            show_error(message);
                            navigate(CHAT_LIST_ROUTE, NavigateOptions::default());
                        }
                    }
                }
            });
        });
    }

    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let alive = Arc::new(AtomicBool::new(true));

        let poll_alive = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(POLL_INTERVAL_SECS)).await;
                if !poll_alive.load(Ordering::Relaxed) {
                    break;
                }
                let Some(id) = loaded_for.get_untracked() else {
                    continue;
                };
                refresh_quietly(id, viewer_id.get_untracked(), room).await;
            }
        });

        let live_started = RwSignal::new(None::<i64>);
        let live_alive = alive.clone();
        Effect::new(move || {
            let Some(id) = loaded_for.get() else {
                return;
            };
            if live_started.get_untracked() == Some(id) {
                return;
            }
            live_started.set(Some(id));
            crate::net::live::spawn_live_feed(id, live_alive.clone(), move || {
                leptos::task::spawn_local(refresh_quietly(id, viewer_id.get_untracked(), room));
            });
        });

        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(id) = loaded_for.get_untracked() else {
            return;
        };
        let Some(content) = outgoing_message(&input.get(), room.with(|r| r.is_participant)) else {
            return;
        };
        busy.set(true);
        leptos::task::spawn_local(async move {
            match crate::net::api::send_message(id, &content).await {
                Ok(message) => {
                    room.update(|r| {
                        r.push_message(message);
                        r.error = None;
                    });
                    input.set(String::new());
                }
                Err(e) => {
                    leptos::logging::warn!("send failed: {e}");
                    show_error(SEND_FAILED);
                }
            }
            busy.set(false);
        });
    };

    let on_join = {
        let navigate = navigate.clone();
        move |_| {
            let Some(id) = loaded_for.get_untracked() else {
                return;
            };
            let user_id = viewer_id.get_untracked();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let joined = crate::net::api::join_chat(id).await;
                if let Err(e) = &joined {
                    leptos::logging::warn!("join failed: {e}");
                    match join_failure(e) {
                        JoinFailure::AlreadyJoined => {
                            show_error(ALREADY_JOINED);
                            room.update(|r| r.is_participant = true);
                        }
                        JoinFailure::Message(message) => {
                            show_error(&message);
                            return;
                        }
                        JoinFailure::BackToList => {
                            show_error(CHAT_NOT_FOUND);
                            navigate(CHAT_LIST_ROUTE, NavigateOptions::default());
                            return;
                        }
                    }
                } else {
                    room.update(|r| r.error = None);
                }
                if let Err(e) = reload_room(id, user_id, room).await {
                    leptos::logging::warn!("reload after join failed: {e}");
                }
            });
        }
    };

    let on_leave = {
        let navigate = navigate.clone();
        move |_| {
            let Some(id) = loaded_for.get_untracked() else {
                return;
            };
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::leave_chat(id).await;
                if let Err(e) = &result {
                    leptos::logging::warn!("leave failed: {e}");
                }
                match leave_action(&result) {
                    LeaveAction::ClearSessionAndRegister => {
                        navigate(ANONYMOUS_REGISTER_ROUTE, NavigateOptions::default());
                        crate::util::auth::logout(auth);
                    }
                    LeaveAction::GoToProfile => navigate("/profile", NavigateOptions::default()),
                    LeaveAction::Show(message) => show_error(message),
                }
            });
        }
    };

    let title = move || room.with(|r| r.chat.as_ref().map(|c| c.display_name()).unwrap_or_default());
    let is_participant = move || room.with(|r| r.is_participant);

    view! {
        <Title text=move || room.with(|r| page_title(r.chat.as_ref()))/>
        <div class="chat-page">
            <header class="chat-page__header">
                <h1>{title}</h1>
                <Show when=is_participant>
                    <button class="btn chat-page__leave" on:click=on_leave.clone()>"Leave chat"</button>
                </Show>
            </header>
            {move || {
                room.with(partner_banner)
                    .map(|banner| view! { <div class="chat-page__banner">{banner}</div> })
            }}
            <Show when=move || room.with(|r| r.error.is_some())>
                <p class="form-error">{move || room.with(|r| r.error.clone().unwrap_or_default())}</p>
            </Show>
            <Show
                when=move || !room.with(|r| r.loading)
                fallback=move || view! { <p>"Loading chat..."</p> }
            >
                <MessageList room=room viewer_id=viewer_id />
            </Show>
            <Show
                when=is_participant
                fallback={
                    let on_join = on_join.clone();
                    move || {
                        let on_join = on_join.clone();
                        view! {
                            <button class="btn btn--primary chat-page__join" on:click=on_join>
                                "Join chat"
                            </button>
                        }
                    }
                }
            >
                <form class="chat-page__composer" on:submit=on_send>
                    <input
                        class="chat-page__input"
                        type="text"
                        placeholder="Type a message..."
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                    />
                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || busy.get() || input.get().trim().is_empty()
                    >
                        "Send"
                    </button>
                </form>
            </Show>
        </div>
    }
}
