//! Group chat creation page.

#[cfg(test)]
#[path = "create_chat_test.rs"]
mod create_chat_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::interest_picker::InterestPicker;
use crate::net::types::{CreateGroupChat, Interest};
use crate::state::auth::AuthState;
use crate::util::auth::{install_unauth_redirect, when_signed_in};

pub(crate) const NAME_REQUIRED: &str = "Please enter a chat name";
pub(crate) const INTERESTS_REQUIRED: &str = "Please select at least one interest";
pub(crate) const CREATE_FAILED: &str = "Failed to create chat";
pub(crate) const INTERESTS_FAILED: &str = "Failed to load interests";

/// A chat needs a non-blank name and at least one interest.
pub fn validate_create_chat(name: &str, interests: &[String]) -> Result<CreateGroupChat, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NAME_REQUIRED);
    }
    if interests.is_empty() {
        return Err(INTERESTS_REQUIRED);
    }
    Ok(CreateGroupChat { name: name.to_owned(), interest_names: interests.to_vec() })
}

#[component]
pub fn CreateChatPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate.clone());

    let name = RwSignal::new(String::new());
    let options = RwSignal::new(Vec::<Interest>::new());
    let selected = RwSignal::new(Vec::<String>::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    when_signed_in(auth, move || {
        leptos::task::spawn_local(async move {
            match crate::net::api::interests().await {
                Ok(list) => options.set(list),
                Err(e) => {
                    leptos::logging::warn!("interest list unavailable: {e}");
                    error.set(Some(INTERESTS_FAILED.to_owned()));
                }
            }
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let data = match validate_create_chat(&name.get(), &selected.get()) {
            Ok(data) => data,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::create_group_chat(&data).await {
                    Ok(chat) => navigate(&format!("/chat/{}", chat.id), leptos_router::NavigateOptions::default()),
                    Err(e) => {
                        leptos::logging::warn!("chat creation failed: {e}");
                        if e.is_unauthorized() {
                            navigate("/login", leptos_router::NavigateOptions::default());
                        } else {
                            error.set(Some(e.server_message().unwrap_or(CREATE_FAILED).to_owned()));
                        }
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (data, &navigate);
            busy.set(false);
        }
    };

    view! {
        <div class="create-chat-page">
            <h1>"Create group chat"</h1>
            <form class="panel" on:submit=on_submit>
                <input
                    class="auth-input"
                    type="text"
                    placeholder="Chat name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <label class="form-label">"Interests"</label>
                <InterestPicker options=options selected=selected />
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Create"
                </button>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </form>
        </div>
    }
}
