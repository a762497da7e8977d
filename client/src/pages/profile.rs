//! Profile page: account details, inline edit form, and the user's chats.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected route. `me` is re-read once a signed-in session is restored so
//! edits made elsewhere show up; a failure there means the session is
//! unusable and the page goes to `/login`.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::chat_card::ChatCard;
use crate::net::types::{Chat, ProfileUpdate, User};
use crate::pages::register::{GENDER_OPTIONS, parse_age};
use crate::state::auth::AuthState;
use crate::util::auth::{install_unauth_redirect, when_signed_in};

pub(crate) const PROFILE_MISSING_USERNAME: &str = "Username cannot be empty";
pub(crate) const PROFILE_INVALID_AGE: &str = "Age must be a positive number";
pub(crate) const PROFILE_SAVE_FAILED: &str = "Failed to save profile";

/// Validate the edit form. Blank age and gender are left unchanged.
pub fn validate_profile(username: &str, age: &str, gender: &str) -> Result<ProfileUpdate, &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(PROFILE_MISSING_USERNAME);
    }
    let age = if age.trim().is_empty() {
        None
    } else {
        Some(parse_age(age).ok_or(PROFILE_INVALID_AGE)?)
    };
    let gender = Some(gender.trim()).filter(|g| !g.is_empty()).map(str::to_owned);
    Ok(ProfileUpdate { username: username.to_owned(), age, gender })
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, navigate.clone());

    let user = RwSignal::new(None::<User>);
    let chats = RwSignal::new(Vec::<Chat>::new());
    let editing = RwSignal::new(false);
    let username = RwSignal::new(String::new());
    let age = RwSignal::new(String::new());
    let gender = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let fill_form = move |u: &User| {
        username.set(u.username.clone());
        age.set(u.age.map(|a| a.to_string()).unwrap_or_default());
        gender.set(u.gender.clone().unwrap_or_default());
    };

    when_signed_in(auth, {
        let navigate = navigate.clone();
        move || {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::current_user().await {
                    Ok(me) => {
                        fill_form(&me);
                        user.set(Some(me));
                    }
                    Err(e) => {
                        leptos::logging::warn!("profile load failed: {e}");
                        navigate("/login", leptos_router::NavigateOptions::default());
                        return;
                    }
                }
                match crate::net::api::user_chats().await {
                    Ok(list) => chats.set(list),
                    Err(e) => leptos::logging::warn!("user chats load failed: {e}"),
                }
            });
        }
    });

    let on_edit = move |_| {
        if let Some(u) = user.get_untracked() {
            fill_form(&u);
        }
        error.set(None);
        editing.set(true);
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get() {
            return;
        }
        let Some(current) = user.get_untracked() else {
            return;
        };
        let update = match validate_profile(&username.get(), &age.get(), &gender.get()) {
            Ok(update) => update,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        saving.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_profile(current.id, &update).await {
                Ok(updated) => {
                    crate::util::auth::replace_user(auth, updated.clone());
                    user.set(Some(updated));
                    editing.set(false);
                    error.set(None);
                }
                Err(e) => {
                    leptos::logging::warn!("profile save failed: {e}");
                    error.set(Some(e.server_message().unwrap_or(PROFILE_SAVE_FAILED).to_owned()));
                }
            }
            saving.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (current, update);
            saving.set(false);
        }
    };

    view! {
        <div class="profile-page">
            <h1>"Profile"</h1>
            <Show
                when=move || user.get().is_some()
                fallback=move || view! { <p>"Loading..."</p> }
            >
                <section class="panel">
                    <Show
                        when=move || editing.get()
                        fallback=move || {
                            let u = user.get().unwrap_or_else(empty_user);
                            view! {
                                <dl class="profile-page__details">
                                    <dt>"Username"</dt>
                                    <dd>{u.username.clone()}</dd>
                                    <dt>"Email"</dt>
                                    <dd>{u.email.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                                    <dt>"Age"</dt>
                                    <dd>{u.age.map_or_else(|| "-".to_owned(), |a| a.to_string())}</dd>
                                    <dt>"Gender"</dt>
                                    <dd>{u.gender.clone().unwrap_or_else(|| "-".to_owned())}</dd>
                                </dl>
                                <button class="btn" on:click=on_edit>"Edit"</button>
                            }
                        }
                    >
                        <form class="profile-page__form" on:submit=on_save>
                            <input
                                class="auth-input"
                                type="text"
                                placeholder="Username"
                                prop:value=move || username.get()
                                on:input=move |ev| username.set(event_target_value(&ev))
                            />
                            <input
                                class="auth-input"
                                type="number"
                                min="1"
                                placeholder="Age"
                                prop:value=move || age.get()
                                on:input=move |ev| age.set(event_target_value(&ev))
                            />
                            <select
                                class="auth-input"
                                prop:value=move || gender.get()
                                on:change=move |ev| gender.set(event_target_value(&ev))
                            >
                                <option value="">"Gender"</option>
                                {GENDER_OPTIONS
                                    .iter()
                                    .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                    .collect_view()}
                            </select>
                            <div class="profile-page__form-actions">
                                <button class="btn btn--primary" type="submit" disabled=move || saving.get()>
                                    "Save"
                                </button>
                                <button class="btn" type="button" on:click=move |_| editing.set(false)>
                                    "Cancel"
                                </button>
                            </div>
                        </form>
                    </Show>
                    <Show when=move || error.get().is_some()>
                        <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                </section>

                <section class="panel">
                    <h2>"My chats"</h2>
                    <Show
                        when=move || !chats.get().is_empty()
                        fallback=move || view! { <p class="muted">"You are not in any chats yet."</p> }
                    >
                        <div class="card-grid">
                            {move || {
                                chats
                                    .get()
                                    .into_iter()
                                    .map(|chat| view! { <ChatCard chat=chat show_type=true /> })
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                </section>
            </Show>
        </div>
    }
}

fn empty_user() -> User {
    User {
        id: 0,
        username: String::new(),
        email: None,
        age: None,
        gender: None,
        role: None,
        interests: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}
