//! Anonymous chat matching page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. Visitors without a stored token are asked for a nickname,
//! gender and age first; the anonymous account is created and the search
//! runs right after. `?register=1` opens that dialog on arrival, which is
//! how the chat room sends users whose anonymous account was deleted.

#[cfg(test)]
#[path = "anonymous_chat_test.rs"]
mod anonymous_chat_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;

use crate::components::interest_picker::InterestPicker;
use crate::net::types::{AnonymousChatFilters, AnonymousUserData, Interest};
use crate::pages::register::GENDER_OPTIONS;
#[cfg(feature = "hydrate")]
use crate::state::auth::AuthState;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;

pub(crate) const FIND_FAILED: &str = "Failed to find chat";
pub(crate) const INTERESTS_FAILED: &str = "Failed to load interests";
pub(crate) const ANONYMOUS_REGISTER_FAILED: &str = "Failed to register anonymous user";
pub(crate) const AGE_OUT_OF_RANGE: &str = "Age must be between 18 and 100";
pub(crate) const AGE_RANGE_INVERTED: &str = "Minimum age cannot exceed maximum age";
pub(crate) const NICKNAME_REQUIRED: &str = "Please enter a nickname";
pub(crate) const GENDER_REQUIRED: &str = "Please select a gender";

const PARTNER_GENDERS: [(&str, &str); 3] = [("", "Any"), ("male", "Male"), ("female", "Female")];

/// `?register=1` opens the anonymous registration dialog.
pub fn wants_register_dialog(register_param: Option<&str>) -> bool {
    register_param == Some("1")
}

fn parse_bounded_age(raw: &str) -> Result<Option<u32>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>()
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
        .map(Some)
        .ok_or(AGE_OUT_OF_RANGE)
}

/// Build matching filters; blank fields are left out.
pub fn build_anonymous_filters(
    interests: Vec<String>,
    gender: &str,
    min_age: &str,
    max_age: &str,
) -> Result<AnonymousChatFilters, &'static str> {
    let min_age = parse_bounded_age(min_age)?;
    let max_age = parse_bounded_age(max_age)?;
    if let (Some(min), Some(max)) = (min_age, max_age) {
        if min > max {
            return Err(AGE_RANGE_INVERTED);
        }
    }
    let gender = Some(gender.trim()).filter(|g| !g.is_empty()).map(str::to_owned);
    Ok(AnonymousChatFilters { interests, gender, min_age, max_age })
}

/// Validate the anonymous registration dialog.
pub fn validate_anonymous_user(nickname: &str, gender: &str, age: &str) -> Result<AnonymousUserData, &'static str> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(NICKNAME_REQUIRED);
    }
    if !GENDER_OPTIONS.iter().any(|(value, _)| *value == gender) {
        return Err(GENDER_REQUIRED);
    }
    let age = parse_bounded_age(age)?.ok_or(AGE_OUT_OF_RANGE)?;
    Ok(AnonymousUserData { username: nickname.to_owned(), gender: gender.to_owned(), age })
}

#[component]
pub fn AnonymousChatPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();
    let query = use_query_map();

    let options = RwSignal::new(Vec::<Interest>::new());
    let selected = RwSignal::new(Vec::<String>::new());
    let partner_gender = RwSignal::new(String::new());
    let min_age = RwSignal::new(String::new());
    let max_age = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let show_dialog = RwSignal::new(false);
    let nickname = RwSignal::new(String::new());
    let own_gender = RwSignal::new(String::new());
    let own_age = RwSignal::new(String::new());

    Effect::new(move || {
        if wants_register_dialog(query.with(|q| q.get("register")).as_deref()) {
            show_dialog.set(true);
        }
    });

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::interests().await {
            Ok(list) => options.set(list),
            Err(e) => {
                leptos::logging::warn!("interest list unavailable: {e}");
                error.set(Some(INTERESTS_FAILED.to_owned()));
            }
        }
    });

    // Validates the filters, then runs the search and opens the matched chat.
    let run_search = move || {
        let filters = match build_anonymous_filters(
            selected.get_untracked(),
            &partner_gender.get_untracked(),
            &min_age.get_untracked(),
            &max_age.get_untracked(),
        ) {
            Ok(filters) => filters,
            Err(message) => {
                error.set(Some(message.to_owned()));
                busy.set(false);
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::find_anonymous_chat(&filters).await {
                    Ok(chat) => navigate(&format!("/chat/{}", chat.id), leptos_router::NavigateOptions::default()),
                    Err(e) => {
                        leptos::logging::warn!("anonymous match failed: {e}");
                        error.set(Some(FIND_FAILED.to_owned()));
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = filters;
            busy.set(false);
        }
    };

    let on_find = {
        let run_search = run_search.clone();
        move |_| {
            if busy.get() {
                return;
            }
            error.set(None);
            if crate::util::storage::access_token().is_none() {
                show_dialog.set(true);
                return;
            }
            busy.set(true);
            run_search();
        }
    };

    let on_register = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let data = match validate_anonymous_user(&nickname.get(), &own_gender.get(), &own_age.get()) {
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
            let run_search = run_search.clone();
            leptos::task::spawn_local(async move {
                match crate::util::auth::register_anonymous(auth, data).await {
                    Ok(_) => {
                        show_dialog.set(false);
                        run_search();
                    }
                    Err(e) => {
                        leptos::logging::warn!("anonymous registration failed: {e}");
                        error.set(Some(ANONYMOUS_REGISTER_FAILED.to_owned()));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (data, &run_search);
            busy.set(false);
        }
    };

    let age_input = move |value: RwSignal<String>, placeholder: &'static str| {
        view! {
            <input
                class="auth-input"
                type="number"
                min=MIN_AGE.to_string()
                max=MAX_AGE.to_string()
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="anonymous-page">
            <h1>"Anonymous chat"</h1>
            <section class="panel">
                <label class="form-label">"Interests"</label>
                <InterestPicker options=options selected=selected />
                <label class="form-label">"Partner gender"</label>
                <select
                    class="auth-input"
                    prop:value=move || partner_gender.get()
                    on:change=move |ev| partner_gender.set(event_target_value(&ev))
                >
                    {PARTNER_GENDERS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <div class="anonymous-page__ages">
                    {age_input(min_age, "Min age")}
                    {age_input(max_age, "Max age")}
                </div>
                <button class="btn btn--primary" on:click=on_find disabled=move || busy.get()>
                    {move || if busy.get() { "Searching..." } else { "Find chat" }}
                </button>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </section>

            <Show when=move || show_dialog.get()>
                <div class="dialog-backdrop">
                    <form class="dialog" on:submit=on_register.clone()>
                        <h2>"Introduce yourself"</h2>
                        <input
                            class="auth-input"
                            type="text"
                            placeholder="Nickname"
                            prop:value=move || nickname.get()
                            on:input=move |ev| nickname.set(event_target_value(&ev))
                        />
                        <select
                            class="auth-input"
                            prop:value=move || own_gender.get()
                            on:change=move |ev| own_gender.set(event_target_value(&ev))
                        >
                            <option value="">"Gender"</option>
                            {GENDER_OPTIONS
                                .iter()
                                .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                .collect_view()}
                        </select>
                        {age_input(own_age, "Age")}
                        <div class="dialog__actions">
                            <button class="btn" type="button" on:click=move |_| show_dialog.set(false)>
                                "Cancel"
                            </button>
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                "Start"
                            </button>
                        </div>
                    </form>
                </div>
            </Show>
        </div>
    }
}
