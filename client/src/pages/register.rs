//! Registration page for full accounts.
//!
//! A successful registration signs the user in and lands on `/profile`.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;

use crate::components::interest_picker::InterestPicker;
use crate::net::types::{Interest, RegisterData};
#[cfg(feature = "hydrate")]
use crate::state::auth::AuthState;

pub(crate) const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub(crate) const REGISTER_MISSING_FIELDS: &str = "Please fill in all fields";
pub(crate) const REGISTER_INVALID_AGE: &str = "Age must be a positive number";
pub(crate) const REGISTER_INVALID_GENDER: &str = "Please select a gender";

pub const GENDER_OPTIONS: [(&str, &str); 3] = [("male", "Male"), ("female", "Female"), ("other", "Other")];

/// Raw form values as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub age: String,
    pub gender: String,
    pub interests: Vec<String>,
}

/// Parse a positive integer age.
pub fn parse_age(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|age| *age > 0)
}

/// Validate the form and build the registration payload.
pub fn validate_register(form: &RegisterForm) -> Result<RegisterData, &'static str> {
    let username = form.username.trim();
    let email = form.email.trim();
    if username.is_empty() || form.password.is_empty() || email.is_empty() || form.age.trim().is_empty() {
        return Err(REGISTER_MISSING_FIELDS);
    }
    let age = parse_age(&form.age).ok_or(REGISTER_INVALID_AGE)?;
    if !GENDER_OPTIONS.iter().any(|(value, _)| *value == form.gender) {
        return Err(REGISTER_INVALID_GENDER);
    }
    Ok(RegisterData {
        username: username.to_owned(),
        password: form.password.clone(),
        email: email.to_owned(),
        age,
        gender: form.gender.clone(),
        interests: form.interests.clone(),
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let age = RwSignal::new(String::new());
    let gender = RwSignal::new(String::new());
    let selected = RwSignal::new(Vec::<String>::new());
    let options = RwSignal::new(Vec::<Interest>::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::interests().await {
            Ok(list) => options.set(list),
            Err(e) => leptos::logging::warn!("interest list unavailable: {e}"),
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = RegisterForm {
            username: username.get(),
            password: password.get(),
            email: email.get(),
            age: age.get(),
            gender: gender.get(),
            interests: selected.get(),
        };
        let data = match validate_register(&form) {
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
                match crate::util::auth::register(auth, data).await {
                    Ok(_) => navigate("/profile", leptos_router::NavigateOptions::default()),
                    Err(e) => {
                        leptos::logging::warn!("registration failed: {e}");
                        error.set(Some(REGISTER_FAILED.to_owned()));
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = data;
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Register"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Username"
                        required
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Email"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="number"
                        min="1"
                        placeholder="Age"
                        required
                        prop:value=move || age.get()
                        on:input=move |ev| age.set(event_target_value(&ev))
                    />
                    <select
                        class="auth-input"
                        required
                        prop:value=move || gender.get()
                        on:change=move |ev| gender.set(event_target_value(&ev))
                    >
                        <option value="">"Gender"</option>
                        {GENDER_OPTIONS
                            .iter()
                            .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                            .collect_view()}
                    </select>
                    <label class="form-label">"Interests"</label>
                    <InterestPicker options=options selected=selected />
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Registering..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? " <a href="/login">"Login"</a>
                </p>
            </div>
        </div>
    }
}
