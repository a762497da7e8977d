//! Login page: username + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;

use crate::net::types::LoginData;
#[cfg(feature = "hydrate")]
use crate::state::auth::AuthState;

pub(crate) const LOGIN_FAILED: &str = "Invalid username or password";
pub(crate) const LOGIN_MISSING_FIELDS: &str = "Please enter username and password";

/// Build the login payload; both fields are required.
pub fn validate_login(username: &str, password: &str) -> Result<LoginData, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(LOGIN_MISSING_FIELDS);
    }
    Ok(LoginData { username: username.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    let auth = expect_context::<RwSignal<AuthState>>();
    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let data = match validate_login(&username.get(), &password.get()) {
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
                match crate::util::auth::login(auth, data).await {
                    Ok(_) => navigate("/", leptos_router::NavigateOptions::default()),
                    Err(e) => {
                        leptos::logging::warn!("login failed: {e}");
                        error.set(Some(LOGIN_FAILED.to_owned()));
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
                <h1>"Login"</h1>
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
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Login" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="auth-card__footer">
                    "No account? " <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
