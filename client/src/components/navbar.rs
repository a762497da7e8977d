//! Top navigation bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads `AuthState` from context; link set switches on sign-in.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::util::auth;

/// `(href, label)` pairs shown for the given auth status.
pub fn nav_links(authenticated: bool) -> &'static [(&'static str, &'static str)] {
    if authenticated {
        &[("/profile", "Profile"), ("/group-chats", "Group chats"), ("/anonymous-chat", "Anonymous chat")]
    } else {
        &[("/anonymous-chat", "Anonymous chat"), ("/login", "Login"), ("/register", "Register")]
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();
    let authenticated = move || auth_state.with(AuthState::is_authenticated);

    let on_logout = move |_| {
        auth::logout(auth_state);
        navigate("/anonymous-chat", leptos_router::NavigateOptions::default());
    };

    view! {
        <nav class="navbar">
            <a href="/" class="navbar__brand">"Chatroom"</a>
            <div class="navbar__links">
                {move || {
                    nav_links(authenticated())
                        .iter()
                        .map(|(href, label)| view! { <a href=*href class="navbar__link">{*label}</a> })
                        .collect_view()
                }}
                <Show when=authenticated>
                    <button class="btn navbar__logout" on:click=on_logout.clone()>"Logout"</button>
                </Show>
            </div>
        </nav>
    }
}
