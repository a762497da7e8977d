//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::pages::{
    anonymous_chat::AnonymousChatPage, chat::ChatPage, create_chat::CreateChatPage,
    group_chats::GroupChatsPage, login::LoginPage, profile::ProfilePage, register::RegisterPage,
};
use crate::state::auth::AuthState;
use crate::util::auth::home_target;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth context, restores the stored session in the browser,
/// and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::restoring());
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(crate::util::auth::restore_session(auth));

    view! {
        <Stylesheet id="leptos" href="/pkg/chatroom.css"/>
        <Title text="Chatroom"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomeRedirect/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("anonymous-chat") view=AnonymousChatPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                    <Route path=StaticSegment("group-chats") view=GroupChatsPage/>
                    <Route path=StaticSegment("create-chat") view=CreateChatPage/>
                    <Route path=(StaticSegment("chat"), ParamSegment("id")) view=ChatPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// `/` forwards to the profile when a token is stored, else to anonymous chat.
#[component]
fn HomeRedirect() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    move || {
        let state = auth.get();
        if state.loading {
            return view! { <p>"Loading..."</p> }.into_any();
        }
        let has_token = state.is_authenticated() || crate::util::storage::access_token().is_some();
        view! { <Redirect path=home_target(has_token)/> }.into_any()
    }
}
