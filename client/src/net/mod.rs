//! Networking modules for REST calls and the live chat feed.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` exposes one function per backend endpoint on top of the `http`
//! plumbing, `live` manages the chat websocket, `error` and `types` define
//! the shared wire schema.

pub mod api;
pub mod error;
pub(crate) mod http;
pub mod live;
pub mod types;
