//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render navigation, chat cards, interest selection and message
//! history while reading shared state from Leptos context providers.

pub mod chat_card;
pub mod interest_picker;
pub mod message_list;
pub mod navbar;
