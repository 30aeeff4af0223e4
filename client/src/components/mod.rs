//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the shared auth chrome and read the session from the
//! Leptos context provided by `App`.

pub mod auth_card;
pub mod error_banner;
pub mod page_meta;
