//! Client state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! State types are UI-independent and tested natively. `App` provides the
//! auth session as a Leptos context signal; pages own their form state.

pub mod auth;
pub mod flows;
pub mod form;
