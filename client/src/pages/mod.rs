//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and route-scoped orchestration, and
//! delegates the shared chrome to `components`.

pub mod home;
pub mod reset_password;
pub mod reset_password_confirm;
pub mod sign_in;
pub mod sign_up;

/// Shortest password the server accepts.
pub(crate) const MIN_PASSWORD_LEN: usize = 6;
