//! Backend services: credential hashing, token signing, outgoing mail, and
//! the account workflows built on top of them.

pub mod auth;
pub mod email;
pub mod jwt;
pub mod password;
