//! Client-side state.
//!
//! DESIGN
//! ======
//! `chat` is the view-model the components render; `session` resolves who is
//! logged in. Both are plain data plus pure functions so they test natively.

pub mod chat;
pub mod session;
