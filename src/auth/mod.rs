//! Authentication and session state.
//!
//! This module holds the session model ([`Session`], [`UserProfile`],
//! [`Role`]), the injectable [`SessionStore`], and the [`SessionEvent`]
//! notifications the client broadcasts when the session changes underneath
//! its callers.

mod events;
mod session;
mod store;

pub use events::SessionEvent;
pub use session::{Role, Session, UserProfile};
pub use store::{
    MemorySessionStore, SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY,
};
