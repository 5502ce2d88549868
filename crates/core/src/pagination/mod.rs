//! Page-indexed list retrieval.
//!
//! The display rules are pure functions of the client page and the
//! server-reported window. The `Pager` turns user intent (go to a page,
//! next, previous) into discrete fetch commands instead of reacting
//! implicitly to state changes.
//!
//! # Modules
//!
//! - `window` - "Showing X to Y of Z" text and previous/next enablement
//! - `pager` - Page state and fetch commands

pub mod pager;
pub mod window;

#[cfg(test)]
mod props;

pub use pager::{FetchPage, Pager};
pub use window::{can_go_next, can_go_previous, summary};
