//! Domain engine for group polls and rankings.
//!
//! A poll collects single- or multiple-choice votes keyed by option label;
//! a ranking collects star ratings or a full ordinal ordering keyed by
//! option index. The chat-platform UI layer (commands, modals, message
//! rendering) lives outside this crate and talks to it through the
//! [`db`] store operations and the pure helpers in [`voting`].

pub mod db;
pub mod error;
pub mod voting;

pub use error::Error;
