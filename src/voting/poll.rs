use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::Id;
use super::mention::Mention;
use super::mode::PollMode;
use super::options::ParsedOption;

/// A single- or multiple-choice question posted to a channel.
///
/// Votes are keyed by option *label*, so edits that keep a label keep the
/// votes for it even if the option moves to a different position.
#[derive(Clone, Debug, Serialize)]
pub struct Poll {
    pub id: Id,
    pub guild_id: i64,
    pub channel_id: i64,
    /// Set once the rendered message has been posted.
    pub message_id: Option<i64>,
    pub creator_id: i64,
    pub title: String,
    pub mode: PollMode,
    pub anonymous: bool,
    pub show_live: bool,
    pub mentions: Vec<Mention>,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
}

impl Poll {
    /// Whether tallies may be rendered right now. Live visibility only
    /// matters while the poll is open; closed polls always show results.
    pub fn results_visible(&self) -> bool {
        self.closed || self.show_live
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PollOption {
    pub poll_id: Id,
    /// Dense zero-based display position.
    pub idx: i32,
    pub label: String,
    /// Maximum distinct voters for this option; `None` means unlimited.
    pub target: Option<i32>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PollVote {
    pub poll_id: Id,
    pub option_label: String,
    pub user_id: i64,
}

pub struct CreatePollSettings {
    pub guild_id: i64,
    pub channel_id: i64,
    pub creator_id: i64,
    pub title: String,
    pub mode: PollMode,
    pub anonymous: bool,
    pub show_live: bool,
    pub mentions: Vec<Mention>,
    pub options: Vec<ParsedOption>,
}

/// The full set of fields a creator submits through the edit form.
/// Everything is applied; vote clearing depends on what actually changed.
pub struct UpdatePollSettings {
    pub title: String,
    pub mode: PollMode,
    pub anonymous: bool,
    pub show_live: bool,
    pub mentions: Vec<Mention>,
    pub options: Vec<ParsedOption>,
}
