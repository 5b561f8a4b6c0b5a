use chrono::{DateTime, Utc};
use serde::Serialize;

use super::id::Id;
use super::mention::Mention;
use super::mode::RankMode;

/// A question whose options are scored rather than chosen: each voter
/// either star-rates options independently or submits one full ordering.
///
/// Ranking votes are keyed by option *index*, so any change to the option
/// set invalidates every vote.
#[derive(Clone, Debug, Serialize)]
pub struct Ranking {
    pub id: Id,
    pub guild_id: i64,
    pub channel_id: i64,
    /// Set once the rendered message has been posted.
    pub message_id: Option<i64>,
    pub creator_id: i64,
    pub title: String,
    pub mode: RankMode,
    pub anonymous: bool,
    pub show_live: bool,
    pub mentions: Vec<Mention>,
    pub closed: bool,
    pub created_at: DateTime<Utc>,
}

impl Ranking {
    /// Whether tallies may be rendered right now.
    pub fn results_visible(&self) -> bool {
        self.closed || self.show_live
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankOption {
    pub rank_id: Id,
    /// Dense zero-based display position; also the key ranking votes use.
    pub idx: i32,
    pub label: String,
}

/// One scored option for one user: a star rating 1-5, or an ordinal
/// position 1..N out of that user's complete ordering.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RankVote {
    pub rank_id: Id,
    pub option_idx: i32,
    pub user_id: i64,
    pub value: i32,
}

pub struct CreateRankSettings {
    pub guild_id: i64,
    pub channel_id: i64,
    pub creator_id: i64,
    pub title: String,
    pub mode: RankMode,
    pub anonymous: bool,
    pub show_live: bool,
    pub mentions: Vec<Mention>,
    pub options: Vec<String>,
}

/// The full set of fields a creator submits through the edit form.
pub struct UpdateRankSettings {
    pub title: String,
    pub mode: RankMode,
    pub anonymous: bool,
    pub show_live: bool,
    pub mentions: Vec<Mention>,
    pub options: Vec<String>,
}
