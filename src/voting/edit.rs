//! Decides what an edit does to the votes already on record.
//!
//! Poll votes are keyed by label, so a poll tolerates reordering and
//! renumbering; only labels that disappear take their votes with them.
//! Ranking votes are keyed by position, so any change to the option
//! sequence (or to the mode) throws every ranking vote away.

use std::collections::HashSet;

use super::mode::{PollMode, RankMode};

/// What an edit does to a poll's existing votes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PollClearance {
    /// Every existing vote stays valid.
    None,
    /// All votes must go.
    All,
    /// Only votes for these labels survive.
    RetainLabels(HashSet<String>),
}

/// Set comparison: relabeling a position to a label that exists elsewhere,
/// or reordering without adding/removing, is not a change.
pub fn poll_options_changed(current: &[String], proposed: &[String]) -> bool {
    let current: HashSet<&str> = current.iter().map(String::as_str).collect();
    let proposed: HashSet<&str> = proposed.iter().map(String::as_str).collect();
    current != proposed
}

/// Sequence comparison: any difference in order or count is a change.
pub fn rank_options_changed(current: &[String], proposed: &[String]) -> bool {
    current != proposed
}

pub fn poll_clearance(
    old_mode: PollMode,
    new_mode: PollMode,
    current: &[String],
    proposed: &[String],
) -> PollClearance {
    // multi -> single is unsafe: a voter might hold more than one slot.
    // single -> multi keeps every vote valid.
    if old_mode != new_mode && new_mode == PollMode::Single {
        return PollClearance::All;
    }
    if poll_options_changed(current, proposed) {
        return PollClearance::RetainLabels(proposed.iter().cloned().collect());
    }
    PollClearance::None
}

pub fn rank_votes_invalidated(
    old_mode: RankMode,
    new_mode: RankMode,
    current: &[String],
    proposed: &[String],
) -> bool {
    old_mode != new_mode || rank_options_changed(current, proposed)
}
