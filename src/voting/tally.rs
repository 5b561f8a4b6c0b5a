//! Result aggregation over raw vote rows, for rendering live or final
//! results. All functions here are pure; callers fetch options and votes
//! from the store first and gate on `results_visible()` themselves.

use std::collections::HashSet;

use super::poll::{PollOption, PollVote};
use super::rank::{RankOption, RankVote};

/// Fill state of a targeted poll option.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuotaState {
    Empty,
    Partial,
    Filled,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PollTallyRow {
    pub idx: i32,
    pub label: String,
    pub target: Option<i32>,
    /// Distinct voters on this label (one row per voter per label).
    pub count: usize,
    /// Share of all voters, 0 when nobody has voted; drives the bar width.
    pub ratio: f64,
    /// Only present for options with a target.
    pub quota: Option<QuotaState>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PollTally {
    pub total_voters: usize,
    pub rows: Vec<PollTallyRow>,
}

pub fn poll_tally(options: &[PollOption], votes: &[PollVote]) -> PollTally {
    let total_voters = votes
        .iter()
        .map(|v| v.user_id)
        .collect::<HashSet<_>>()
        .len();
    let rows = options
        .iter()
        .map(|option| {
            let count = votes
                .iter()
                .filter(|v| v.option_label == option.label)
                .count();
            let ratio = if total_voters == 0 {
                0.0
            } else {
                count as f64 / total_voters as f64
            };
            let quota = option.target.map(|target| {
                if count == 0 {
                    QuotaState::Empty
                } else if (count as i32) < target {
                    QuotaState::Partial
                } else {
                    QuotaState::Filled
                }
            });
            PollTallyRow {
                idx: option.idx,
                label: option.label.clone(),
                target: option.target,
                count,
                ratio,
                quota,
            }
        })
        .collect();
    PollTally { total_voters, rows }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StarTallyRow {
    pub idx: i32,
    pub label: String,
    /// Distinct voters who rated this option.
    pub voters: usize,
    /// Mean rating, `None` until somebody has rated the option.
    pub average: Option<f64>,
}

impl StarTallyRow {
    /// One-decimal average, or a dash placeholder for unrated options.
    pub fn average_display(&self) -> String {
        match self.average {
            Some(average) => format!("{average:.1}"),
            None => String::from("-"),
        }
    }

    pub fn glyphs(&self) -> String {
        match self.average {
            Some(average) => star_glyphs(average),
            None => "☆".repeat(5),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StarTally {
    pub total_voters: usize,
    pub rows: Vec<StarTallyRow>,
}

pub fn star_tally(options: &[RankOption], votes: &[RankVote]) -> StarTally {
    let total_voters = votes
        .iter()
        .map(|v| v.user_id)
        .collect::<HashSet<_>>()
        .len();
    let rows = options
        .iter()
        .map(|option| {
            let values: Vec<i32> = votes
                .iter()
                .filter(|v| v.option_idx == option.idx)
                .map(|v| v.value)
                .collect();
            let average = if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<i32>() as f64 / values.len() as f64)
            };
            StarTallyRow {
                idx: option.idx,
                label: option.label.clone(),
                voters: values.len(),
                average,
            }
        })
        .collect();
    StarTally { total_voters, rows }
}

/// Renders an average rating as five glyphs rounded to the nearest half
/// star, e.g. 3.4 -> `★★★½☆`.
pub fn star_glyphs(average: f64) -> String {
    let halves = (average * 2.0).round().clamp(0.0, 10.0) as usize;
    let full = halves / 2;
    let half = halves % 2 == 1;
    let mut out = "★".repeat(full);
    if half {
        out.push('½');
    }
    out.push_str(&"☆".repeat(5 - full - usize::from(half)));
    out
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderTallyRow {
    pub idx: i32,
    pub label: String,
    /// Voters who placed this option (all rank it, or none do, per voter).
    pub votes: usize,
    /// Mean assigned position; lower is better. `f64::INFINITY` for
    /// options nobody has ranked, so they sort to the bottom.
    pub average_position: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderTally {
    pub total_voters: usize,
    /// Ascending by average position; ties keep the original option order.
    pub rows: Vec<OrderTallyRow>,
}

pub fn order_tally(options: &[RankOption], votes: &[RankVote]) -> OrderTally {
    let total_voters = votes
        .iter()
        .map(|v| v.user_id)
        .collect::<HashSet<_>>()
        .len();
    let mut rows: Vec<OrderTallyRow> = options
        .iter()
        .map(|option| {
            let values: Vec<i32> = votes
                .iter()
                .filter(|v| v.option_idx == option.idx)
                .map(|v| v.value)
                .collect();
            let average_position = if values.is_empty() {
                f64::INFINITY
            } else {
                values.iter().sum::<i32>() as f64 / values.len() as f64
            };
            OrderTallyRow {
                idx: option.idx,
                label: option.label.clone(),
                votes: values.len(),
                average_position,
            }
        })
        .collect();
    // sort_by is stable, so equal averages keep their idx order
    rows.sort_by(|a, b| a.average_position.total_cmp(&b.average_position));
    OrderTally { total_voters, rows }
}
