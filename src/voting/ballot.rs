use super::poll::{PollOption, PollVote};

/// Labels in `chosen` that cannot take another voter: the option has a
/// target, the target is already met, and `user_id` does not hold one of
/// the existing slots. A holder may always re-submit their own slot.
pub fn quota_blocked(
    options: &[PollOption],
    votes: &[PollVote],
    user_id: i64,
    chosen: &[String],
) -> Vec<String> {
    let mut blocked = vec![];
    for option in options {
        let Some(target) = option.target else {
            continue;
        };
        if !chosen.iter().any(|label| label == &option.label) {
            continue;
        }
        // one row per (label, user), so row count is the distinct voter count
        let holders = votes
            .iter()
            .filter(|v| v.option_label == option.label)
            .count();
        let holds_slot = votes
            .iter()
            .any(|v| v.option_label == option.label && v.user_id == user_id);
        if holders as i32 >= target && !holds_slot {
            blocked.push(option.label.clone());
        }
    }
    blocked
}

/// Labels in `chosen` that do not name any option of the poll.
pub fn unknown_labels(options: &[PollOption], chosen: &[String]) -> Vec<String> {
    chosen
        .iter()
        .filter(|label| !options.iter().any(|o| &o.label == *label))
        .cloned()
        .collect()
}
