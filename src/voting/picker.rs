//! Stateless multi-step collection of an ordinal ranking.
//!
//! The accumulated picks ride inside the interaction as an opaque token,
//! so a flow in progress survives process restarts and costs no server
//! memory. Each step is a pure function of the carried state and the
//! user's selection; the completed ordering is committed through the
//! store's order-vote path, which re-checks that the ranking is open.

use crate::error::{self, Error};

/// In-flight selection state: the option indices picked so far, in pick
/// order. Position `k` in the final ordering is the option at `picks[k-1]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PickState {
    picks: Vec<i32>,
}

/// Outcome of one selection step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PickStep {
    /// More picks are needed; carry the new state into the next prompt.
    Continue(PickState),
    /// Every option has a position. Pairs are `(option_idx, position)`
    /// with positions forming exactly 1..=N.
    Complete(Vec<(i32, i32)>),
}

impl PickState {
    /// A fresh flow at position 1. Starting over always discards any
    /// in-progress attempt, since the old token is simply never reused.
    pub fn start() -> PickState {
        PickState { picks: vec![] }
    }

    /// The 1-based position the user is currently choosing.
    pub fn position(&self) -> i32 {
        self.picks.len() as i32 + 1
    }

    pub fn picks(&self) -> &[i32] {
        &self.picks
    }

    /// Applies one selection. When exactly one option remains unpicked it
    /// is appended automatically and the completed ordering is returned.
    pub fn advance(mut self, option_count: usize, chosen_idx: i32) -> Result<PickStep, Error> {
        // a token minted against a different option set is unusable
        let stale = self.picks.len() >= option_count
            || self
                .picks
                .iter()
                .any(|&idx| idx < 0 || idx as usize >= option_count);
        if stale {
            return Err(error::bad_continuation(&self.token()));
        }
        if chosen_idx < 0 || chosen_idx as usize >= option_count {
            return Err(error::option_index_out_of_range(chosen_idx, option_count));
        }
        if self.picks.contains(&chosen_idx) {
            return Err(error::already_picked(chosen_idx));
        }
        self.picks.push(chosen_idx);

        // with one option left there is nothing to choose
        if self.picks.len() + 1 == option_count {
            if let Some(last) = (0..option_count as i32).find(|idx| !self.picks.contains(idx)) {
                self.picks.push(last);
            }
        }

        if self.picks.len() == option_count {
            let assignments = self
                .picks
                .iter()
                .enumerate()
                .map(|(i, &idx)| (idx, i as i32 + 1))
                .collect();
            return Ok(PickStep::Complete(assignments));
        }
        Ok(PickStep::Continue(self))
    }

    /// The continuation token to embed in the next prompt.
    pub fn token(&self) -> String {
        self.picks
            .iter()
            .map(|idx| idx.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Rebuilds the state carried by an interaction. An empty token is a
    /// fresh flow.
    pub fn from_token(token: &str) -> Result<PickState, Error> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(PickState::start());
        }
        let mut picks = vec![];
        for part in token.split(',') {
            let idx: i32 = part
                .trim()
                .parse()
                .map_err(|_| error::bad_continuation(token))?;
            if picks.contains(&idx) {
                return Err(error::bad_continuation(token));
            }
            picks.push(idx);
        }
        Ok(PickState { picks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must_continue(step: PickStep) -> PickState {
        match step {
            PickStep::Continue(state) => state,
            PickStep::Complete(done) => panic!("flow finished early: {done:?}"),
        }
    }

    #[test]
    fn last_option_is_auto_assigned() {
        // options A B C: pick A, then C; B takes the last position
        let state = PickState::start();
        let state = must_continue(state.advance(3, 0).unwrap());
        assert_eq!(state.position(), 2);
        match state.advance(3, 2).unwrap() {
            PickStep::Complete(assignments) => {
                assert_eq!(assignments, vec![(0, 1), (2, 2), (1, 3)]);
            }
            step => panic!("expected completion, got {step:?}"),
        }
    }

    #[test]
    fn positions_form_a_permutation() {
        let mut state = PickState::start();
        let picks = [3, 0, 2];
        let mut done = None;
        for idx in picks {
            match state.clone().advance(5, idx).unwrap() {
                PickStep::Continue(next) => state = next,
                PickStep::Complete(assignments) => {
                    done = Some(assignments);
                    break;
                }
            }
        }
        // 3 of 5 picked, one more pick triggers auto-completion
        assert!(done.is_none());
        let PickStep::Complete(assignments) = state.advance(5, 4).unwrap() else {
            panic!("expected completion");
        };
        let mut positions: Vec<i32> = assignments.iter().map(|&(_, pos)| pos).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
        let mut indices: Vec<i32> = assignments.iter().map(|&(idx, _)| idx).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn repeat_pick_is_rejected() {
        let state = must_continue(PickState::start().advance(3, 1).unwrap());
        assert!(state.advance(3, 1).is_err());
    }

    #[test]
    fn out_of_range_pick_is_rejected() {
        assert!(PickState::start().advance(3, 3).is_err());
        assert!(PickState::start().advance(3, -1).is_err());
    }

    #[test]
    fn token_round_trip() {
        let state = must_continue(PickState::start().advance(4, 2).unwrap());
        let state = must_continue(state.advance(4, 0).unwrap());
        let token = state.token();
        assert_eq!(token, "2,0");
        let resumed = PickState::from_token(&token).unwrap();
        assert_eq!(resumed, state);
        assert_eq!(resumed.position(), 3);
    }

    #[test]
    fn empty_token_is_a_fresh_flow() {
        let state = PickState::from_token("").unwrap();
        assert_eq!(state, PickState::start());
        assert_eq!(state.position(), 1);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(PickState::from_token("1,x").is_err());
        assert!(PickState::from_token("1,1").is_err());
    }

    #[test]
    fn stale_token_from_a_shrunk_option_set_is_rejected() {
        // minted when the ranking had 4 options, resumed after an edit to 2
        let state = PickState::from_token("3").unwrap();
        assert!(state.advance(2, 0).is_err());
    }
}
