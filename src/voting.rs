mod ballot;
mod edit;
mod id;
mod mention;
mod mode;
mod options;
mod picker;
mod poll;
mod rank;
mod tally;

pub use ballot::{quota_blocked, unknown_labels};
pub use edit::{
    poll_clearance, poll_options_changed, rank_options_changed, rank_votes_invalidated,
    PollClearance,
};
pub use id::Id;
pub use mention::Mention;
pub use mode::{PollMode, RankMode};
pub use options::{
    parse_poll_options, parse_rank_options, validate_poll_options, validate_rank_options,
    ParsedOption, MAX_LABEL_LEN, MAX_OPTIONS,
};
pub use picker::{PickState, PickStep};
pub use poll::{CreatePollSettings, Poll, PollOption, PollVote, UpdatePollSettings};
pub use rank::{CreateRankSettings, RankOption, RankVote, Ranking, UpdateRankSettings};
pub use tally::{
    order_tally, poll_tally, star_glyphs, star_tally, OrderTally, OrderTallyRow, PollTally,
    PollTallyRow, QuotaState, StarTally, StarTallyRow,
};
