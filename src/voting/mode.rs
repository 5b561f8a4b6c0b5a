use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{self, Error};

/// How many options a poll voter may hold at once.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollMode {
    Single,
    Multi,
}

impl PollMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            PollMode::Single => "single",
            PollMode::Multi => "multi",
        }
    }

    pub fn parse(s: &str) -> Result<PollMode, Error> {
        match s {
            "single" => Ok(PollMode::Single),
            "multi" => Ok(PollMode::Multi),
            other => Err(error::unknown_mode(other)),
        }
    }
}

impl Display for PollMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a ranking scores its options: independent star ratings, or one
/// full ordering per voter.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMode {
    Star,
    Order,
}

impl RankMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            RankMode::Star => "star",
            RankMode::Order => "order",
        }
    }

    pub fn parse(s: &str) -> Result<RankMode, Error> {
        match s {
            "star" => Ok(RankMode::Star),
            "order" => Ok(RankMode::Order),
            other => Err(error::unknown_mode(other)),
        }
    }
}

impl Display for RankMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
