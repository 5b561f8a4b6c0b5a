use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::error::{self, Error};
use crate::voting::{self, Id, Mention, PollMode, RankMode};

use super::schema;

#[derive(Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::polls)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PollRow {
    pub id: String,
    pub guild_id: i64,
    pub channel_id: i64,
    pub message_id: Option<i64>,
    pub creator_id: i64,
    pub title: String,
    pub mode: String,
    pub anonymous: bool,
    pub show_live: bool,
    pub mentions: String,
    pub closed: bool,
    pub created_at: NaiveDateTime,
}

impl PollRow {
    pub fn from_settings(
        id: Id,
        settings: &voting::CreatePollSettings,
        created_at: NaiveDateTime,
    ) -> Result<PollRow, Error> {
        Ok(PollRow {
            id: id.to_string(),
            guild_id: settings.guild_id,
            channel_id: settings.channel_id,
            message_id: None,
            creator_id: settings.creator_id,
            title: settings.title.clone(),
            mode: settings.mode.as_str().to_string(),
            anonymous: settings.anonymous,
            show_live: settings.show_live,
            mentions: encode_mentions(&settings.mentions)?,
            closed: false,
            created_at,
        })
    }
}

impl TryInto<voting::Poll> for PollRow {
    type Error = Error;
    fn try_into(self) -> Result<voting::Poll, Error> {
        Ok(voting::Poll {
            id: parse_id("polls", &self.id)?,
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            message_id: self.message_id,
            creator_id: self.creator_id,
            title: self.title,
            mode: PollMode::parse(&self.mode)?,
            anonymous: self.anonymous,
            show_live: self.show_live,
            mentions: decode_mentions(&self.mentions)?,
            closed: self.closed,
            created_at: self.created_at.and_utc(),
        })
    }
}

#[derive(Associations, Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::poll_options)]
#[diesel(primary_key(poll_id, idx))]
#[diesel(belongs_to(PollRow, foreign_key = poll_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PollOptionRow {
    pub poll_id: String,
    pub idx: i32,
    pub label: String,
    pub target: Option<i32>,
}

impl TryInto<voting::PollOption> for PollOptionRow {
    type Error = Error;
    fn try_into(self) -> Result<voting::PollOption, Error> {
        Ok(voting::PollOption {
            poll_id: parse_id("poll_options", &self.poll_id)?,
            idx: self.idx,
            label: self.label,
            target: self.target,
        })
    }
}

#[derive(Associations, Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::poll_votes)]
#[diesel(primary_key(poll_id, option_label, user_id))]
#[diesel(belongs_to(PollRow, foreign_key = poll_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PollVoteRow {
    pub poll_id: String,
    pub option_label: String,
    pub user_id: i64,
}

impl TryInto<voting::PollVote> for PollVoteRow {
    type Error = Error;
    fn try_into(self) -> Result<voting::PollVote, Error> {
        Ok(voting::PollVote {
            poll_id: parse_id("poll_votes", &self.poll_id)?,
            option_label: self.option_label,
            user_id: self.user_id,
        })
    }
}

#[derive(Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::ranks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RankRow {
    pub id: String,
    pub guild_id: i64,
    pub channel_id: i64,
    pub message_id: Option<i64>,
    pub creator_id: i64,
    pub title: String,
    pub mode: String,
    pub anonymous: bool,
    pub show_live: bool,
    pub mentions: String,
    pub closed: bool,
    pub created_at: NaiveDateTime,
}

impl RankRow {
    pub fn from_settings(
        id: Id,
        settings: &voting::CreateRankSettings,
        created_at: NaiveDateTime,
    ) -> Result<RankRow, Error> {
        Ok(RankRow {
            id: id.to_string(),
            guild_id: settings.guild_id,
            channel_id: settings.channel_id,
            message_id: None,
            creator_id: settings.creator_id,
            title: settings.title.clone(),
            mode: settings.mode.as_str().to_string(),
            anonymous: settings.anonymous,
            show_live: settings.show_live,
            mentions: encode_mentions(&settings.mentions)?,
            closed: false,
            created_at,
        })
    }
}

impl TryInto<voting::Ranking> for RankRow {
    type Error = Error;
    fn try_into(self) -> Result<voting::Ranking, Error> {
        Ok(voting::Ranking {
            id: parse_id("ranks", &self.id)?,
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            message_id: self.message_id,
            creator_id: self.creator_id,
            title: self.title,
            mode: RankMode::parse(&self.mode)?,
            anonymous: self.anonymous,
            show_live: self.show_live,
            mentions: decode_mentions(&self.mentions)?,
            closed: self.closed,
            created_at: self.created_at.and_utc(),
        })
    }
}

#[derive(Associations, Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::rank_options)]
#[diesel(primary_key(rank_id, idx))]
#[diesel(belongs_to(RankRow, foreign_key = rank_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RankOptionRow {
    pub rank_id: String,
    pub idx: i32,
    pub label: String,
}

impl TryInto<voting::RankOption> for RankOptionRow {
    type Error = Error;
    fn try_into(self) -> Result<voting::RankOption, Error> {
        Ok(voting::RankOption {
            rank_id: parse_id("rank_options", &self.rank_id)?,
            idx: self.idx,
            label: self.label,
        })
    }
}

#[derive(Associations, Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = schema::rank_votes)]
#[diesel(primary_key(rank_id, option_idx, user_id))]
#[diesel(belongs_to(RankRow, foreign_key = rank_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RankVoteRow {
    pub rank_id: String,
    pub option_idx: i32,
    pub user_id: i64,
    pub value: i32,
}

impl TryInto<voting::RankVote> for RankVoteRow {
    type Error = Error;
    fn try_into(self) -> Result<voting::RankVote, Error> {
        Ok(voting::RankVote {
            rank_id: parse_id("rank_votes", &self.rank_id)?,
            option_idx: self.option_idx,
            user_id: self.user_id,
            value: self.value,
        })
    }
}

fn parse_id(table: &'static str, raw: &str) -> Result<Id, Error> {
    raw.parse().map_err(|_| error::corrupt_row(table, raw))
}

pub fn encode_mentions(mentions: &[Mention]) -> Result<String, Error> {
    Ok(serde_json::to_string(mentions)?)
}

fn decode_mentions(raw: &str) -> Result<Vec<Mention>, Error> {
    Ok(serde_json::from_str(raw)?)
}
