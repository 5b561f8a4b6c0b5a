//! Store operations for polls: creation, lookup, vote recording with
//! quota enforcement, and the edit-and-invalidate algorithm. Every
//! multi-row write runs inside a single transaction, and every mutation
//! rejects a closed poll before touching anything.

use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, info};

use crate::error::{self, Error};
use crate::voting::{self, Id, PollClearance};

use super::models::{PollOptionRow, PollRow, PollVoteRow};
use super::schema::{poll_options, poll_votes, polls};

pub fn create_poll(
    conn: &mut SqliteConnection,
    settings: voting::CreatePollSettings,
) -> Result<voting::Poll, Error> {
    voting::validate_poll_options(&settings.options)?;

    let id = Id::new();
    let row = PollRow::from_settings(id, &settings, Utc::now().naive_utc())?;
    let option_rows: Vec<PollOptionRow> = settings
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| PollOptionRow {
            poll_id: id.to_string(),
            idx: idx as i32,
            label: option.label.clone(),
            target: option.target,
        })
        .collect();

    conn.transaction::<_, Error, _>(|conn| {
        diesel::insert_into(polls::table).values(&row).execute(conn)?;
        diesel::insert_into(poll_options::table)
            .values(&option_rows)
            .execute(conn)?;
        Ok(())
    })?;

    info!("created poll {id} with {} options", option_rows.len());
    row.try_into()
}

pub fn get_poll(conn: &mut SqliteConnection, id: Id) -> Result<voting::Poll, Error> {
    let row = polls::table
        .filter(polls::id.eq(id.to_string()))
        .select(PollRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::NotFound("poll", id))?;
    row.try_into()
}

pub fn get_poll_options(
    conn: &mut SqliteConnection,
    id: Id,
) -> Result<Vec<voting::PollOption>, Error> {
    let rows = poll_options::table
        .filter(poll_options::poll_id.eq(id.to_string()))
        .order(poll_options::idx.asc())
        .select(PollOptionRow::as_select())
        .load(conn)?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub fn get_poll_votes(conn: &mut SqliteConnection, id: Id) -> Result<Vec<voting::PollVote>, Error> {
    let rows = poll_votes::table
        .filter(poll_votes::poll_id.eq(id.to_string()))
        .select(PollVoteRow::as_select())
        .load(conn)?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub fn get_user_poll_votes(
    conn: &mut SqliteConnection,
    id: Id,
    user_id: i64,
) -> Result<Vec<voting::PollVote>, Error> {
    let rows = poll_votes::table
        .filter(poll_votes::poll_id.eq(id.to_string()))
        .filter(poll_votes::user_id.eq(user_id))
        .select(PollVoteRow::as_select())
        .load(conn)?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub fn set_poll_message(
    conn: &mut SqliteConnection,
    id: Id,
    message_id: i64,
) -> Result<(), Error> {
    let updated = diesel::update(polls::table.filter(polls::id.eq(id.to_string())))
        .set(polls::message_id.eq(Some(message_id)))
        .execute(conn)?;
    if updated == 0 {
        return Err(Error::NotFound("poll", id));
    }
    Ok(())
}

/// Closes the poll for good. Only the creator may close, and a closed
/// poll never reopens.
pub fn close_poll(conn: &mut SqliteConnection, id: Id, actor_id: i64) -> Result<(), Error> {
    conn.transaction::<_, Error, _>(|conn| {
        let poll = get_poll(conn, id)?;
        if poll.creator_id != actor_id {
            return Err(Error::NotCreator("poll", id));
        }
        if poll.closed {
            return Err(Error::Closed("poll", id));
        }
        diesel::update(polls::table.filter(polls::id.eq(id.to_string())))
            .set(polls::closed.eq(true))
            .execute(conn)?;
        Ok(())
    })?;
    info!("closed poll {id}");
    Ok(())
}

fn open_poll(conn: &mut SqliteConnection, id: Id) -> Result<voting::Poll, Error> {
    let poll = get_poll(conn, id)?;
    if poll.closed {
        return Err(Error::Closed("poll", id));
    }
    Ok(poll)
}

/// Records a single-choice vote, replacing any prior vote this user cast
/// on the poll. `None` clears the vote entirely.
pub fn record_single_vote(
    conn: &mut SqliteConnection,
    id: Id,
    user_id: i64,
    choice: Option<&str>,
) -> Result<(), Error> {
    let chosen: Vec<String> = choice.iter().map(|s| s.to_string()).collect();
    conn.transaction::<_, Error, _>(|conn| {
        open_poll(conn, id)?;
        replace_votes(conn, id, user_id, &chosen)
    })?;
    debug!("user {user_id} voted {choice:?} on poll {id}");
    Ok(())
}

/// Records a multiple-choice vote, replacing all of this user's prior
/// rows for the poll. An empty selection clears the vote.
pub fn record_multi_vote(
    conn: &mut SqliteConnection,
    id: Id,
    user_id: i64,
    choices: &[String],
) -> Result<(), Error> {
    let mut chosen: Vec<String> = vec![];
    for label in choices {
        if !chosen.contains(label) {
            chosen.push(label.clone());
        }
    }
    conn.transaction::<_, Error, _>(|conn| {
        open_poll(conn, id)?;
        replace_votes(conn, id, user_id, &chosen)
    })?;
    debug!("user {user_id} voted for {} options on poll {id}", chosen.len());
    Ok(())
}

/// Removes every vote this user holds on the poll.
pub fn clear_poll_vote(conn: &mut SqliteConnection, id: Id, user_id: i64) -> Result<(), Error> {
    conn.transaction::<_, Error, _>(|conn| {
        open_poll(conn, id)?;
        delete_user_votes(conn, id, user_id)?;
        Ok(())
    })?;
    debug!("user {user_id} cleared their vote on poll {id}");
    Ok(())
}

// The replace-then-insert pattern that keeps one authoritative vote per
// user. Rejects the whole submission if any chosen option is unknown or
// already at its target.
fn replace_votes(
    conn: &mut SqliteConnection,
    id: Id,
    user_id: i64,
    chosen: &[String],
) -> Result<(), Error> {
    let options = get_poll_options(conn, id)?;
    let unknown = voting::unknown_labels(&options, chosen);
    if !unknown.is_empty() {
        return Err(error::unknown_options(&unknown));
    }
    let votes = get_poll_votes(conn, id)?;
    let blocked = voting::quota_blocked(&options, &votes, user_id, chosen);
    if !blocked.is_empty() {
        return Err(Error::QuotaExceeded(blocked));
    }

    delete_user_votes(conn, id, user_id)?;
    let rows: Vec<PollVoteRow> = chosen
        .iter()
        .map(|label| PollVoteRow {
            poll_id: id.to_string(),
            option_label: label.clone(),
            user_id,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(poll_votes::table)
            .values(&rows)
            .execute(conn)?;
    }
    Ok(())
}

fn delete_user_votes(conn: &mut SqliteConnection, id: Id, user_id: i64) -> Result<usize, Error> {
    let deleted = diesel::delete(
        poll_votes::table
            .filter(poll_votes::poll_id.eq(id.to_string()))
            .filter(poll_votes::user_id.eq(user_id)),
    )
    .execute(conn)?;
    Ok(deleted)
}

/// Applies a creator-submitted edit and decides what happens to the
/// votes already on record. Returns whether any votes were cleared so
/// the caller can warn the user.
pub fn edit_poll(
    conn: &mut SqliteConnection,
    id: Id,
    actor_id: i64,
    update: voting::UpdatePollSettings,
) -> Result<bool, Error> {
    voting::validate_poll_options(&update.options)?;

    let cleared = conn.transaction::<_, Error, _>(|conn| {
        let poll = get_poll(conn, id)?;
        if poll.creator_id != actor_id {
            return Err(Error::NotCreator("poll", id));
        }
        if poll.closed {
            return Err(Error::Closed("poll", id));
        }

        let current = get_poll_options(conn, id)?;
        let current_labels: Vec<String> = current.iter().map(|o| o.label.clone()).collect();
        let proposed_labels: Vec<String> =
            update.options.iter().map(|o| o.label.clone()).collect();

        let cleared = match voting::poll_clearance(
            poll.mode,
            update.mode,
            &current_labels,
            &proposed_labels,
        ) {
            PollClearance::All => diesel::delete(
                poll_votes::table.filter(poll_votes::poll_id.eq(id.to_string())),
            )
            .execute(conn)?,
            PollClearance::RetainLabels(retained) => {
                let retained: Vec<String> = retained.into_iter().collect();
                diesel::delete(
                    poll_votes::table
                        .filter(poll_votes::poll_id.eq(id.to_string()))
                        .filter(poll_votes::option_label.ne_all(retained)),
                )
                .execute(conn)?
            }
            PollClearance::None => 0,
        };

        // Rewrite the option rows whenever the submitted sequence differs
        // at all, so reorders and target-only updates persist even though
        // they do not clear votes.
        let current_pairs: Vec<(String, Option<i32>)> = current
            .iter()
            .map(|o| (o.label.clone(), o.target))
            .collect();
        let proposed_pairs: Vec<(String, Option<i32>)> = update
            .options
            .iter()
            .map(|o| (o.label.clone(), o.target))
            .collect();
        if current_pairs != proposed_pairs {
            diesel::delete(
                poll_options::table.filter(poll_options::poll_id.eq(id.to_string())),
            )
            .execute(conn)?;
            let option_rows: Vec<PollOptionRow> = update
                .options
                .iter()
                .enumerate()
                .map(|(idx, option)| PollOptionRow {
                    poll_id: id.to_string(),
                    idx: idx as i32,
                    label: option.label.clone(),
                    target: option.target,
                })
                .collect();
            diesel::insert_into(poll_options::table)
                .values(&option_rows)
                .execute(conn)?;
        }

        diesel::update(polls::table.filter(polls::id.eq(id.to_string())))
            .set((
                polls::title.eq(&update.title),
                polls::mode.eq(update.mode.as_str()),
                polls::anonymous.eq(update.anonymous),
                polls::show_live.eq(update.show_live),
                polls::mentions.eq(super::models::encode_mentions(&update.mentions)?),
            ))
            .execute(conn)?;

        Ok(cleared)
    })?;

    info!("edited poll {id}, cleared {cleared} vote rows");
    Ok(cleared > 0)
}
