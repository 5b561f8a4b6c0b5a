//! Store operations for rankings. Ranking votes key on option index, so
//! unlike polls there is no vote survival across edits: any change to the
//! option sequence or the mode clears the whole vote set.

use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, info};

use crate::error::{self, Error};
use crate::voting::{self, Id, RankMode};

use super::models::{RankOptionRow, RankRow, RankVoteRow};
use super::schema::{rank_options, rank_votes, ranks};

pub fn create_ranking(
    conn: &mut SqliteConnection,
    settings: voting::CreateRankSettings,
) -> Result<voting::Ranking, Error> {
    voting::validate_rank_options(&settings.options, settings.mode)?;

    let id = Id::new();
    let row = RankRow::from_settings(id, &settings, Utc::now().naive_utc())?;
    let option_rows: Vec<RankOptionRow> = settings
        .options
        .iter()
        .enumerate()
        .map(|(idx, label)| RankOptionRow {
            rank_id: id.to_string(),
            idx: idx as i32,
            label: label.clone(),
        })
        .collect();

    conn.transaction::<_, Error, _>(|conn| {
        diesel::insert_into(ranks::table).values(&row).execute(conn)?;
        diesel::insert_into(rank_options::table)
            .values(&option_rows)
            .execute(conn)?;
        Ok(())
    })?;

    info!("created ranking {id} with {} options", option_rows.len());
    row.try_into()
}

pub fn get_ranking(conn: &mut SqliteConnection, id: Id) -> Result<voting::Ranking, Error> {
    let row = ranks::table
        .filter(ranks::id.eq(id.to_string()))
        .select(RankRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(Error::NotFound("ranking", id))?;
    row.try_into()
}

pub fn get_rank_options(
    conn: &mut SqliteConnection,
    id: Id,
) -> Result<Vec<voting::RankOption>, Error> {
    let rows = rank_options::table
        .filter(rank_options::rank_id.eq(id.to_string()))
        .order(rank_options::idx.asc())
        .select(RankOptionRow::as_select())
        .load(conn)?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub fn get_rank_votes(conn: &mut SqliteConnection, id: Id) -> Result<Vec<voting::RankVote>, Error> {
    let rows = rank_votes::table
        .filter(rank_votes::rank_id.eq(id.to_string()))
        .select(RankVoteRow::as_select())
        .load(conn)?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub fn get_user_rank_votes(
    conn: &mut SqliteConnection,
    id: Id,
    user_id: i64,
) -> Result<Vec<voting::RankVote>, Error> {
    let rows = rank_votes::table
        .filter(rank_votes::rank_id.eq(id.to_string()))
        .filter(rank_votes::user_id.eq(user_id))
        .select(RankVoteRow::as_select())
        .load(conn)?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub fn set_rank_message(
    conn: &mut SqliteConnection,
    id: Id,
    message_id: i64,
) -> Result<(), Error> {
    let updated = diesel::update(ranks::table.filter(ranks::id.eq(id.to_string())))
        .set(ranks::message_id.eq(Some(message_id)))
        .execute(conn)?;
    if updated == 0 {
        return Err(Error::NotFound("ranking", id));
    }
    Ok(())
}

/// Closes the ranking for good. Only the creator may close.
pub fn close_ranking(conn: &mut SqliteConnection, id: Id, actor_id: i64) -> Result<(), Error> {
    conn.transaction::<_, Error, _>(|conn| {
        let ranking = get_ranking(conn, id)?;
        if ranking.creator_id != actor_id {
            return Err(Error::NotCreator("ranking", id));
        }
        if ranking.closed {
            return Err(Error::Closed("ranking", id));
        }
        diesel::update(ranks::table.filter(ranks::id.eq(id.to_string())))
            .set(ranks::closed.eq(true))
            .execute(conn)?;
        Ok(())
    })?;
    info!("closed ranking {id}");
    Ok(())
}

fn open_ranking(conn: &mut SqliteConnection, id: Id) -> Result<voting::Ranking, Error> {
    let ranking = get_ranking(conn, id)?;
    if ranking.closed {
        return Err(Error::Closed("ranking", id));
    }
    Ok(ranking)
}

/// Records star ratings for the options the user chose to rate. Each
/// rated option replaces that user's prior rating for it; options the
/// user left unrated keep whatever rating they had from earlier
/// submissions.
pub fn record_star_votes(
    conn: &mut SqliteConnection,
    id: Id,
    user_id: i64,
    ratings: &[(i32, i32)],
) -> Result<(), Error> {
    // last rating wins if the submission mentions an option twice
    let mut deduped: Vec<(i32, i32)> = vec![];
    for &(idx, value) in ratings {
        deduped.retain(|&(seen, _)| seen != idx);
        deduped.push((idx, value));
    }

    conn.transaction::<_, Error, _>(|conn| {
        let ranking = open_ranking(conn, id)?;
        if ranking.mode != RankMode::Star {
            return Err(error::wrong_mode("ranking", "star"));
        }
        let options = get_rank_options(conn, id)?;
        for &(idx, value) in &deduped {
            if !options.iter().any(|o| o.idx == idx) {
                return Err(error::option_index_out_of_range(idx, options.len()));
            }
            if !(1..=5).contains(&value) {
                return Err(error::invalid_star_value(value));
            }
        }

        for &(idx, value) in &deduped {
            diesel::delete(
                rank_votes::table
                    .filter(rank_votes::rank_id.eq(id.to_string()))
                    .filter(rank_votes::option_idx.eq(idx))
                    .filter(rank_votes::user_id.eq(user_id)),
            )
            .execute(conn)?;
            diesel::insert_into(rank_votes::table)
                .values(&RankVoteRow {
                    rank_id: id.to_string(),
                    option_idx: idx,
                    user_id,
                    value,
                })
                .execute(conn)?;
        }
        Ok(())
    })?;
    debug!("user {user_id} rated {} options on ranking {id}", deduped.len());
    Ok(())
}

/// Records a complete ordering, replacing the user's prior ordering.
/// `assignments` pairs every option index with a position; together they
/// must form exactly the permutation 1..=N, which is what the selection
/// protocol produces.
pub fn record_order_vote(
    conn: &mut SqliteConnection,
    id: Id,
    user_id: i64,
    assignments: &[(i32, i32)],
) -> Result<(), Error> {
    conn.transaction::<_, Error, _>(|conn| {
        let ranking = open_ranking(conn, id)?;
        if ranking.mode != RankMode::Order {
            return Err(error::wrong_mode("ranking", "order"));
        }
        let options = get_rank_options(conn, id)?;
        let count = options.len();

        let mut indices: Vec<i32> = assignments.iter().map(|&(idx, _)| idx).collect();
        let mut positions: Vec<i32> = assignments.iter().map(|&(_, pos)| pos).collect();
        indices.sort_unstable();
        positions.sort_unstable();
        let expected_indices: Vec<i32> = (0..count as i32).collect();
        let expected_positions: Vec<i32> = (1..=count as i32).collect();
        if indices != expected_indices || positions != expected_positions {
            return Err(error::not_a_permutation(count));
        }

        diesel::delete(
            rank_votes::table
                .filter(rank_votes::rank_id.eq(id.to_string()))
                .filter(rank_votes::user_id.eq(user_id)),
        )
        .execute(conn)?;
        let rows: Vec<RankVoteRow> = assignments
            .iter()
            .map(|&(idx, value)| RankVoteRow {
                rank_id: id.to_string(),
                option_idx: idx,
                user_id,
                value,
            })
            .collect();
        diesel::insert_into(rank_votes::table)
            .values(&rows)
            .execute(conn)?;
        Ok(())
    })?;
    debug!("user {user_id} submitted an ordering on ranking {id}");
    Ok(())
}

/// Applies a creator-submitted edit. Any change to the mode or to the
/// option sequence clears every vote; returns whether that happened.
pub fn edit_ranking(
    conn: &mut SqliteConnection,
    id: Id,
    actor_id: i64,
    update: voting::UpdateRankSettings,
) -> Result<bool, Error> {
    voting::validate_rank_options(&update.options, update.mode)?;

    let cleared = conn.transaction::<_, Error, _>(|conn| {
        let ranking = get_ranking(conn, id)?;
        if ranking.creator_id != actor_id {
            return Err(Error::NotCreator("ranking", id));
        }
        if ranking.closed {
            return Err(Error::Closed("ranking", id));
        }

        let current = get_rank_options(conn, id)?;
        let current_labels: Vec<String> = current.iter().map(|o| o.label.clone()).collect();

        let mut cleared = 0;
        if voting::rank_votes_invalidated(
            ranking.mode,
            update.mode,
            &current_labels,
            &update.options,
        ) {
            cleared = diesel::delete(
                rank_votes::table.filter(rank_votes::rank_id.eq(id.to_string())),
            )
            .execute(conn)?;
        }

        if voting::rank_options_changed(&current_labels, &update.options) {
            diesel::delete(rank_options::table.filter(rank_options::rank_id.eq(id.to_string())))
                .execute(conn)?;
            let option_rows: Vec<RankOptionRow> = update
                .options
                .iter()
                .enumerate()
                .map(|(idx, label)| RankOptionRow {
                    rank_id: id.to_string(),
                    idx: idx as i32,
                    label: label.clone(),
                })
                .collect();
            diesel::insert_into(rank_options::table)
                .values(&option_rows)
                .execute(conn)?;
        }

        diesel::update(ranks::table.filter(ranks::id.eq(id.to_string())))
            .set((
                ranks::title.eq(&update.title),
                ranks::mode.eq(update.mode.as_str()),
                ranks::anonymous.eq(update.anonymous),
                ranks::show_live.eq(update.show_live),
                ranks::mentions.eq(super::models::encode_mentions(&update.mentions)?),
            ))
            .execute(conn)?;

        Ok(cleared)
    })?;

    info!("edited ranking {id}, cleared {cleared} vote rows");
    Ok(cleared > 0)
}
