//! Request: game.save
//!
//! Inserts a new game (nil id) or replaces the stored one. A replace only
//! lands if the stored version is still the one the game was read at; a
//! stale edit fails with `StoreError::ConcurrentWrite`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::{Game, GameRow};
use crate::mediator::{Context, DispatchError, Request};
use crate::store::{Store, StoreError};
use crate::validation::{not_blank, Cascade, RuleSet, ValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrUpdateGame {
    /// `None` when the caller sent no game at all.
    #[serde(default)]
    pub game: Option<Game>,
}

impl CreateOrUpdateGame {
    pub fn new(game: Game) -> Self {
        Self { game: Some(game) }
    }
}

impl Request for CreateOrUpdateGame {
    const NAME: &'static str = "game.save";
    type Response = Game;
}

pub fn handle<S: Store>(
    request: CreateOrUpdateGame,
    ctx: &Context<'_, S>,
) -> Result<Game, DispatchError> {
    let game = request
        .game
        .ok_or_else(|| ValidationError::single("game", "Game is null"))?;
    ctx.ensure_active()?;

    let expected = game.version;
    let row = GameRow::from(game);
    let saved = if row.id.is_nil() {
        ctx.store().insert(row)?
    } else {
        match ctx.store().update(row.clone(), expected) {
            Err(StoreError::Missing { .. }) => ctx.store().upsert(row)?,
            result => result?,
        }
    };

    debug!(id = %saved.data.id, version = saved.version, "game saved");
    Ok(Game::from(saved))
}

/// Title, genre, platform and release date are all required. A missing game
/// stops evaluation after its own failure.
pub fn validator() -> RuleSet<CreateOrUpdateGame> {
    RuleSet::new()
        .rule_with(
            "game",
            Cascade::Stop,
            |r: &CreateOrUpdateGame| r.game.is_some(),
            "Game is null",
        )
        .rule(
            "game.title",
            |r: &CreateOrUpdateGame| field_set(r, |g| not_blank(&g.title)),
            "Title is required",
        )
        .rule(
            "game.genre",
            |r: &CreateOrUpdateGame| field_set(r, |g| not_blank(&g.genre)),
            "Genre is required",
        )
        .rule(
            "game.platform",
            |r: &CreateOrUpdateGame| field_set(r, |g| not_blank(&g.platform)),
            "Platform is required",
        )
        .rule(
            "game.release_date",
            |r: &CreateOrUpdateGame| field_set(r, |g| g.release_date > first_day()),
            "Release Date cannot be default",
        )
}

/// Dates on or before 0001-01-01 count as unset.
fn first_day() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1, 1, 1)
}

fn field_set(request: &CreateOrUpdateGame, check: impl Fn(&Game) -> bool) -> bool {
    request.game.as_ref().is_some_and(check)
}
