//! Game records.
//!
//! `Game` is the DTO that travels through commands, the presenter and the
//! HTTP transport. `GameRow` is the persisted shape kept in the store. The
//! two carry the same fields; handlers map between them at the store
//! boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Row, Versioned};

/// A game as seen by callers.
///
/// A nil `id` marks a game that has not been stored yet. A `None` release
/// date is the unset (default) date. `version` is the store version the
/// game was read at; 0 means it was never read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub platform: String,
    pub genre: String,
    pub release_date: Option<NaiveDate>,
    pub version: u64,
}

impl Game {
    /// Create an unsaved game.
    pub fn new(
        title: impl Into<String>,
        platform: impl Into<String>,
        genre: impl Into<String>,
        release_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            title: title.into(),
            platform: platform.into(),
            genre: genre.into(),
            release_date: Some(release_date),
            version: 0,
        }
    }

    /// Return the same game carrying `id`.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// True when the game has never been stored.
    pub fn is_new(&self) -> bool {
        self.id.is_nil()
    }
}

/// Stored representation of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRow {
    pub id: Uuid,
    pub title: String,
    pub platform: String,
    pub genre: String,
    pub release_date: Option<NaiveDate>,
}

impl Row for GameRow {
    const TABLE: &'static str = "games";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl From<Game> for GameRow {
    fn from(game: Game) -> Self {
        Self {
            id: game.id,
            title: game.title,
            platform: game.platform,
            genre: game.genre,
            release_date: game.release_date,
        }
    }
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            platform: row.platform,
            genre: row.genre,
            release_date: row.release_date,
            version: 0,
        }
    }
}

impl From<Versioned<GameRow>> for Game {
    fn from(versioned: Versioned<GameRow>) -> Self {
        Self {
            version: versioned.version,
            ..Game::from(versioned.data)
        }
    }
}
