//! Request: game.get

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{Game, GameRow};
use crate::mediator::{Context, DispatchError, Request};
use crate::store::Store;
use crate::validation::RuleSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetGame {
    pub id: Uuid,
}

impl Request for GetGame {
    const NAME: &'static str = "game.get";
    type Response = Option<Game>;
}

pub fn handle<S: Store>(request: GetGame, ctx: &Context<'_, S>) -> Result<Option<Game>, DispatchError> {
    ctx.ensure_active()?;
    let row = ctx.store().get::<GameRow>(request.id)?;
    Ok(row.map(Game::from))
}

pub fn validator() -> RuleSet<GetGame> {
    RuleSet::new().rule("game.id", |r: &GetGame| !r.id.is_nil(), "Id is required")
}
