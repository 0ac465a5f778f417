//! Request: game.list

use serde::{Deserialize, Serialize};

use crate::game::{Game, GameRow};
use crate::mediator::{Context, DispatchError, Request};
use crate::store::Store;

/// List every stored game, in no particular order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetAllGames {}

impl Request for GetAllGames {
    const NAME: &'static str = "game.list";
    type Response = Vec<Game>;
}

pub fn handle<S: Store>(
    _request: GetAllGames,
    ctx: &Context<'_, S>,
) -> Result<Vec<Game>, DispatchError> {
    ctx.ensure_active()?;
    let rows = ctx.store().list::<GameRow>()?;
    Ok(rows.into_iter().map(|v| Game::from(v)).collect())
}
