//! Request: game.delete
//!
//! Removes a stored game. Store failures come back as a `Ko` status rather
//! than an error; only cancellation is propagated.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::response::StateResponse;
use crate::game::{Game, GameRow};
use crate::mediator::{Context, DispatchError, Request};
use crate::store::Store;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteGame {
    pub game: Game,
}

impl DeleteGame {
    pub fn new(game: Game) -> Self {
        Self { game }
    }
}

impl Request for DeleteGame {
    const NAME: &'static str = "game.delete";
    type Response = StateResponse;
}

pub fn handle<S: Store>(
    request: DeleteGame,
    ctx: &Context<'_, S>,
) -> Result<StateResponse, DispatchError> {
    ctx.ensure_active()?;

    let id = request.game.id;
    match ctx.store().remove::<GameRow>(id) {
        Ok(_) => {
            debug!(%id, "game deleted");
            Ok(StateResponse::ok())
        }
        Err(e) => {
            warn!(%id, error = %e, "game delete failed");
            Ok(StateResponse::ko(e.to_string()))
        }
    }
}
