//! Game requests and their registration.
//!
//! Each request module follows the same layout: the request type, its
//! `Request` impl, a `handle` function and, where the request has input
//! rules, a `validator()`.

pub mod create_or_update_game;
pub mod delete_game;
pub mod get_all_games;
pub mod get_game;
mod response;

pub use create_or_update_game::CreateOrUpdateGame;
pub use delete_game::DeleteGame;
pub use get_all_games::GetAllGames;
pub use get_game::GetGame;
pub use response::{State, StateResponse};

use crate::mediator::Mediator;
use crate::store::{InMemoryStore, Store};

/// Register every game handler and validator on `mediator`.
pub fn register<S: Store + 'static>(mediator: Mediator<S>) -> Mediator<S> {
    mediator
        .handler(create_or_update_game::handle::<S>)
        .validator::<CreateOrUpdateGame, _>(create_or_update_game::validator())
        .handler(delete_game::handle::<S>)
        .handler(get_all_games::handle::<S>)
        .handler(get_game::handle::<S>)
        .validator::<GetGame, _>(get_game::validator())
}

/// A mediator over `store` with every game request registered.
pub fn mediator<S: Store + 'static>(store: S) -> Mediator<S> {
    register(Mediator::new(store))
}

/// A mediator over a fresh in-memory store.
pub fn in_memory() -> Mediator<InMemoryStore> {
    mediator(InMemoryStore::new())
}
