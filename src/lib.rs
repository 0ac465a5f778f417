//! Command/query separation for a game catalog.
//!
//! Requests (`features`) are routed by a `Mediator` that runs registered
//! validators before the single handler for each request type. Handlers
//! talk to a `Store`; a `GamesPresenter` drives the whole thing from UI
//! intents and notifies bound views.

pub mod config;
pub mod features;
mod game;
pub mod mediator;
pub mod presenter;
pub mod store;
pub mod validation;

pub use config::{ConfigError, Settings};
pub use features::{
    in_memory, mediator as game_mediator, CreateOrUpdateGame, DeleteGame, GetAllGames, GetGame,
    State, StateResponse,
};
pub use game::{Game, GameRow};
pub use mediator::{
    Cancellation, CommandRequest, CommandResponse, Context, DispatchError, Mediator, Request,
};
pub use presenter::{GamesPresenter, Property, SubscriptionId, ViewObserver};
pub use store::{InMemoryStore, Row, Store, StoreError, Versioned};
pub use validation::{Cascade, RuleSet, ValidationError, ValidationFailure, Validator};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
#[cfg(feature = "emitter")]
pub use presenter::EmitterObserver;
