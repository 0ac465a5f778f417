//! mediator: in-process request routing with a validation pipeline.
//!
//! Register one handler per request type and any number of validators on a
//! `Mediator`. Each handler receives a `Context<S>` with access to the store
//! and the caller's cancellation token.
//!
//! ## Quick Start
//!
//! ```ignore
//! use games_cqrs::mediator::{Mediator, Request};
//! use games_cqrs::InMemoryStore;
//!
//! let mediator = Mediator::new(InMemoryStore::new())
//!     .handler(|req: CreateOrUpdateGame, ctx| {
//!         ctx.ensure_active()?;
//!         Ok(ctx.store().upsert(GameRow::from(req.game.unwrap_or_default()))?.data.into())
//!     })
//!     .validator::<CreateOrUpdateGame, _>(create_or_update_game::validator());
//!
//! // Typed dispatch
//! let saved = mediator.send(CreateOrUpdateGame::new(game))?;
//!
//! // Name-based JSON dispatch
//! let saved = mediator.dispatch("game.save", json!({ "game": { ... } }))?;
//! ```
//!
//! ## Handler Convention
//!
//! Each request lives in its own module exporting the request type, its
//! `Request` impl, a `handle` function and (optionally) a `validator()`.

mod context;
mod error;
#[allow(clippy::module_inception)]
mod mediator;
mod request;

pub use context::{Cancellation, Context};
pub use error::DispatchError;
pub use mediator::Mediator;
pub use request::{CommandRequest, CommandResponse, Request};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};
