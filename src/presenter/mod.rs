//! Presenter - UI-facing state for editing and listing games.
//!
//! The host delivers user intents (edit, submit, delete, refresh) as calls
//! on `GamesPresenter`; the presenter turns them into requests, updates its
//! bindable state and notifies subscribed `ViewObserver`s.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use games_cqrs::presenter::{GamesPresenter, Property};
//!
//! let mut presenter = GamesPresenter::new(Arc::new(games_cqrs::in_memory()));
//! presenter.subscribe(|p: Property| println!("{p} changed"));
//!
//! presenter.edit_game(game);
//! presenter.submit()?;
//! presenter.refresh()?;
//! print!("{}", presenter.errors_display("title"));
//! ```

mod observer;
#[allow(clippy::module_inception)]
mod presenter;

pub use observer::{Property, SubscriptionId, ViewObserver};
#[cfg(feature = "emitter")]
pub use observer::{EmitterObserver, PROPERTY_CHANGED};
pub use presenter::{GamesPresenter, DELETE_FIELD};
