use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::observer::{Property, SubscriptionId, ViewObserver};
use crate::features::{CreateOrUpdateGame, DeleteGame, GetAllGames, StateResponse};
use crate::game::Game;
use crate::mediator::{Cancellation, DispatchError, Mediator};
use crate::store::Store;
use crate::validation::ValidationFailure;

/// Field under which delete failures are recorded.
pub const DELETE_FIELD: &str = "delete";

/// Presenter for a games list with an edit form.
///
/// Holds the game being edited, the last listed games and the validation
/// failures of the last submit, keyed by field name. Every change is
/// reported to subscribed observers.
pub struct GamesPresenter<S> {
    mediator: Arc<Mediator<S>>,
    current: Game,
    games: Vec<Game>,
    errors: BTreeMap<String, Vec<ValidationFailure>>,
    observers: Vec<(SubscriptionId, Box<dyn ViewObserver>)>,
    next_subscription: u64,
    cancellation: Cancellation,
}

impl<S: Store + 'static> GamesPresenter<S> {
    pub fn new(mediator: Arc<Mediator<S>>) -> Self {
        Self {
            mediator,
            current: Game::default(),
            games: Vec::new(),
            errors: BTreeMap::new(),
            observers: Vec::new(),
            next_subscription: 1,
            cancellation: Cancellation::new(),
        }
    }

    pub fn current(&self) -> &Game {
        &self.current
    }

    /// Mutable access for form bindings. Does not notify.
    pub fn current_mut(&mut self) -> &mut Game {
        &mut self.current
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Token that cancels the presenter's in-flight request.
    pub fn cancellation(&self) -> Cancellation {
        self.cancellation.clone()
    }

    pub fn subscribe(&mut self, observer: impl ViewObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Start editing `game`.
    pub fn edit_game(&mut self, game: Game) {
        self.current = game;
        self.notify(Property::Current);
    }

    /// Save the current game.
    ///
    /// Validation failures are recorded per field and cancellation is
    /// dropped; both yield `Ok(None)`. Either way, and on success, the
    /// current game is reset. Any other failure is returned and leaves the
    /// current game in place.
    pub fn submit(&mut self) -> Result<Option<Game>, DispatchError> {
        if !self.errors.is_empty() {
            self.errors.clear();
            self.notify(Property::Errors);
        }

        let request = CreateOrUpdateGame::new(self.current.clone());
        let saved = match self.mediator.send_with(request, &self.cancellation) {
            Ok(game) => Some(game),
            Err(DispatchError::Validation(err)) => {
                self.add_errors(err.into_failures());
                self.notify(Property::Errors);
                None
            }
            Err(DispatchError::Cancelled) => {
                debug!("submit cancelled");
                self.cancellation = Cancellation::new();
                None
            }
            Err(e) => return Err(e),
        };

        self.current = Game::default();
        self.notify(Property::Current);
        Ok(saved)
    }

    /// Delete `game`.
    ///
    /// On success the game is dropped from the listed games. A `Ko` status
    /// is recorded under the `delete` field so the view can show it. A
    /// cancelled delete is dropped and yields `Ok(None)`.
    pub fn delete_game(&mut self, game: Game) -> Result<Option<StateResponse>, DispatchError> {
        let id = game.id;
        let status = match self.mediator.send_with(DeleteGame::new(game), &self.cancellation) {
            Ok(status) => status,
            Err(DispatchError::Cancelled) => {
                debug!(%id, "delete cancelled");
                self.cancellation = Cancellation::new();
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if status.is_ok() {
            self.games.retain(|g| g.id != id);
            self.notify(Property::Games);
        } else {
            let message = status.message.clone().unwrap_or_default();
            warn!(%id, %message, "delete failed");
            self.add_errors(vec![ValidationFailure::new(DELETE_FIELD, message)]);
            self.notify(Property::Errors);
        }
        Ok(Some(status))
    }

    /// Replace the listed games with the store's current contents.
    ///
    /// Returns false when the refresh was cancelled and the list kept.
    pub fn refresh(&mut self) -> Result<bool, DispatchError> {
        match self.mediator.send_with(GetAllGames::default(), &self.cancellation) {
            Ok(games) => {
                self.games = games;
                self.notify(Property::Games);
                Ok(true)
            }
            Err(DispatchError::Cancelled) => {
                debug!("refresh cancelled");
                self.cancellation = Cancellation::new();
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Failures recorded for `field`, e.g. `title`.
    pub fn errors(&self, field: &str) -> &[ValidationFailure] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every message for `field`, each followed by a newline.
    pub fn errors_display(&self, field: &str) -> String {
        self.errors(field)
            .iter()
            .map(|f| format!("{}\n", f.message))
            .collect()
    }

    fn add_errors(&mut self, failures: Vec<ValidationFailure>) {
        for failure in failures {
            self.errors
                .entry(failure.field().to_string())
                .or_default()
                .push(failure);
        }
    }

    fn notify(&self, property: Property) {
        for (_, observer) in &self.observers {
            observer.property_changed(property);
        }
    }
}
