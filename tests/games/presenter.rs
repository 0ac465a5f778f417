//! Presenter driven the way a bound view would drive it.

use std::sync::{Arc, Mutex};

use games_cqrs::presenter::DELETE_FIELD;
use games_cqrs::{game_mediator, in_memory, DispatchError, Game, GamesPresenter, Property};

use crate::support::{game, game_a, ReadOnlyStore};

#[test]
fn edit_submit_refresh_delete() {
    let mut presenter = GamesPresenter::new(Arc::new(in_memory()));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    presenter.subscribe(move |p: Property| sink.lock().unwrap().push(p));

    presenter.edit_game(game_a());
    let a = presenter.submit().unwrap().unwrap();
    presenter.edit_game(game("Game B", "Switch", "Platformer"));
    presenter.submit().unwrap();
    assert!(presenter.refresh().unwrap());
    assert_eq!(presenter.games().len(), 2);

    // Edit an existing game and save it back under the same id.
    presenter.edit_game(Game {
        genre: "Action RPG".into(),
        ..a.clone()
    });
    let updated = presenter.submit().unwrap().unwrap();
    assert_eq!(updated.id, a.id);
    presenter.refresh().unwrap();
    assert_eq!(presenter.games().len(), 2);

    assert!(presenter.delete_game(updated).unwrap().unwrap().is_ok());
    presenter.refresh().unwrap();
    assert_eq!(presenter.games().len(), 1);
    assert_eq!(presenter.games()[0].title, "Game B");

    let seen = seen.lock().unwrap();
    assert!(seen.contains(&Property::Current));
    assert!(seen.contains(&Property::Games));
    assert!(!seen.contains(&Property::Errors));
}

#[test]
fn validation_failures_render_per_field() {
    let mut presenter = GamesPresenter::new(Arc::new(in_memory()));
    presenter.edit_game(Game::default());

    assert_eq!(presenter.submit().unwrap(), None);
    assert_eq!(presenter.errors_display("title"), "Title is required\n");
    assert_eq!(presenter.errors_display("platform"), "Platform is required\n");
    assert_eq!(presenter.errors_display("genre"), "Genre is required\n");
    assert_eq!(
        presenter.errors_display("release_date"),
        "Release Date cannot be default\n"
    );
    assert_eq!(presenter.errors_display("unknown"), "");
}

#[test]
fn storage_error_keeps_the_form() {
    let mut presenter = GamesPresenter::new(Arc::new(game_mediator(ReadOnlyStore::default())));
    presenter.edit_game(game_a());

    let err = presenter.submit().unwrap_err();
    assert!(matches!(err, DispatchError::Storage(_)));
    assert_eq!(presenter.current().title, "Game A");
}

#[test]
fn delete_failure_is_shown() {
    let mut presenter = GamesPresenter::new(Arc::new(game_mediator(ReadOnlyStore::default())));
    let status = presenter
        .delete_game(game_a().with_id(uuid::Uuid::new_v4()))
        .unwrap()
        .unwrap();
    assert!(!status.is_ok());
    assert!(presenter.has_errors());
    assert!(!presenter.errors_display(DELETE_FIELD).is_empty());
}

#[test]
fn cancelled_calls_leave_the_view_alone() {
    let mut presenter = GamesPresenter::new(Arc::new(in_memory()));
    presenter.edit_game(game_a());
    let a = presenter.submit().unwrap().unwrap();
    presenter.refresh().unwrap();

    presenter.cancellation().cancel();
    assert!(!presenter.refresh().unwrap());
    presenter.cancellation().cancel();
    assert_eq!(presenter.delete_game(a.clone()).unwrap(), None);
    assert_eq!(presenter.games().len(), 1);
    assert!(!presenter.has_errors());

    assert!(presenter.delete_game(a).unwrap().unwrap().is_ok());
    assert!(presenter.refresh().unwrap());
    assert!(presenter.games().is_empty());
}

#[test]
fn stale_edit_keeps_the_form() {
    let mediator = Arc::new(in_memory());
    let mut first = GamesPresenter::new(mediator.clone());
    let mut second = GamesPresenter::new(mediator);

    first.edit_game(game_a());
    first.submit().unwrap();
    first.refresh().unwrap();
    second.refresh().unwrap();

    first.edit_game(Game {
        title: "Game A2".into(),
        ..first.games()[0].clone()
    });
    first.submit().unwrap();

    second.edit_game(Game {
        genre: "Action".into(),
        ..second.games()[0].clone()
    });
    let err = second.submit().unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert_eq!(second.current().genre, "Action");
}
