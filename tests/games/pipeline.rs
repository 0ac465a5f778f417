//! Dispatch through the registered game requests.

use games_cqrs::{
    game_mediator, in_memory, Cancellation, CreateOrUpdateGame, DeleteGame, DispatchError, Game,
    GameRow, GetAllGames, GetGame, State, Store, StoreError,
};
use serde_json::json;
use uuid::Uuid;

use crate::support::{game, game_a, ReadOnlyStore};

#[test]
fn missing_fields_are_named() {
    let mediator = in_memory();
    let cases = [
        (game("", "PC", "RPG"), "title"),
        (game("Game A", "", "RPG"), "platform"),
        (game("Game A", "PC", ""), "genre"),
        (
            Game {
                release_date: None,
                ..game_a()
            },
            "release_date",
        ),
    ];

    for (game, field) in cases {
        match mediator.send(CreateOrUpdateGame::new(game)) {
            Err(DispatchError::Validation(err)) => {
                assert!(
                    err.failures().iter().any(|f| f.field() == field),
                    "no failure for {field}: {err}"
                );
            }
            other => panic!("expected validation error for {field}, got {other:?}"),
        }
    }
    assert!(mediator.send(GetAllGames::default()).unwrap().is_empty());
}

#[test]
fn empty_title_yields_one_failure() {
    let err = in_memory()
        .send(CreateOrUpdateGame::new(game("", "PC", "RPG")))
        .unwrap_err();
    match err {
        DispatchError::Validation(v) => {
            assert_eq!(v.failures().len(), 1);
            assert_eq!(v.failures()[0].field(), "title");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn create_assigns_fresh_id() {
    let mediator = in_memory();
    let saved = mediator.send(CreateOrUpdateGame::new(game_a())).unwrap();
    assert!(!saved.id.is_nil());
    assert_eq!(saved.title, "Game A");

    let other = mediator.send(CreateOrUpdateGame::new(game_a())).unwrap();
    assert_ne!(saved.id, other.id);
}

#[test]
fn update_replaces_without_duplicating() {
    let mediator = in_memory();
    let saved = mediator.send(CreateOrUpdateGame::new(game_a())).unwrap();

    let renamed = Game {
        title: "Game A2".into(),
        ..saved.clone()
    };
    let updated = mediator.send(CreateOrUpdateGame::new(renamed)).unwrap();
    assert_eq!(updated.id, saved.id);

    let all = mediator.send(GetAllGames::default()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Game A2");

    let row = mediator.store().get::<GameRow>(saved.id).unwrap().unwrap();
    assert_eq!(row.version, 2);
}

#[test]
fn stale_edit_is_rejected() {
    let mediator = in_memory();
    let saved = mediator.send(CreateOrUpdateGame::new(game_a())).unwrap();

    let first = Game {
        title: "Game A2".into(),
        ..saved.clone()
    };
    let first = mediator.send(CreateOrUpdateGame::new(first)).unwrap();
    assert_eq!(first.version, 2);

    let second = Game {
        genre: "Action".into(),
        ..saved.clone()
    };
    let err = mediator.send(CreateOrUpdateGame::new(second)).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Storage(StoreError::ConcurrentWrite {
            expected: 1,
            actual: 2,
            ..
        })
    ));
    assert_eq!(err.status_code(), 409);

    let stored = mediator.send(GetAllGames::default()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Game A2");
    assert_eq!(stored[0].genre, "RPG");
}

#[test]
fn edit_from_fresh_read_succeeds() {
    let mediator = in_memory();
    let saved = mediator.send(CreateOrUpdateGame::new(game_a())).unwrap();
    mediator
        .send(CreateOrUpdateGame::new(Game {
            title: "Game A2".into(),
            ..saved.clone()
        }))
        .unwrap();

    let fresh = mediator.send(GetGame { id: saved.id }).unwrap().unwrap();
    assert_eq!(fresh.version, 2);
    let updated = mediator
        .send(CreateOrUpdateGame::new(Game {
            genre: "Action".into(),
            ..fresh
        }))
        .unwrap();
    assert_eq!(updated.version, 3);
    assert_eq!(updated.title, "Game A2");
}

#[test]
fn update_of_unknown_id_is_an_upsert() {
    let mediator = in_memory();
    let id = Uuid::new_v4();
    let saved = mediator
        .send(CreateOrUpdateGame::new(game_a().with_id(id)))
        .unwrap();
    assert_eq!(saved.id, id);
    assert_eq!(mediator.send(GetAllGames::default()).unwrap().len(), 1);
}

#[test]
fn delete_missing_returns_ko() {
    let status = in_memory()
        .send(DeleteGame::new(game_a().with_id(Uuid::new_v4())))
        .unwrap();
    assert_eq!(status.state, State::Ko);
    assert!(status.message.is_some());
}

#[test]
fn list_after_two_creates_and_one_delete() {
    let mediator = in_memory();
    let a = mediator.send(CreateOrUpdateGame::new(game_a())).unwrap();
    let b = mediator
        .send(CreateOrUpdateGame::new(game("Game B", "Switch", "Platformer")))
        .unwrap();

    assert!(mediator.send(DeleteGame::new(a)).unwrap().is_ok());

    let all = mediator.send(GetAllGames::default()).unwrap();
    assert_eq!(all, vec![b]);
}

#[test]
fn storage_failure_propagates_from_save() {
    let mediator = game_mediator(ReadOnlyStore::default());
    let err = mediator.send(CreateOrUpdateGame::new(game_a())).unwrap_err();
    assert!(matches!(err, DispatchError::Storage(StoreError::Conflict { .. })));
    assert_eq!(err.status_code(), 409);
}

#[test]
fn storage_failure_becomes_status_on_delete() {
    let mediator = game_mediator(ReadOnlyStore::default());
    let status = mediator
        .send(DeleteGame::new(game_a().with_id(Uuid::new_v4())))
        .unwrap();
    assert_eq!(status.state, State::Ko);
}

#[test]
fn cancelled_save_does_not_write() {
    let mediator = in_memory();
    let token = Cancellation::new();
    token.cancel();

    let err = mediator
        .send_with(CreateOrUpdateGame::new(game_a()), &token)
        .unwrap_err();
    assert!(matches!(err, DispatchError::Cancelled));
    assert!(mediator.send(GetAllGames::default()).unwrap().is_empty());
}

#[test]
fn json_dispatch_round_trip() {
    let mediator = in_memory();
    let saved = mediator
        .dispatch(
            "game.save",
            json!({ "game": {
                "title": "Game A",
                "platform": "PC",
                "genre": "RPG",
                "release_date": "2020-01-01"
            }}),
        )
        .unwrap();
    let id = saved["id"].as_str().unwrap().to_string();
    assert_ne!(id, Uuid::nil().to_string());

    let loaded = mediator.dispatch("game.get", json!({ "id": id })).unwrap();
    assert_eq!(loaded["title"], "Game A");
    assert_eq!(loaded["release_date"], "2020-01-01");

    let listed = mediator.dispatch("game.list", json!({})).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[test]
fn json_default_date_is_rejected() {
    let err = in_memory()
        .dispatch(
            "game.save",
            json!({ "game": {
                "title": "Game A",
                "platform": "PC",
                "genre": "RPG",
                "release_date": "0001-01-01"
            }}),
        )
        .unwrap_err();
    assert_eq!(err.status_code(), 422);
    match err {
        DispatchError::Validation(v) => {
            assert_eq!(v.failures()[0].message, "Release Date cannot be default")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn json_dispatch_without_game_short_circuits() {
    let err = in_memory().dispatch("game.save", json!({})).unwrap_err();
    match err {
        DispatchError::Validation(v) => {
            assert_eq!(v.failures().len(), 1);
            assert_eq!(v.failures()[0].message, "Game is null");
        }
        other => panic!("unexpected error: {other}"),
    }
}
