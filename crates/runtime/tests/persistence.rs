mod common;

use std::sync::Arc;

use bundle_core::{
    BundleColor, BundleDefinition, CompletionState, IngredientDefinition, StoreError,
};
use bundle_runtime::{BundleBoard, EventBus, FileBundleStore, RuntimeError};

use common::*;

fn open_store(path: &std::path::Path) -> Arc<FileBundleStore> {
    Arc::new(FileBundleStore::open(path).unwrap())
}

#[test]
fn donations_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundles.bin");
    let bus = EventBus::new();

    {
        let board = board_on_store(
            vec![spring_crops()],
            engine_config(vec![]),
            &bus,
            open_store(&path),
        );
        let mut alice = board.session("alice");
        alice.open(&spring_crops_id(), true).unwrap();
        alice.deposit(&spring_crops_id(), parsnip()).unwrap();
        alice.deposit(&spring_crops_id(), potato()).unwrap();
    }

    let board = board_on_store(
        vec![spring_crops()],
        engine_config(vec![]),
        &bus,
        open_store(&path),
    );
    let mut bob = board.session("bob");
    let view = bob.open(&spring_crops_id(), true).unwrap();
    assert_eq!(view.completed_count(), 2);
    assert_eq!(view.open_slot_count(), 2);

    let result = bob.deposit(&spring_crops_id(), parsnip()).unwrap();
    assert!(!result.is_accepted());
    assert_eq!(result.leftover, Some(parsnip()));
}

#[test]
fn loaded_complete_bundle_never_celebrates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundles.bin");
    let bus = EventBus::new();

    {
        let board = board_on_store(
            vec![spring_crops()],
            engine_config(vec![]),
            &bus,
            open_store(&path),
        );
        let mut alice = board.session("alice");
        alice.open(&spring_crops_id(), true).unwrap();
        for item in [parsnip(), green_bean(), cauliflower(), potato()] {
            alice.deposit(&spring_crops_id(), item).unwrap();
        }
        assert!(board.claim_reward(&spring_crops_id()).is_ok());
    }

    let board = board_on_store(
        vec![spring_crops()],
        engine_config(vec![]),
        &bus,
        open_store(&path),
    );
    let mut alice = board.session("alice");
    let view = alice.open(&spring_crops_id(), true).unwrap();
    assert_eq!(view.completion_state(), CompletionState::Complete);
    assert!(alice.advance(10_000).is_empty());
    assert!(matches!(
        board.claim_reward(&spring_crops_id()),
        Err(RuntimeError::RewardAlreadyClaimed(_))
    ));
}

#[test]
fn changed_layout_is_rejected_on_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundles.bin");

    BundleBoard::builder()
        .definitions([spring_crops()])
        .store(open_store(&path))
        .build()
        .unwrap();

    let shrunk = BundleDefinition::new(
        spring_crops_id(),
        "Spring Crops",
        BundleColor::Green,
        None,
        vec![IngredientDefinition::item("(O)24", 1)],
        None,
    )
    .unwrap();

    let result = BundleBoard::builder()
        .definitions([shrunk])
        .store(open_store(&path))
        .build();

    assert!(matches!(
        result,
        Err(RuntimeError::Store(StoreError::LayoutMismatch {
            expected: 1,
            found: 4,
            ..
        }))
    ));
}
