//! Fixtures shared by the runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use bundle_core::{
    BundleColor, BundleDefinition, BundleId, EngineConfig, IngredientDefinition, Item,
    ItemCategory, ItemDefinition, RewardDescriptor,
};
use bundle_runtime::{
    BundleBoard, BundleRepository, EventBus, EventBusSink, InMemoryBundleStore, ItemOracleImpl,
    OracleRewardResolver,
};

pub const VEGETABLE: ItemCategory = ItemCategory(-75);

pub fn spring_crops_id() -> BundleId {
    BundleId::new("Pantry/0")
}

pub fn spring_crops() -> BundleDefinition {
    BundleDefinition::new(
        spring_crops_id(),
        "Spring Crops",
        BundleColor::Green,
        Some(RewardDescriptor::new("(O)465", 20)),
        vec![
            IngredientDefinition::item("(O)24", 1),
            IngredientDefinition::item("(O)188", 1),
            IngredientDefinition::item("(O)190", 1),
            IngredientDefinition::item("(O)192", 1),
        ],
        None,
    )
    .unwrap()
}

/// Two vegetable slots, either of which completes the bundle.
pub fn any_vegetable() -> BundleDefinition {
    BundleDefinition::new(
        BundleId::new("Pantry/9"),
        "Any Vegetable",
        BundleColor::Teal,
        None,
        vec![
            IngredientDefinition::category(VEGETABLE, 1),
            IngredientDefinition::category(VEGETABLE, 1),
        ],
        Some(1),
    )
    .unwrap()
}

pub fn parsnip() -> Item {
    Item::new("(O)24", "Parsnip", VEGETABLE)
}

pub fn green_bean() -> Item {
    Item::new("(O)188", "Green Bean", VEGETABLE)
}

pub fn cauliflower() -> Item {
    Item::new("(O)190", "Cauliflower", VEGETABLE)
}

pub fn potato() -> Item {
    Item::new("(O)192", "Potato", VEGETABLE)
}

pub fn items() -> Arc<ItemOracleImpl> {
    let mut oracle = ItemOracleImpl::new();
    oracle.add_definition(ItemDefinition::new("(O)24", "Parsnip", VEGETABLE));
    oracle.add_definition(ItemDefinition::new(
        "(O)465",
        "Speed-Gro",
        ItemCategory::NONE,
    ));
    Arc::new(oracle)
}

pub fn engine_config(milestones: Vec<usize>) -> EngineConfig {
    EngineConfig {
        milestones,
        ..EngineConfig::default()
    }
}

/// Board over an in-memory store, broadcasting onto `bus`.
pub fn board_with_bus(
    definitions: Vec<BundleDefinition>,
    config: EngineConfig,
    bus: &EventBus,
) -> Arc<BundleBoard> {
    board_on_store(
        definitions,
        config,
        bus,
        Arc::new(InMemoryBundleStore::new()),
    )
}

pub fn board_on_store(
    definitions: Vec<BundleDefinition>,
    config: EngineConfig,
    bus: &EventBus,
    store: Arc<dyn BundleRepository>,
) -> Arc<BundleBoard> {
    let board = BundleBoard::builder()
        .engine_config(config)
        .definitions(definitions)
        .store(store)
        .sink(Arc::new(EventBusSink::new(bus.clone())))
        .rewards(Arc::new(OracleRewardResolver::new(items())))
        .event_bus(bus.clone())
        .build()
        .expect("board should build");
    Arc::new(board)
}
