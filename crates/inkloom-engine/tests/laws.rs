//! Property tests for the pure parts of the engine.

use std::collections::BTreeMap;

use inkloom_engine::choice::{Modification, ModifyOperation};
use inkloom_engine::{Cost, EffectSet, PlayerState, TextRenderer, Value};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn item() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["sword", "torch", "key", "coin"]).prop_map(String::from)
}

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["gold", "hp", "mood", "flag"]).prop_map(String::from)
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        (-1000i32..1000).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::Text),
    ]
}

fn modification() -> impl Strategy<Value = Modification> {
    let op = prop::sample::select(vec![
        ModifyOperation::Add,
        ModifyOperation::Subtract,
        ModifyOperation::Multiply,
        ModifyOperation::Set,
    ]);
    (op, value()).prop_map(|(operation, value)| Modification { operation, value })
}

fn effect_set() -> impl Strategy<Value = EffectSet> {
    (
        prop::collection::btree_map(name(), value(), 0..3),
        prop::collection::btree_map(name(), modification(), 0..3),
        prop::collection::vec(item(), 0..4),
        prop::collection::vec(item(), 0..2),
        prop::collection::vec("[a-c]", 0..3),
    )
        .prop_map(
            |(set_variables, modify_variables, add_inventory, remove_inventory, unlock)| {
                EffectSet {
                    set_variables,
                    modify_variables,
                    add_inventory,
                    remove_inventory,
                    unlock_achievements: unlock,
                }
            },
        )
}

fn player_state() -> impl Strategy<Value = PlayerState> {
    (
        prop::collection::btree_map(name(), value(), 0..4),
        prop::collection::vec(item(), 0..6),
    )
        .prop_map(|(variables, inventory)| PlayerState {
            variables,
            inventory,
            ..PlayerState::default()
        })
}

proptest! {
    #[test]
    fn apply_is_pure(effects in effect_set(), state in player_state()) {
        let snapshot = state.clone();
        let first = effects.apply(&state);
        let second = effects.apply(&state);
        prop_assert_eq!(&state, &snapshot);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn set_variables_is_idempotent(vars in prop::collection::btree_map(name(), value(), 1..4),
                                   state in player_state()) {
        let effects = EffectSet { set_variables: vars.clone(), ..EffectSet::default() };
        let once = effects.apply(&state);
        let twice = effects.apply(&once);
        prop_assert_eq!(&once.variables, &twice.variables);
        for (k, v) in &vars {
            prop_assert_eq!(once.variable(k), Some(v));
        }
    }

    #[test]
    fn remove_inventory_leaves_no_trace(state in player_state(),
                                        removed in prop::collection::vec(item(), 1..3)) {
        let effects = EffectSet { remove_inventory: removed.clone(), ..EffectSet::default() };
        let next = effects.apply(&state);
        prop_assert!(next.inventory.iter().all(|i| !removed.contains(i)));
        let kept: Vec<&String> = state.inventory.iter().filter(|i| !removed.contains(i)).collect();
        prop_assert_eq!(next.inventory.iter().collect::<Vec<_>>(), kept);
    }

    #[test]
    fn cost_removes_one_occurrence(state in player_state(), paid in item()) {
        let cost = Cost { inventory: vec![paid.clone()], variables: BTreeMap::new() };
        let next = cost.apply(&state);
        let before = state.inventory.iter().filter(|i| **i == paid).count();
        let after = next.inventory.iter().filter(|i| **i == paid).count();
        prop_assert_eq!(after, before.saturating_sub(1));
        prop_assert_eq!(next.inventory.len(), state.inventory.len() - (before - after));
    }

    #[test]
    fn achievements_never_duplicate(effects in effect_set(), state in player_state()) {
        let next = effects.apply(&effects.apply(&state));
        let mut unique = next.achievements.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), next.achievements.len());
    }

    #[test]
    fn text_without_braces_is_untouched(text in "[^{}]*", state in player_state()) {
        let mut rng = StdRng::seed_from_u64(0);
        prop_assert_eq!(TextRenderer::new().render(&text, &state, &mut rng), text);
    }
}
