//! Full playthroughs of the sample story.

use inkloom_engine::{
    EngineConfig, EngineError, EnginePhase, PlayerState, StoryDocument, StoryEngine, StoryPackage,
    Value, validate,
};

const LANTERN: &str = include_str!("fixtures/lantern.json");

fn config() -> EngineConfig {
    EngineConfig::default().with_seed(99).with_vibration(false)
}

fn engine() -> StoryEngine {
    let document = StoryDocument::from_json(LANTERN).unwrap();
    StoryEngine::initialize(document, None, config()).unwrap()
}

#[test]
fn sample_story_is_clean() {
    let package = StoryPackage::from_json(LANTERN).unwrap();
    assert_eq!(package.title, "The Lantern Keeper");
    assert!(validate(&package.story).is_empty());
}

#[test]
fn play_to_the_ending() {
    let mut engine = engine();

    let view = engine.view().unwrap();
    assert_eq!(view.title.as_deref(), Some("The Shore"));
    assert_eq!(view.image.as_deref(), Some("tower"));
    assert_eq!(view.audio.as_deref(), Some("surf"));
    assert_eq!(view.enabled_flags(), vec![true, false]);

    engine.select_choice("knock").unwrap();
    engine.select_choice("take_key").unwrap();
    engine.select_choice("climb").unwrap();
    let transition = engine.select_choice("refill").unwrap();
    assert_eq!(transition.unlocked_achievements(), vec!["lamplighter"]);

    assert_eq!(engine.phase(), EnginePhase::Ended);
    let state = engine.state();
    assert_eq!(state.variable("oil"), Some(&Value::Number(1.0)));
    assert!(state.inventory.is_empty());
    assert_eq!(state.achievements, vec!["lamplighter"]);
    assert_eq!(
        state.history,
        vec!["shore", "cottage", "shore", "stairs", "lamp"]
    );
}

#[test]
fn hidden_choice_disappears_once_taken() {
    let mut engine = engine();
    engine.select_choice("knock").unwrap();
    engine.select_choice("take_key").unwrap();
    engine.select_choice("knock").unwrap();

    let view = engine.view().unwrap();
    let ids: Vec<&str> = view.visible_choices.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["leave"]);
    assert!(matches!(
        engine.select_choice("take_key"),
        Err(EngineError::ChoiceUnavailable(_))
    ));
}

#[test]
fn transcript() {
    let mut engine = engine();
    let mut transcript = String::new();
    for step in ["knock", "leave", "knock", "take_key", "climb", "refill"] {
        let view = engine.view().unwrap();
        transcript.push_str(&format!("[{}] {}\n", view.node_id, view.resolved_text));
        engine.select_choice(step).unwrap();
    }
    let view = engine.view().unwrap();
    transcript.push_str(&format!("[{}] {}\n", view.node_id, view.resolved_text));

    insta::assert_snapshot!(transcript, @r"
    [shore] The lighthouse is dark. You carry 2 flasks of oil.
    [cottage] A key hangs by the door.
    [shore] The lighthouse is dark. You carry 2 flasks of oil.
    [cottage] Maren nods again.A key hangs by the door.
    [shore] The lighthouse is dark. You carry 2 flasks of oil.
    [stairs] The lamp needs oil. 1 item(s) weigh on you.
    [lamp] Light sweeps the water. 1 flask(s) remain.
    ");
}

#[test]
fn save_and_resume_mid_story() {
    let mut engine = engine();
    engine.select_choice("knock").unwrap();
    engine.select_choice("take_key").unwrap();
    let saved = engine.serialize().unwrap();

    let parsed = PlayerState::from_json(&saved).unwrap();
    assert_eq!(parsed.current_node_id, "shore");

    let document = StoryDocument::from_json(LANTERN).unwrap();
    let mut resumed = StoryEngine::restore(document, &saved, config()).unwrap();
    assert_eq!(resumed.history(), ["shore", "cottage", "shore", "shore"]);
    assert_eq!(resumed.view().unwrap().enabled_flags(), vec![true, true]);
    resumed.select_choice("climb").unwrap();
    assert_eq!(resumed.state().current_node_id, "stairs");
}

#[test]
fn corrupt_save_is_reported() {
    let document = StoryDocument::from_json(LANTERN).unwrap();
    let err = StoryEngine::restore(document, "not json", config()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidSave(_)));
}
