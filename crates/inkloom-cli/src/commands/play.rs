use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use inkloom_engine::{EngineConfig, EngineEvent, StoryEngine, StoryView, Transition};
use tracing::debug;

pub fn run(
    path: &Path,
    save: Option<&Path>,
    settings: Option<&Path>,
    seed: Option<u64>,
    strip_typewriter: bool,
) -> Result<(), String> {
    let document = super::load_story(path)?;
    let config = load_config(settings, seed, strip_typewriter)?;

    let mut engine = match save.filter(|p| p.exists()) {
        Some(save_path) => {
            let saved = fs::read_to_string(save_path)
                .map_err(|e| format!("cannot read save '{}': {e}", save_path.display()))?;
            println!("  Resuming from '{}'.", save_path.display());
            StoryEngine::restore(document, &saved, config)
        }
        None => StoryEngine::initialize(document, None, config),
    }
    .map_err(|e| format!("failed to start story: {e}"))?;
    write_save(&engine, save)?;

    println!("  Type a choice number, 'restart' to begin again, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();
    let mut view = engine.view().map_err(|e| e.to_string())?;
    print_view(&view);

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        let step = if input.eq_ignore_ascii_case("restart") {
            engine.reset_to_start()
        } else {
            match pick(&view, input) {
                Ok(choice_id) => engine.select_choice(&choice_id),
                Err(e) => {
                    println!("{}\n", e.yellow());
                    continue;
                }
            }
        };

        match step {
            Ok(transition) => {
                debug!(to = %transition.to, "step taken");
                print_events(&transition);
                write_save(&engine, save)?;
                view = engine.view().map_err(|e| e.to_string())?;
                print_view(&view);
            }
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
    }

    Ok(())
}

fn load_config(
    settings: Option<&Path>,
    seed: Option<u64>,
    strip_typewriter: bool,
) -> Result<EngineConfig, String> {
    let mut config = match settings {
        Some(p) => {
            let json = fs::read_to_string(p)
                .map_err(|e| format!("cannot read settings '{}': {e}", p.display()))?;
            EngineConfig::from_json(&json).map_err(|e| e.to_string())?
        }
        None => EngineConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if strip_typewriter {
        config = config.with_strip_typewriter(true);
    }
    Ok(config)
}

/// Map a 1-based number typed by the player to a visible choice id.
fn pick(view: &StoryView, input: &str) -> Result<String, String> {
    if view.is_ending() {
        return Err("The story has ended. Type 'restart' or 'quit'.".into());
    }
    let n: usize = input
        .parse()
        .map_err(|_| format!("unknown command: {input}"))?;
    n.checked_sub(1)
        .and_then(|i| view.visible_choices.get(i))
        .map(|c| c.id.clone())
        .ok_or_else(|| format!("no choice numbered {n}"))
}

fn print_view(view: &StoryView) {
    if let Some(title) = &view.title {
        println!("  {}", title.bold());
    }
    println!("{}\n", view.resolved_text);

    if view.is_ending() {
        println!("  {}\n", "The End.".bold());
        return;
    }
    for (i, choice) in view.visible_choices.iter().enumerate() {
        if choice.enabled {
            println!("  {}. {}", i + 1, choice.text);
        } else {
            println!("  {}", format!("{}. {} (unavailable)", i + 1, choice.text).dimmed());
        }
    }
    println!();
}

fn print_events(transition: &Transition) {
    for event in &transition.events {
        if let EngineEvent::AchievementUnlocked { name, .. } = event {
            println!("  {} {name}\n", "Achievement unlocked:".green().bold());
        }
    }
}

fn write_save(engine: &StoryEngine, save: Option<&Path>) -> Result<(), String> {
    let Some(path) = save else {
        return Ok(());
    };
    let json = engine.serialize().map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("cannot write save '{}': {e}", path.display()))
}
