pub mod check;
pub mod play;

use std::fs;
use std::path::Path;

use inkloom_engine::StoryDocument;

/// Read a story file, accepting both bare documents and packages.
fn load_story(path: &Path) -> Result<StoryDocument, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    StoryDocument::from_json(&json).map_err(|e| format!("'{}': {e}", path.display()))
}
