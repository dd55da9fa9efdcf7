pub mod check;
pub mod keys;
pub mod new;
pub mod play;
pub mod show;

use std::path::Path;

use dd_core::DialogueFile;

/// Load a dialogue file, turning errors into CLI messages.
fn load(path: &Path) -> Result<DialogueFile, String> {
    DialogueFile::load(path).map_err(|e| format!("cannot load {}: {e}", path.display()))
}
