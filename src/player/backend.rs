use anyhow::Result;
use std::path::Path;

/// Trait for the external media player used to preview clips
/// Implementations start playback and hand back a handle to the running process
pub trait MediaPlayer {
    /// Start playing `path` without waiting for playback to finish
    fn play(&self, path: &Path) -> Result<Box<dyn Playback>>;

    /// Get the player name (for logging/debugging)
    fn name(&self) -> &str;
}

/// Handle to a running playback
pub trait Playback {
    /// Non-blocking check whether the player has exited
    fn try_finished(&mut self) -> Result<bool>;

    /// Terminate the player immediately
    fn stop(&mut self) -> Result<()>;
}
