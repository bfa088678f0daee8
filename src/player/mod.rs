pub mod backend;
pub mod command;

pub use backend::{MediaPlayer, Playback};
pub use command::{ChildPlayback, CommandPlayer};

use crate::storage::PlayerConfig;

/// Create the media player described by the config
pub fn create_player(config: &PlayerConfig) -> Box<dyn MediaPlayer> {
    log::info!(
        "Using player: {} {}",
        config.program,
        config.args.join(" ")
    );
    Box::new(CommandPlayer::new(config.program.clone(), config.args.clone()))
}
