//! reelcull - review paired raw/preview video clips in the terminal
//!
//! This library exports the core modules for testing and potential reuse.

pub mod app;
pub mod command;
pub mod logging;
pub mod models;
pub mod player;
pub mod session;
pub mod storage;
pub mod ui;
