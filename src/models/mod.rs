pub mod clip;
pub mod registry;

pub use clip::{Clip, CommitFailure, CommitReport, DeleteError, Model};
pub use registry::{ClipDirs, Discovery, discover};
