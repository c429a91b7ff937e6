//! Touchscreen prey toy engine.
//!
//! Critters of several species wander a play area toward random targets,
//! get caught when tapped, respawn after a short delay, and every catch and
//! session is folded into persisted play statistics.
//!
//! The engine is single-threaded and frame driven: the host owns the frame
//! callback and feeds elapsed time into [`play::PlayArea::advance`].

pub mod audio;
pub mod clock;
pub mod config;
pub mod ecs;
pub mod effects;
pub mod game;
pub mod geometry;
pub mod play;
pub mod prefs;
pub mod registry;
pub mod render;
pub mod species;
pub mod stats;
pub mod storage;
pub mod timers;

pub use game::{Game, HostEvent};
pub use play::PlayArea;
pub use species::Species;
