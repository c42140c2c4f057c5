//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Time only through the `dt` passed in
//! - Seeded RNG only
//! - Side effects only through the `Scene` and `GameObserver` traits

pub mod autopilot;
pub mod clicker;
pub mod field;
pub mod lifecycle;
pub mod state;
pub mod tick;

pub use clicker::{Board, ClickItem, ClickRound, RoundPhase, TrashSprite};
pub use field::TrashField;
pub use lifecycle::{GameLifecycle, GameObserver, HeadlessScene, Scene};
pub use state::{
    GameEvent, GamePhase, GameState, HudSnapshot, Player, RoundSummary, TrashItem, TrashKind,
};
pub use tick::{TickInput, TickOutcome, tick};
