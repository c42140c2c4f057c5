//! Click-the-trash round
//!
//! A short 2D game: a piece of trash pops up on the board every second, sits
//! there for a few seconds, and is worth one point if clicked before it goes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Round length (seconds)
pub const ROUND_DURATION: f32 = 30.0;
/// One spawn per interval
pub const SPAWN_INTERVAL: f32 = 1.0;
/// Unclicked items disappear after this long
pub const ITEM_LIFETIME: f32 = 4.0;
/// Item sprite size (px)
pub const ITEM_SIZE: f32 = 50.0;
/// Ground strip at the bottom of the board where nothing spawns (px)
pub const GROUND_HEIGHT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrashSprite {
    Bottle,
    Can,
    PlasticBag,
}

impl TrashSprite {
    pub const ALL: [TrashSprite; 3] = [TrashSprite::Bottle, TrashSprite::Can, TrashSprite::PlasticBag];

    /// Image file name under the assets directory
    pub fn file_name(self) -> &'static str {
        match self {
            TrashSprite::Bottle => "bottle.png",
            TrashSprite::Can => "can.png",
            TrashSprite::PlasticBag => "plastic-bag.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Idle,
    Running,
    Finished,
}

/// Playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickItem {
    pub id: u32,
    pub sprite: TrashSprite,
    /// Top-left corner (px)
    pub left: f32,
    pub top: f32,
    /// Seconds on the board
    pub age: f32,
}

pub struct ClickRound {
    phase: RoundPhase,
    score: u32,
    elapsed: f32,
    spawn_timer: f32,
    board: Board,
    items: Vec<ClickItem>,
    next_id: u32,
    rng: Pcg32,
}

impl ClickRound {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: RoundPhase::Idle,
            score: 0,
            elapsed: 0.0,
            spawn_timer: 0.0,
            board: Board {
                width: 0.0,
                height: 0.0,
            },
            items: Vec::new(),
            next_id: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn items(&self) -> &[ClickItem] {
        &self.items
    }

    pub fn time_left(&self) -> f32 {
        (ROUND_DURATION - self.elapsed).max(0.0)
    }

    /// Clear the board and start counting. Restarting mid-round is allowed.
    pub fn start(&mut self, board: Board) {
        self.phase = RoundPhase::Running;
        self.score = 0;
        self.elapsed = 0.0;
        self.spawn_timer = 0.0;
        self.board = board;
        self.items.clear();
        log::info!("Click round started on {}x{} board", board.width, board.height);
    }

    /// Advance the round. `hidden` pauses spawning (not the clock) while the
    /// page is in the background.
    ///
    /// Returns the final score on the tick that ends the round.
    pub fn tick(&mut self, dt: f32, hidden: bool) -> Option<u32> {
        if self.phase != RoundPhase::Running {
            return None;
        }
        let dt = dt.max(0.0);

        for item in &mut self.items {
            item.age += dt;
        }
        self.items.retain(|i| i.age < ITEM_LIFETIME);

        let step = dt.min(ROUND_DURATION - self.elapsed);
        self.elapsed += step;
        self.spawn_timer += step;
        while self.spawn_timer >= SPAWN_INTERVAL {
            self.spawn_timer -= SPAWN_INTERVAL;
            if !hidden {
                self.spawn();
            }
        }

        if self.elapsed >= ROUND_DURATION {
            self.phase = RoundPhase::Finished;
            self.items.clear();
            log::info!("Click round over, final score {}", self.score);
            return Some(self.score);
        }
        None
    }

    /// Click an item: +1 point, and it's gone
    pub fn click(&mut self, id: u32) -> bool {
        if self.phase != RoundPhase::Running {
            return false;
        }
        let Some(idx) = self.items.iter().position(|i| i.id == id) else {
            return false;
        };
        self.items.remove(idx);
        self.score += 1;
        true
    }

    fn spawn(&mut self) {
        let sprite = TrashSprite::ALL[self.rng.random_range(0..TrashSprite::ALL.len())];
        let available_height = (self.board.height - GROUND_HEIGHT - ITEM_SIZE).max(0.0);
        let available_width = (self.board.width - ITEM_SIZE).max(0.0);
        let item = ClickItem {
            id: self.next_id,
            sprite,
            left: self.rng.random::<f32>() * available_width,
            top: self.rng.random::<f32>() * available_height,
            age: 0.0,
        };
        self.next_id += 1;
        self.items.push(item);
    }
}
