//! Game lifecycle
//!
//! Owns the [`GameState`] and the [`TrashField`], drives the phase machine
//!
//! ```text
//! Loading -> Menu -> Playing -> GameOver
//!                       ^           |
//!                       +-----------+
//! ```
//!
//! and reports everything to a [`GameObserver`] as plain data. Side effects
//! on the rendering engine go through the [`Scene`] trait.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::field::TrashField;
use super::state::{GameEvent, GamePhase, GameState, HudSnapshot, Player, RoundSummary, TrashItem};
use super::tick::{TickInput, tick};
use crate::consts::{LOOK_SENSITIVITY, MAX_PITCH};
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Rendering-engine collaborator. Every hook defaults to a no-op.
pub trait Scene {
    /// World population finished
    fn populate(&mut self, _items: &[TrashItem]) {}
    /// `item` was moved away from `from`
    fn reposition(&mut self, _item: &TrashItem, _from: Vec3) {}
    /// Grab exclusive input (pointer lock)
    fn capture_input(&mut self) {}
    fn release_input(&mut self) {}
    /// Transient collection effect
    fn spawn_effect(&mut self, _at: Vec3) {}
    /// Camera follows the player
    fn sync_player(&mut self, _player: &Player) {}
}

/// Scene for headless runs and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessScene;

impl Scene for HeadlessScene {}

/// UI collaborator. Notifications only; nothing flows back into the game.
pub trait GameObserver {
    fn on_state_change(&mut self, _phase: GamePhase, _summary: RoundSummary) {}
    fn on_update(&mut self, _snapshot: HudSnapshot) {}
    fn on_score_feedback(&mut self, _delta: u32) {}
}

impl GameObserver for () {}

/// Record events in order
impl GameObserver for Vec<GameEvent> {
    fn on_state_change(&mut self, phase: GamePhase, summary: RoundSummary) {
        self.push(GameEvent::StateChanged { phase, summary });
    }

    fn on_update(&mut self, snapshot: HudSnapshot) {
        self.push(GameEvent::Update(snapshot));
    }

    fn on_score_feedback(&mut self, delta: u32) {
        self.push(GameEvent::ScoreFeedback(delta));
    }
}

pub struct GameLifecycle<S: Scene, O: GameObserver> {
    state: GameState,
    field: TrashField,
    tuning: Tuning,
    rng: Pcg32,
    scene: S,
    observer: O,
}

impl<S: Scene, O: GameObserver> GameLifecycle<S, O> {
    /// New session in the Loading phase. All randomness comes from `seed`.
    pub fn new(tuning: Tuning, seed: u64, scene: S, observer: O) -> Self {
        Self {
            state: GameState::new(&tuning, seed),
            field: TrashField::from_tuning(&tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            scene,
            observer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn field(&self) -> &TrashField {
        &self.field
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Assets are ready: scatter the trash and show the menu
    pub fn finish_loading(&mut self) -> bool {
        if self.state.phase != GamePhase::Loading {
            log::debug!("finish_loading ignored in {:?}", self.state.phase);
            return false;
        }

        let (count, rare_chance) = (self.tuning.trash_count, self.tuning.rare_chance);
        self.field.populate(count, rare_chance, &self.tuning, &mut self.rng);
        log::info!(
            "World populated: {} items ({} rare)",
            self.field.len(),
            self.field.rare_count()
        );
        self.scene.populate(self.field.items());
        self.scene.sync_player(&self.state.player);
        self.set_state(GamePhase::Menu)
    }

    /// Start (or restart) a round from Menu or GameOver
    pub fn start_game(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Menu | GamePhase::GameOver => {}
            phase => {
                log::debug!("start_game ignored in {:?}", phase);
                return false;
            }
        }

        self.state.reset_round(&self.tuning);
        self.scene.capture_input();
        self.scene.sync_player(&self.state.player);
        log::info!("Round started ({}s)", self.tuning.game_duration);
        self.set_state(GamePhase::Playing)
    }

    /// Forced end of the current round
    pub fn end_game(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.set_state(GamePhase::GameOver)
    }

    /// One animation frame. Negative or non-finite deltas count as zero.
    pub fn tick(&mut self, dt: f32, input: &TickInput) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("tick called with invalid delta {dt}, clamping to 0");
            0.0
        };

        let outcome = tick(&mut self.state, input, &self.tuning, dt);
        if !outcome.advanced {
            return;
        }

        self.scene.sync_player(&self.state.player);
        if outcome.expired {
            log::info!("Time's up! Final score: {}", self.state.score);
            self.set_state(GamePhase::GameOver);
        }
        self.observer.on_update(self.state.snapshot());
    }

    /// Pointer-locked mouse movement (pixels)
    pub fn look(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        if !(dx.is_finite() && dy.is_finite() && sensitivity.is_finite()) {
            log::warn!("Ignoring non-finite look delta ({dx}, {dy}) x {sensitivity}");
            return;
        }
        let scale = LOOK_SENSITIVITY * sensitivity;
        let player = &mut self.state.player;
        player.yaw = normalize_angle(player.yaw - dx * scale);
        player.pitch = (player.pitch - dy * scale).clamp(-MAX_PITCH, MAX_PITCH);
        self.scene.sync_player(player);
    }

    /// Player touched an item. Returns the points awarded.
    pub fn collect_trash(&mut self, id: u32) -> Option<u32> {
        if self.state.phase != GamePhase::Playing {
            log::debug!("collect_trash({id}) ignored in {:?}", self.state.phase);
            return None;
        }

        let value = self.field.get(id)?.score_value;
        self.state.score += value as u64;
        self.observer.on_score_feedback(value);

        let from = self.field.reposition(id, &mut self.rng)?;
        self.scene.spawn_effect(from);
        if let Some(item) = self.field.get(id) {
            self.scene.reposition(item, from);
        }
        Some(value)
    }

    /// Collect everything within pickup range of the player
    pub fn collect_in_reach(&mut self) -> usize {
        if self.state.phase != GamePhase::Playing {
            return 0;
        }
        let hits = self
            .field
            .in_reach(self.state.player.position, self.tuning.pickup_radius);
        hits.into_iter()
            .filter(|&id| self.collect_trash(id).is_some())
            .count()
    }

    /// Strict phase change; same-phase requests are dropped silently
    fn set_state(&mut self, phase: GamePhase) -> bool {
        if self.state.phase == phase {
            return false;
        }
        log::info!("Phase {:?} -> {:?}", self.state.phase, phase);
        self.state.phase = phase;
        if phase == GamePhase::GameOver {
            self.scene.release_input();
        }
        self.observer.on_state_change(phase, self.state.summary());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::TrashKind;

    /// Records scene calls
    #[derive(Default)]
    struct RecordingScene {
        populated: usize,
        repositioned: Vec<u32>,
        effects: Vec<Vec3>,
        captures: u32,
        releases: u32,
    }

    impl Scene for RecordingScene {
        fn populate(&mut self, items: &[TrashItem]) {
            self.populated = items.len();
        }
        fn reposition(&mut self, item: &TrashItem, _from: Vec3) {
            self.repositioned.push(item.id);
        }
        fn capture_input(&mut self) {
            self.captures += 1;
        }
        fn release_input(&mut self) {
            self.releases += 1;
        }
        fn spawn_effect(&mut self, at: Vec3) {
            self.effects.push(at);
        }
    }

    type TestGame = GameLifecycle<RecordingScene, Vec<GameEvent>>;

    fn game() -> TestGame {
        GameLifecycle::new(Tuning::default(), 4242, RecordingScene::default(), Vec::new())
    }

    fn playing() -> TestGame {
        let mut game = game();
        game.finish_loading();
        game.start_game();
        game.observer_mut().clear();
        game
    }

    fn state_changes(events: &[GameEvent]) -> Vec<GamePhase> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::StateChanged { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_full_lifecycle() {
        let mut game = game();
        assert_eq!(game.phase(), GamePhase::Loading);
        assert!(game.finish_loading());
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(game.field().len(), 80);
        assert_eq!(game.scene().populated, 80);

        assert!(game.start_game());
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.scene().captures, 1);

        assert!(game.end_game());
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.scene().releases, 1);

        assert!(game.start_game());
        assert_eq!(game.scene().captures, 2);
        assert_eq!(
            state_changes(game.observer()),
            vec![GamePhase::Menu, GamePhase::Playing, GamePhase::GameOver, GamePhase::Playing]
        );
    }

    #[test]
    fn test_finish_loading_only_once() {
        let mut game = game();
        assert!(game.finish_loading());
        assert!(!game.finish_loading());
        assert_eq!(state_changes(game.observer()), vec![GamePhase::Menu]);
    }

    #[test]
    fn test_start_ignored_from_loading_and_playing() {
        let mut game = game();
        assert!(!game.start_game());
        assert_eq!(game.phase(), GamePhase::Loading);

        let mut game = playing();
        game.tick(10.0, &TickInput::default());
        assert!(!game.start_game());
        // Round was not reset
        assert_eq!(game.state().time_left, 110.0);
        assert!(state_changes(game.observer()).is_empty());
    }

    #[test]
    fn test_set_state_same_phase_is_silent() {
        let mut game = playing();
        assert!(!game.set_state(GamePhase::Playing));
        assert!(game.observer().is_empty());
        assert!(game.set_state(GamePhase::GameOver));
        assert!(!game.set_state(GamePhase::GameOver));
        assert_eq!(state_changes(game.observer()), vec![GamePhase::GameOver]);
    }

    #[test]
    fn test_state_change_carries_final_score() {
        let mut game = playing();
        let id = game.field().items()[0].id;
        let value = game.collect_trash(id).unwrap();
        game.end_game();
        let last = *game.observer().last().unwrap();
        assert_eq!(
            last,
            GameEvent::StateChanged {
                phase: GamePhase::GameOver,
                summary: RoundSummary { final_score: value as u64 },
            }
        );
    }

    #[test]
    fn test_hundred_twenty_ticks_end_round() {
        let mut game = playing();
        for _ in 0..120 {
            game.tick(1.0, &TickInput::default());
        }
        assert_eq!(game.state().time_left, 0.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(state_changes(game.observer()), vec![GamePhase::GameOver]);

        // Further ticks do nothing and emit nothing
        let emitted = game.observer().len();
        game.tick(1.0, &TickInput::default());
        assert_eq!(game.observer().len(), emitted);
    }

    #[test]
    fn test_game_over_emitted_before_final_update() {
        let mut game = playing();
        game.tick(200.0, &TickInput::default());
        let events = game.observer();
        assert!(matches!(events[0], GameEvent::StateChanged { phase: GamePhase::GameOver, .. }));
        assert_eq!(
            events[1],
            GameEvent::Update(HudSnapshot { score: 0, time_left: 0.0, stamina: 100.0 })
        );
    }

    #[test]
    fn test_tick_emits_snapshot() {
        let mut game = playing();
        let input = TickInput { sprint: true, forward: true, ..Default::default() };
        game.tick(1.0, &input);
        game.tick(1.0, &input);
        assert_eq!(
            game.observer().last(),
            Some(&GameEvent::Update(HudSnapshot { score: 0, time_left: 118.0, stamina: 50.0 }))
        );
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut game = playing();
        game.tick(-5.0, &TickInput::default());
        game.tick(f32::NAN, &TickInput::default());
        assert_eq!(game.state().time_left, 120.0);
        // Still notifies, with an unchanged snapshot
        assert_eq!(game.observer().len(), 2);
    }

    #[test]
    fn test_collect_adds_value_and_repositions() {
        let mut game = playing();
        game.state.score = 10;
        let rare = game
            .field()
            .items()
            .iter()
            .find(|i| i.kind == TrashKind::Rare)
            .cloned()
            .expect("seed 4242 should spawn a rare item");

        assert_eq!(game.collect_trash(rare.id), Some(5));
        assert_eq!(game.state().score, 15);
        assert_eq!(game.observer().as_slice(), &[GameEvent::ScoreFeedback(5)]);
        assert_eq!(game.field().len(), 80);
        assert_ne!(game.field().get(rare.id).unwrap().position, rare.position);
        assert_eq!(game.scene().effects, vec![rare.position]);
        assert_eq!(game.scene().repositioned, vec![rare.id]);
    }

    #[test]
    fn test_collect_ignored_outside_playing() {
        let mut game = playing();
        game.end_game();
        game.observer_mut().clear();
        assert_eq!(game.collect_trash(0), None);
        assert_eq!(game.state().score, 0);
        assert!(game.observer().is_empty());
        assert!(game.scene().effects.is_empty());
    }

    #[test]
    fn test_collect_unknown_id() {
        let mut game = playing();
        assert_eq!(game.collect_trash(10_000), None);
        assert!(game.observer().is_empty());
    }

    #[test]
    fn test_restart_resets_snapshot() {
        let mut game = playing();
        let id = game.field().items()[3].id;
        game.collect_trash(id);
        let sprint = TickInput { sprint: true, left: true, ..Default::default() };
        for _ in 0..150 {
            game.tick(1.0, &sprint);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);

        assert!(game.start_game());
        game.observer_mut().clear();
        game.tick(0.0, &TickInput::default());
        assert_eq!(
            game.observer().as_slice(),
            &[GameEvent::Update(HudSnapshot { score: 0, time_left: 120.0, stamina: 100.0 })]
        );
    }

    #[test]
    fn test_collect_in_reach() {
        let mut game = playing();
        let target = game.field().items()[0].clone();
        game.state.player.position = Vec3::new(target.position.x, 1.6, target.position.z);
        let collected = game.collect_in_reach();
        assert!(collected >= 1);
        assert!(game.state().score >= target.score_value as u64);
    }

    #[test]
    fn test_look_clamps_pitch() {
        let mut game = playing();
        game.look(0.0, -1.0e6, 1.0);
        assert!((game.state().player.pitch - MAX_PITCH).abs() < 1e-6);
        game.look(100.0, 0.0, 1.0);
        assert!(game.state().player.yaw < 0.0);
    }

    #[test]
    fn test_look_ignores_non_finite_deltas() {
        let mut game = playing();
        game.look(f32::NAN, 0.0, 1.0);
        game.look(0.0, f32::INFINITY, 1.0);
        game.look(1.0, 1.0, f32::NAN);
        assert_eq!(game.state().player.yaw, 0.0);
        assert_eq!(game.state().player.pitch, 0.0);

        game.look(1.0e12, 0.0, 1.0);
        let yaw = game.state().player.yaw;
        assert!((-std::f32::consts::PI..=std::f32::consts::PI).contains(&yaw));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn timer_never_increases_and_ends_once(deltas in prop::collection::vec(0.0f32..5.0, 1..200)) {
                let mut game = playing();
                let mut last = game.state().time_left;
                let mut elapsed = 0.0f32;
                for dt in deltas {
                    game.tick(dt, &TickInput::default());
                    elapsed += dt;
                    let now = game.state().time_left;
                    prop_assert!(now <= last);
                    prop_assert!(now >= 0.0);
                    last = now;
                }
                let game_overs = state_changes(game.observer())
                    .into_iter()
                    .filter(|p| *p == GamePhase::GameOver)
                    .count();
                prop_assert!(game_overs <= 1);
                if game.phase() == GamePhase::GameOver {
                    prop_assert_eq!(game.state().time_left, 0.0);
                    prop_assert_eq!(game_overs, 1);
                } else if elapsed < 119.0 {
                    prop_assert!(game.state().time_left > 0.0);
                }
            }

            #[test]
            fn stamina_stays_in_range(
                steps in prop::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..3.0), 1..100)
            ) {
                let mut game = playing();
                for (sprint, forward, dt) in steps {
                    let input = TickInput { sprint, forward, ..Default::default() };
                    game.tick(dt, &input);
                    let stamina = game.state().stamina;
                    prop_assert!((0.0..=100.0).contains(&stamina));
                }
            }
        }
    }
}
