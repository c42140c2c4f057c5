//! Climate Hero entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent};

    use climate_hero::audio::{AudioManager, SoundEffect};
    use climate_hero::platform::{FrameClock, InputState, KeyBinding};
    use climate_hero::sim::autopilot;
    use climate_hero::sim::{
        Board, ClickRound, GameLifecycle, GameObserver, GamePhase, HudSnapshot, Player,
        RoundSummary, Scene, TrashItem, TrashKind,
    };
    use climate_hero::ui::{self, Screen};
    use climate_hero::{GlobalProgress, Settings, Tuning};

    // Bridge to the 3D engine. The page provides `window.climateHeroScene`.
    #[wasm_bindgen(inline_js = "
        function scene() { return window.climateHeroScene; }

        export function has_scene() {
            return !!scene();
        }
        export function scene_load_assets(on_done) {
            scene().loadAssets(on_done);
        }
        export function scene_populate(ids, rare, positions) {
            scene().populate(ids, rare, positions);
        }
        export function scene_reposition(id, x, y, z) {
            scene().reposition(id, x, y, z);
        }
        export function scene_spawn_effect(x, y, z) {
            scene().spawnEffect(x, y, z);
        }
        export function scene_sync_camera(x, y, z, yaw, pitch) {
            scene().syncCamera(x, y, z, yaw, pitch);
        }
        export function scene_render() {
            scene().render();
        }
        export function request_pointer_lock() {
            const canvas = scene().canvas;
            if (canvas) {
                const result = canvas.requestPointerLock();
                if (result && result.catch) {
                    result.catch(e => console.error('Pointer lock failed:', e));
                }
            }
        }
        export function exit_pointer_lock() {
            if (document.pointerLockElement) {
                document.exitPointerLock();
            }
        }
    ")]
    extern "C" {
        fn has_scene() -> bool;
        fn scene_load_assets(on_done: &js_sys::Function);
        fn scene_populate(ids: &[u32], rare: &[u8], positions: &[f32]);
        fn scene_reposition(id: u32, x: f32, y: f32, z: f32);
        fn scene_spawn_effect(x: f32, y: f32, z: f32);
        fn scene_sync_camera(x: f32, y: f32, z: f32, yaw: f32, pitch: f32);
        fn scene_render();
        fn request_pointer_lock();
        fn exit_pointer_lock();
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(el: &Element, hidden: bool) {
        let _ = el.class_list().toggle_with_force("hidden", hidden);
    }

    fn set_width_percent(document: &Document, id: &str, percent: f32) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("width", &format!("{percent}%"));
        }
    }

    /// Three.js side of the simulator
    struct JsScene {
        effects: bool,
    }

    impl Scene for JsScene {
        fn populate(&mut self, items: &[TrashItem]) {
            let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
            let rare: Vec<u8> = items
                .iter()
                .map(|i| (i.kind == TrashKind::Rare) as u8)
                .collect();
            let positions: Vec<f32> = items
                .iter()
                .flat_map(|i| i.position.to_array())
                .collect();
            scene_populate(&ids, &rare, &positions);
        }

        fn reposition(&mut self, item: &TrashItem, _from: glam::Vec3) {
            let p = item.position;
            scene_reposition(item.id, p.x, p.y, p.z);
        }

        fn capture_input(&mut self) {
            request_pointer_lock();
        }

        fn release_input(&mut self) {
            exit_pointer_lock();
        }

        fn spawn_effect(&mut self, at: glam::Vec3) {
            if self.effects {
                scene_spawn_effect(at.x, at.y, at.z);
            }
        }

        fn sync_player(&mut self, player: &Player) {
            let p = player.position;
            scene_sync_camera(p.x, p.y, p.z, player.yaw, player.pitch);
        }
    }

    /// DOM + audio side: reacts to lifecycle events
    struct Presenter {
        document: Document,
        audio: AudioManager,
        progress: GlobalProgress,
        stamina_max: f32,
        rare_score: u32,
    }

    impl Presenter {
        fn show_screen(&self, screen: Screen) {
            for s in Screen::ALL {
                if let Some(el) = self.document.get_element_by_id(s.element_id()) {
                    set_hidden(&el, s != screen);
                }
            }
        }

        fn update_progress(&self) {
            set_text(&self.document, "global-score", &self.progress.total.to_string());
            set_text(&self.document, "global-progress-text", &ui::progress_text(&self.progress));
            set_width_percent(
                &self.document,
                "global-progress-bar",
                self.progress.fraction() * 100.0,
            );
        }

        /// Bank points into global progress and celebrate rewards
        fn bank(&mut self, points: u64) {
            if let Some(reward) = self.progress.add(points) {
                self.audio.play(SoundEffect::Reward);
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&format!(
                        "Congratulations! You reached {} points and earned a reward!",
                        reward.total
                    ));
                }
            }
            self.progress.save();
            self.update_progress();
        }
    }

    impl GameObserver for Presenter {
        fn on_state_change(&mut self, phase: GamePhase, summary: RoundSummary) {
            self.show_screen(Screen::for_phase(phase));
            match phase {
                GamePhase::Playing => {
                    self.audio.play(SoundEffect::GameStart);
                    self.audio.start_music();
                }
                GamePhase::GameOver => {
                    set_text(&self.document, "final-score", &summary.final_score.to_string());
                    self.audio.stop_music();
                    self.audio.play(SoundEffect::GameOver);
                    self.bank(summary.final_score);
                }
                GamePhase::Loading | GamePhase::Menu => {}
            }
        }

        fn on_update(&mut self, snapshot: HudSnapshot) {
            set_text(&self.document, "hud-score", &snapshot.score.to_string());
            set_text(&self.document, "hud-time", &ui::format_clock(snapshot.time_left));
            set_width_percent(
                &self.document,
                "hud-stamina-bar",
                ui::stamina_percent(snapshot.stamina, self.stamina_max),
            );
        }

        fn on_score_feedback(&mut self, delta: u32) {
            if let Some(el) = self.document.get_element_by_id("score-feedback") {
                el.set_text_content(Some(&ui::score_feedback_text(delta)));
                // Restart the CSS pop animation
                let _ = el.class_list().remove_1("show");
                let _ = el.class_list().add_1("show");
            }
            let effect = if delta >= self.rare_score {
                SoundEffect::CollectRare
            } else {
                SoundEffect::Collect
            };
            self.audio.play(effect);
        }
    }

    /// Simulator instance holding all state
    struct Game {
        lifecycle: GameLifecycle<JsScene, Presenter>,
        clock: FrameClock,
        input: InputState,
        settings: Settings,
        autopilot: bool,
        pointer_locked: bool,
    }

    impl Game {
        fn update(&mut self, dt: f32) {
            let input = if self.autopilot {
                autopilot::steer(
                    self.lifecycle.state(),
                    self.lifecycle.field(),
                    self.lifecycle.tuning(),
                )
            } else {
                self.input.snapshot()
            };
            self.lifecycle.tick(dt, &input);
            self.lifecycle.collect_in_reach();
        }

        fn start(&mut self) {
            if self.lifecycle.start_game() {
                self.input.clear();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Climate Hero starting...");

        let Some(document) = document() else {
            log::error!("No document - nothing to run");
            return;
        };

        // One entry point serves all three pages
        if document.get_element_by_id("game-container").is_some() {
            click_page::run(document);
            return;
        }
        if document.get_element_by_id("collect-trash-btn").is_some() {
            counter_page::run(document);
            return;
        }
        if !has_scene() {
            log::error!("window.climateHeroScene missing - simulator disabled");
            return;
        }

        let settings = Settings::load();
        let tuning = Tuning::default();
        let seed = js_sys::Date::now() as u64;

        let presenter = Presenter {
            document: document.clone(),
            audio: AudioManager::new(settings.effective_sfx_volume(), settings.effective_music_volume()),
            progress: GlobalProgress::load(),
            stamina_max: tuning.stamina_max,
            rare_score: tuning.rare_score,
        };
        presenter.show_screen(Screen::Loading);
        presenter.update_progress();

        let scene = JsScene {
            effects: settings.effects_enabled(),
        };
        let game = Rc::new(RefCell::new(Game {
            lifecycle: GameLifecycle::new(tuning, seed, scene, presenter),
            clock: FrameClock::default(),
            input: InputState::default(),
            settings,
            autopilot: false,
            pointer_locked: false,
        }));
        log::info!("Game initialized with seed: {}", seed);

        // Assets first; the menu appears when the engine says they're ready
        {
            let game = game.clone();
            let on_done = Closure::once_into_js(move || {
                let mut g = game.borrow_mut();
                g.lifecycle.finish_loading();
                g.clock.start();
                drop(g);
                request_animation_frame(game);
            });
            scene_load_assets(on_done.unchecked_ref());
        }

        setup_input_handlers(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_mute(game);

        log::info!("Climate Hero running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match g.input.set_key(&event.code(), true) {
                    Some(KeyBinding::Start) => g.start(),
                    Some(KeyBinding::ToggleAutopilot) => {
                        g.autopilot = !g.autopilot;
                        log::info!("Autopilot: {}", g.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.set_key(&event.code(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse look while pointer locked
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.pointer_locked {
                    return;
                }
                let (dx, dy) = g
                    .settings
                    .look_delta(event.movement_x() as f32, event.movement_y() as f32);
                let sensitivity = g.settings.mouse_sensitivity;
                g.lifecycle.look(dx, dy, sensitivity);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer lock change - Esc releases the lock: held keys are dropped and mouse
        // look pauses, but the round clock keeps running
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let locked = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.pointer_lock_element())
                    .is_some();
                let mut g = game.borrow_mut();
                g.pointer_locked = locked;
                if locked {
                    log::info!("Pointer lock ACQUIRED");
                } else {
                    log::info!("Pointer lock RELEASED");
                    g.input.clear();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["start-button", "restart-button"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().start();
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_mute(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        for (event, muted) in [("blur", true), ("focus", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.lifecycle.observer_mut().audio.set_muted(muted);
                }
                g.input.clear();
            });
            let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let Some(dt) = g.clock.frame(time) else {
                log::info!("Frame clock stopped");
                return;
            };
            g.update(dt);
        }
        scene_render();

        request_animation_frame(game);
    }

    /// The 2D click-the-trash page
    mod click_page {
        use super::*;
        use climate_hero::sim::clicker::ITEM_SIZE;
        use climate_hero::sim::RoundPhase;

        struct ClickPage {
            round: ClickRound,
            clock: FrameClock,
            container: Element,
            score_board: Option<Element>,
            start_button: Option<HtmlElement>,
            /// Item ids currently in the DOM
            shown: Vec<u32>,
        }

        impl ClickPage {
            fn update_score(&self) {
                if let Some(el) = &self.score_board {
                    el.set_text_content(Some(&format!("Points: {}", self.round.score())));
                }
            }

            fn set_start_visible(&self, visible: bool) {
                if let Some(btn) = &self.start_button {
                    let display = if visible { "inline-block" } else { "none" };
                    let _ = btn.style().set_property("display", display);
                }
            }

            /// Bring DOM images in line with the round's items
            fn sync_items(&mut self, document: &Document) {
                let live: Vec<u32> = self.round.items().iter().map(|i| i.id).collect();
                for id in self.shown.iter().filter(|id| !live.contains(id)) {
                    if let Ok(Some(el)) = self
                        .container
                        .query_selector(&format!("[data-trash-id=\"{id}\"]"))
                    {
                        el.remove();
                    }
                }
                for item in self.round.items().iter().filter(|i| !self.shown.contains(&i.id)) {
                    let Ok(img) = document.create_element("img") else { continue };
                    let _ = img.set_attribute("class", "trash-item");
                    let _ = img.set_attribute("src", &format!("assets/{}", item.sprite.file_name()));
                    let _ = img.set_attribute("data-trash-id", &item.id.to_string());
                    let _ = img.set_attribute(
                        "style",
                        &format!(
                            "left:{}px;top:{}px;width:{ITEM_SIZE}px;height:{ITEM_SIZE}px",
                            item.left, item.top
                        ),
                    );
                    let _ = self.container.append_child(&img);
                }
                self.shown = live;
            }
        }

        pub fn run(document: Document) {
            let Some(container) = document.get_element_by_id("game-container") else { return };
            let page = Rc::new(RefCell::new(ClickPage {
                round: ClickRound::new(js_sys::Date::now() as u64),
                clock: FrameClock::default(),
                container: container.clone(),
                score_board: document.get_element_by_id("score-board"),
                start_button: document
                    .get_element_by_id("startButton")
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
                shown: Vec::new(),
            }));
            page.borrow().update_score();

            // Clicks on trash (delegated)
            {
                let page = page.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    let id = event
                        .target()
                        .and_then(|t| t.dyn_into::<Element>().ok())
                        .and_then(|el| el.get_attribute("data-trash-id"))
                        .and_then(|id| id.parse::<u32>().ok());
                    if let Some(id) = id {
                        let mut p = page.borrow_mut();
                        if p.round.click(id) {
                            p.update_score();
                        }
                    }
                });
                let _ = container
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Start button
            if let Some(btn) = document.get_element_by_id("startButton") {
                let page = page.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let mut p = page.borrow_mut();
                    let board = Board {
                        width: p.container.client_width() as f32,
                        height: p.container.client_height() as f32,
                    };
                    p.round.start(board);
                    p.update_score();
                    p.set_start_visible(false);
                    let was_running = p.clock.is_running();
                    p.clock.start();
                    drop(p);
                    if !was_running {
                        frame(page.clone());
                    }
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        fn frame(page: Rc<RefCell<ClickPage>>) {
            let Some(window) = web_sys::window() else { return };
            let closure = Closure::once(move |time: f64| {
                let Some(document) = document() else { return };
                let mut p = page.borrow_mut();
                let Some(dt) = p.clock.frame(time) else { return };
                let finished = p.round.tick(dt, document.hidden());
                p.sync_items(&document);
                if let Some(score) = finished {
                    p.clock.stop();
                    p.set_start_visible(true);
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&format!(
                            "Time's up! Your final score was: {score}"
                        ));
                    }
                }
                let keep_going = p.round.phase() == RoundPhase::Running;
                drop(p);
                if keep_going {
                    frame(page);
                }
            });
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// The one-button global counter page
    mod counter_page {
        use super::*;

        fn render(document: &Document, progress: &GlobalProgress) {
            set_text(document, "trash-count", &progress.total.to_string());
            set_text(document, "progress-text", &ui::progress_text(progress));
            set_width_percent(document, "progress-bar", progress.fraction() * 100.0);
        }

        pub fn run(document: Document) {
            let progress = Rc::new(RefCell::new(GlobalProgress::load()));
            render(&document, &progress.borrow());

            let Some(btn) = document.get_element_by_id("collect-trash-btn") else { return };
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut p = progress.borrow_mut();
                let reward = p.add(1);
                p.save();
                render(&document, &p);
                if let Some(reward) = reward {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&format!(
                            "Congratulations! You reached {} points and earned a reward!",
                            reward.total
                        ));
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Climate Hero (native) starting...");
    log::info!("Native mode runs a headless autopilot round - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => climate_hero::Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    headless::run(tuning, seed);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<climate_hero::Tuning, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("can't read {path}: {e}"))?;
    climate_hero::Tuning::from_json(&json).map_err(|e| format!("bad tuning in {path}: {e}"))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use climate_hero::platform::time::NOMINAL_FRAME;
    use climate_hero::sim::autopilot;
    use climate_hero::sim::{GameLifecycle, GameObserver, GamePhase, HeadlessScene, RoundSummary};
    use climate_hero::{GlobalProgress, Tuning, ui};

    /// Logs what a player would see
    #[derive(Default)]
    struct SessionLog {
        pickups: u32,
        final_score: Option<u64>,
    }

    impl GameObserver for SessionLog {
        fn on_state_change(&mut self, phase: GamePhase, summary: RoundSummary) {
            log::info!("Screen: {:?}", ui::Screen::for_phase(phase));
            if phase == GamePhase::GameOver {
                self.final_score = Some(summary.final_score);
            }
        }

        fn on_score_feedback(&mut self, delta: u32) {
            self.pickups += 1;
            log::debug!("{}", ui::score_feedback_text(delta));
        }
    }

    pub fn run(tuning: Tuning, seed: u64) {
        let mut game = GameLifecycle::new(tuning, seed, HeadlessScene, SessionLog::default());
        game.finish_loading();
        game.start_game();

        let mut last_second = u32::MAX;
        while game.phase() == GamePhase::Playing {
            let input = autopilot::steer(game.state(), game.field(), game.tuning());
            game.tick(NOMINAL_FRAME, &input);
            game.collect_in_reach();

            let second = game.state().time_left as u32;
            if second % 10 == 0 && second != last_second {
                last_second = second;
                log::info!(
                    "{} left - score {} - stamina {:.0}%",
                    ui::format_clock(game.state().time_left),
                    game.state().score,
                    ui::stamina_percent(game.state().stamina, game.tuning().stamina_max)
                );
            }
        }

        let session = game.observer();
        let score = session.final_score.unwrap_or(game.state().score);
        let mut progress = GlobalProgress::new();
        progress.add(score);
        println!(
            "Round over: {} points from {} pickups ({} toward the next reward)",
            score,
            session.pickups,
            ui::progress_text(&progress)
        );
    }
}
