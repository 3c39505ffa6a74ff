//! Gapwing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gapwing::audio::AudioManager;
    use gapwing::consts::GROUND_HEIGHT;
    use gapwing::persistence::LocalStorageStore;
    use gapwing::renderer::CanvasRenderer;
    use gapwing::sim::{GamePhase, Playfield};
    use gapwing::{FrameDriver, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver<LocalStorageStore, AudioManager>,
        renderer: Option<CanvasRenderer>,
        settings: Settings,
        /// Phase shown by the DOM overlays, to touch the DOM only on change
        shown_phase: Option<GamePhase>,
        shown_score: Option<u32>,
        /// A requestAnimationFrame callback is pending
        loop_armed: bool,
    }

    impl Game {
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.driver.audio_mut().apply_settings(&self.settings);
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.driver.snapshot());
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let state = self.driver.state();
            let (phase, score, high_score) = (state.phase, state.score, state.high_score);

            if self.shown_score != Some(score) {
                if let Some(el) = document.get_element_by_id("score") {
                    el.set_text_content(Some(&score.to_string()));
                }
                self.shown_score = Some(score);
            }

            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            set_hidden(document, "start-screen", phase != GamePhase::Start);
            set_hidden(document, "game-over-screen", phase != GamePhase::GameOver);

            if phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&score.to_string()));
                }
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&high_score.to_string()));
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// Match the canvas backing store to its CSS size; returns the CSS size
    fn fit_canvas(canvas: &HtmlCanvasElement, dpr: f64) -> (f32, f32) {
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        canvas.set_width((client_w as f64 * dpr) as u32);
        canvas.set_height((client_h as f64 * dpr) as u32);
        (client_w as f32, client_h as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gapwing starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let (width, height) = fit_canvas(&canvas, dpr);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let driver = FrameDriver::new(
            seed,
            Tuning::load(),
            Playfield::new(width, height, GROUND_HEIGHT),
            LocalStorageStore,
            AudioManager::new(&settings),
        );

        let mut renderer = CanvasRenderer::new(&canvas);
        match renderer.as_mut() {
            Some(r) => r.set_scale(dpr),
            None => log::error!("2D canvas context unavailable"),
        }

        let game = Rc::new(RefCell::new(Game {
            driver,
            renderer,
            settings,
            shown_phase: None,
            shown_score: None,
            loop_armed: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_resize(canvas, game.clone());

        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud(&document);
        }

        log::info!("Gapwing running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - flap/start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().driver.trigger_impulse_or_start();
                arm_loop(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - flap/start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default(); // Stop scrolling
                game.borrow_mut().driver.trigger_impulse_or_start();
                arm_loop(&game);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        game.borrow_mut().driver.trigger_impulse_or_start();
                        arm_loop(&game);
                    }
                    "KeyM" => game.borrow_mut().toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.driver.restart() {
                    g.render();
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        g.update_hud(&document);
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let (width, height) = fit_canvas(&canvas, dpr);
            let mut g = game.borrow_mut();
            g.driver.resize(width, height);
            if let Some(renderer) = g.renderer.as_mut() {
                renderer.set_scale(dpr);
            }
            g.render();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start the frame loop if a run is in progress and no frame is pending
    fn arm_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_armed || !g.driver.is_running() {
                return;
            }
            g.loop_armed = true;
        }
        request_animation_frame(game.clone());
    }

    /// One display frame. Stops rescheduling itself once the run ends.
    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            g.driver.frame(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
            g.loop_armed = g.driver.is_running();
            g.loop_armed
        };

        if running {
            request_animation_frame(game);
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
    log::info!("Gapwing (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one scripted run headlessly and report how it went
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use gapwing::persistence::FileStore;
    use gapwing::platform::{FixedTickSource, SilentAudio};
    use gapwing::sim::Playfield;
    use gapwing::{FrameDriver, Tuning};

    let path = std::env::var_os("GAPWING_HIGH_SCORE")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("gapwing_high_score.json"));
    let mut driver = FrameDriver::new(
        1,
        Tuning::load(),
        Playfield::default(),
        FileStore::new(path),
        SilentAudio,
    );
    let mut source = FixedTickSource::per_step();
    let hover_y = Playfield::default().height / 2.0;

    driver.trigger_impulse_or_start();
    let mut frames = 0u32;
    while driver.is_running() && frames < 3_600 {
        if driver.state().avatar.pos.y > hover_y {
            driver.trigger_impulse_or_start();
        }
        driver.pump(&mut source);
        frames += 1;
    }

    let state = driver.state();
    println!(
        "Smoke run: {:?} after {} frames, score {} (best {}), {} gates on screen",
        state.phase,
        state.frame,
        state.score,
        state.high_score,
        state.obstacles.len()
    );
}
