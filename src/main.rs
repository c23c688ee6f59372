//! Sky Gates entry point
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

    use sky_gates::audio::{AudioManager, SoundEffect};
    use sky_gates::platform::{Action, FrameClock, InputRouter, Presenter, key_action, present};
    use sky_gates::renderer::{RenderState, build_scene};
    use sky_gates::sim::{EndCause, GamePhase, GameState, Pace, Snapshot, tick};
    use sky_gates::{Settings, Tuning};

    /// Browser presentation: WebGPU canvas, Web Audio and DOM HUD
    struct WebPresenter {
        render_state: Option<RenderState>,
        audio: AudioManager,
        document: Document,
        last_score: Option<u32>,
        last_phase: Option<GamePhase>,
    }

    impl WebPresenter {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }

        /// Update HUD elements in DOM (only when something changed)
        fn update_hud(&mut self, snapshot: &Snapshot<'_>) {
            if self.last_score != Some(snapshot.score) {
                self.set_text("score", &snapshot.score.to_string());
                self.last_score = Some(snapshot.score);
            }
            if self.last_phase != Some(snapshot.phase) {
                self.set_visible("start-prompt", snapshot.phase == GamePhase::Idle);
                self.set_visible("game-over", snapshot.phase == GamePhase::Ended);
                self.last_phase = Some(snapshot.phase);
            }
        }
    }

    impl Presenter for WebPresenter {
        fn render(&mut self, snapshot: &Snapshot<'_>) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(snapshot);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            self.update_hud(snapshot);
        }

        fn on_impulse(&mut self) {
            self.audio.play(SoundEffect::Flap);
        }

        fn on_score(&mut self, _score: u32) {
            self.audio.play(SoundEffect::Score);
        }

        fn on_difficulty(&mut self, pace: Pace) {
            log::info!("Speed up: {:.0} px/s", pace.speed);
            self.audio.play(SoundEffect::LevelUp);
        }

        fn on_run_end(&mut self, final_score: u32, cause: EndCause) {
            log::info!("Run over ({:?}), score {}", cause, final_score);
            self.audio.play(SoundEffect::Hit);
            self.set_text("final-score", &final_score.to_string());
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        presenter: WebPresenter,
        router: InputRouter,
        clock: FrameClock,
        settings: Settings,
    }

    impl Game {
        fn handle_action(&mut self, action: Action) {
            match action {
                Action::Primary => {
                    // Browsers only allow audio after a user gesture
                    self.presenter.audio.resume();
                    self.router.primary(self.state.phase);
                }
                Action::ToggleDemo => {
                    let on = !self.router.demo_mode();
                    self.router.set_demo_mode(on);
                    log::info!("Demo mode: {}", on);
                }
                Action::TogglePreserve => {
                    self.settings.preserve_difficulty = !self.settings.preserve_difficulty;
                    self.router.preserve_difficulty = self.settings.preserve_difficulty;
                    self.settings.save();
                    log::info!(
                        "Restarts keep difficulty: {}",
                        self.settings.preserve_difficulty
                    );
                }
                Action::ToggleMute => {
                    self.settings.muted = !self.settings.muted;
                    self.presenter.audio.set_muted(self.settings.muted);
                    self.settings.save();
                }
            }
        }

        /// One animation frame: tick with the collected input, then present
        fn frame(&mut self, time: f64) {
            let dt = self.clock.advance(time);
            let input = self.router.take();
            tick(&mut self.state, &input, dt);
            present(&mut self.state, &mut self.presenter);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky Gates starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::default();
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let state = GameState::new(tuning.clone(), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);

        let render_state = init_renderer(
            canvas.clone(),
            width,
            height,
            (tuning.field_width, tuning.field_height),
        )
        .await;

        let game = Rc::new(RefCell::new(Game {
            state,
            presenter: WebPresenter {
                render_state,
                audio: AudioManager::new(&settings),
                document: document.clone(),
                last_score: None,
                last_phase: None,
            },
            router: InputRouter::new(settings.preserve_difficulty),
            clock: FrameClock::new(tuning.max_frame_dt),
            settings,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_focus_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Sky Gates running!");
        Ok(())
    }

    /// WebGPU setup; the game keeps running (HUD and audio only) without it
    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
        field: (f32, f32),
    ) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::warn!("Failed to create surface: {}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::warn!("No GPU adapter, rendering disabled: {}", e);
                return None;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, field).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::warn!("Rendering disabled: {}", e);
                None
            }
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().handle_action(Action::Primary);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().handle_action(Action::Primary);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(action) = key_action(&event.key()) {
                    if action == Action::Primary {
                        event.prevent_default();
                    }
                    game.borrow_mut().handle_action(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Tab hidden: drop the frame reference so the next frame starts fresh
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().clock.reset();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur / focus: optional mute
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.presenter.audio.set_muted(true);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.presenter.audio.set_muted(muted);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Sky Gates failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use sky_gates::Tuning;
    use sky_gates::platform::{InputRouter, LogPresenter, present};
    use sky_gates::sim::{GameState, tick};

    /// Headless Sky Gates: the autopilot plays runs at a fixed frame rate
    #[derive(Parser, Debug)]
    #[command(name = "sky-gates", version, about)]
    pub struct Args {
        /// RNG seed for obstacle gaps
        #[arg(long, default_value_t = 1)]
        pub seed: u64,

        /// Number of runs to play
        #[arg(long, default_value_t = 5)]
        pub runs: usize,

        /// Simulated-time budget per run, in seconds
        #[arg(long, default_value_t = 300.0)]
        pub seconds: f32,

        /// Simulated frame rate
        #[arg(long, default_value_t = 60.0)]
        pub fps: f32,

        /// JSON file overriding tuning values
        #[arg(long)]
        pub tuning: Option<PathBuf>,

        /// Restarts keep the difficulty reached in the previous run
        #[arg(long)]
        pub preserve_difficulty: bool,
    }

    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        if !(args.fps.is_finite() && args.fps > 0.0) {
            return Err(format!("--fps must be positive (got {})", args.fps).into());
        }

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let mut state = GameState::new(tuning, args.seed)?;
        let mut presenter = LogPresenter::new();
        let mut router = InputRouter::new(args.preserve_difficulty);
        router.set_demo_mode(true);

        let dt = 1.0 / args.fps;
        let frame_budget = (args.seconds * args.fps).ceil() as u64 * args.runs as u64;
        log::info!(
            "Playing {} runs (seed {}, {} fps)",
            args.runs,
            args.seed,
            args.fps
        );

        while presenter.records.len() < args.runs && presenter.frames < frame_budget {
            let input = router.take();
            tick(&mut state, &input, dt);
            present(&mut state, &mut presenter);
        }

        if presenter.records.len() < args.runs {
            log::warn!(
                "Frame budget exhausted after {} runs; run {} still alive with {} points",
                presenter.records.len(),
                state.runs,
                state.score
            );
        }

        for record in &presenter.records {
            println!(
                "run {:>3}: {:>4} points  {:?}  top speed {:.0}",
                record.run, record.score, record.cause, record.top_speed
            );
        }
        if let (Some(best), Some(mean)) = (presenter.best_score(), presenter.mean_score()) {
            println!("best {}  mean {:.1}", best, mean);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sky Gates (native, headless) starting...");
    headless::run(headless::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
