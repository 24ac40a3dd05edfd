//! Lane Runner entry point
//!
//! In the browser this wires the canvas, DOM HUD and keyboard to a shared
//! `Game`. Natively it runs headless autopilot rounds and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use lane_runner::hud::{HudSink, HudSnapshot, Overlay};
    use lane_runner::renderer::RenderState;
    use lane_runner::sim::{KeyEvent, Viewport};
    use lane_runner::{Game, Settings};

    /// HUD backed by DOM text fields
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl HudSink for DomHud {
        fn show_stats(&mut self, hud: &HudSnapshot) {
            self.set_text("score", &hud.score.to_string());
            self.set_text("time", &hud.time.to_string());
            self.set_text("lives", &hud.lives.to_string());
        }

        fn show_overlay(&mut self, overlay: Option<&Overlay>) {
            let Some(el) = self.document.get_element_by_id("overlay") else {
                return;
            };
            match overlay {
                Some(overlay) => {
                    self.set_text("overlay-title", overlay.title);
                    self.set_text("overlay-briefing", overlay.briefing.as_deref().unwrap_or(""));
                    let _ = el.class_list().remove_1("hidden");
                }
                None => {
                    let _ = el.class_list().add_1("hidden");
                }
            }
        }
    }

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        hud: DomHud,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        /// A frame is already requested
        looping: bool,
    }

    impl App {
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.game.state) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Size the canvas backing store and return the matching viewport
        fn fit_canvas(&self) -> Viewport {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            self.canvas.set_width(width.max(1));
            self.canvas.set_height(height.max(1));
            Viewport::new(width as f32, height as f32)
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Lane Runner starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> on the page");
            return;
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;

        let mut app = App {
            game: Game::new(settings, Viewport::default(), seed),
            hud: DomHud { document },
            render_state: None,
            canvas: canvas.clone(),
            looping: false,
        };
        let viewport = app.fit_canvas();
        app.game.resize(viewport);

        match RenderState::for_canvas(canvas, viewport.width as u32, viewport.height as u32).await
        {
            Ok(render_state) => app.render_state = Some(render_state),
            // The HUD and simulation still work without a canvas
            Err(e) => log::error!("WebGPU unavailable: {e}"),
        }

        let app = Rc::new(RefCell::new(app));

        setup_keyboard(app.clone());
        setup_buttons(app.clone());
        setup_resize(app.clone());

        // Idle scene until the first start
        app.borrow_mut().render();

        log::info!("Lane Runner ready");
    }

    /// Start the frame loop if the game needs it and none is pending
    fn ensure_loop(app: &Rc<RefCell<App>>) {
        let mut a = app.borrow_mut();
        if !a.looping {
            a.looping = true;
            drop(a);
            request_animation_frame(app.clone());
        }
    }

    fn start(app: &Rc<RefCell<App>>) {
        let started = {
            let mut a = app.borrow_mut();
            let App { game, hud, .. } = &mut *a;
            game.start(hud)
        };
        if started {
            ensure_loop(app);
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (name, down) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let key = if down {
                    KeyEvent::Down(&code)
                } else {
                    KeyEvent::Up(&code)
                };
                if down && code == "Space" {
                    // Keep the page from scrolling
                    event.prevent_default();
                }
                let started = {
                    let mut a = app.borrow_mut();
                    let App { game, hud, .. } = &mut *a;
                    game.handle_key(key, hud)
                };
                if started {
                    ensure_loop(&app);
                }
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    start(&app);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            let viewport = a.fit_canvas();
            a.game.resize(viewport);
            if let Some(ref mut render_state) = a.render_state {
                render_state.resize(viewport.width as u32, viewport.height as u32);
            }
            if !a.looping {
                a.render();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let schedule_next = {
            let mut a = app.borrow_mut();
            let frame = {
                let App { game, hud, .. } = &mut *a;
                game.frame(time, hud)
            };
            a.render();
            a.looping = frame.schedule_next;
            frame.schedule_next
        };

        if schedule_next {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use lane_runner::hud::{HudSink, HudSnapshot, Overlay};
    use lane_runner::sim::{GameEvent, Outcome, Viewport};
    use lane_runner::{Game, Settings};

    /// Play autopilot rounds without a window and print a JSON summary
    #[derive(Parser, Debug)]
    #[command(name = "lane-runner", version, about)]
    pub struct Args {
        /// Settings JSON file (defaults are used when omitted)
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Number of rounds to play
        #[arg(long, default_value_t = 1)]
        pub rounds: u32,

        /// Seed for the first round (overrides the config file)
        #[arg(long)]
        pub seed: Option<u64>,

        /// Simulated frame length in milliseconds
        #[arg(long, default_value_t = 16.0)]
        pub frame_ms: f64,

        /// Viewport width in pixels
        #[arg(long, default_value_t = 1280.0)]
        pub width: f32,

        /// Viewport height in pixels
        #[arg(long, default_value_t = 720.0)]
        pub height: f32,
    }

    /// HUD that only logs the end banner
    struct LogHud;

    impl HudSink for LogHud {
        fn show_stats(&mut self, _hud: &HudSnapshot) {}

        fn show_overlay(&mut self, overlay: Option<&Overlay>) {
            if let Some(overlay) = overlay {
                log::info!("{}", overlay.title);
                if let Some(briefing) = &overlay.briefing {
                    log::info!("{briefing}");
                }
            }
        }
    }

    #[derive(Debug, Serialize)]
    struct RoundSummary {
        round: u32,
        seed: u64,
        /// None when the frame budget ran out first
        outcome: Option<Outcome>,
        #[serde(flatten)]
        hud: HudSnapshot,
        elapsed_ms: f64,
        obstacles_spawned: u32,
        obstacles_destroyed: u32,
    }

    fn load_settings(args: &Args) -> Result<Settings> {
        let mut settings = match &args.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Settings::from_json(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Settings::default(),
        };
        if args.seed.is_some() {
            settings.seed = args.seed;
        }
        Ok(settings)
    }

    pub fn run(args: Args) -> Result<()> {
        anyhow::ensure!(args.frame_ms > 0.0, "--frame-ms must be positive");
        anyhow::ensure!(
            args.width > 0.0 && args.height > 0.0,
            "viewport must be non-empty"
        );

        let settings = load_settings(&args)?;
        let max_round_frames = (settings.round_ms() / args.frame_ms).ceil() as u64 + 2;

        let clock_seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let mut game = Game::new(settings, Viewport::new(args.width, args.height), clock_seed);
        game.idle_mode = true;
        let mut hud = LogHud;
        let mut summaries = Vec::new();
        let mut now = 0.0;

        for _ in 0..args.rounds {
            game.start(&mut hud);
            let mut summary = RoundSummary {
                round: game.state.rounds_started,
                seed: game.state.seed,
                outcome: None,
                hud: HudSnapshot::from_state(&game.state),
                elapsed_ms: 0.0,
                obstacles_spawned: 0,
                obstacles_destroyed: 0,
            };

            // The first frame after a start has no delta
            game.frame(now, &mut hud);
            for _ in 0..max_round_frames {
                now += args.frame_ms;
                let frame = game.frame(now, &mut hud);
                for event in &frame.events {
                    match event {
                        GameEvent::ObstacleSpawned { .. } => summary.obstacles_spawned += 1,
                        GameEvent::ObstacleDestroyed { .. } => summary.obstacles_destroyed += 1,
                        GameEvent::RoundEnded(outcome) => summary.outcome = Some(*outcome),
                        GameEvent::PlayerHit { .. } => {}
                    }
                }
                if !frame.schedule_next {
                    break;
                }
            }

            summary.hud = HudSnapshot::from_state(&game.state);
            summary.elapsed_ms = game.state.elapsed_ms;
            summaries.push(summary);
        }

        let json = serde_json::to_string_pretty(&summaries).context("serializing summary")?;
        println!("{json}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Lane Runner (native) starting...");
    headless::run(headless::Args::parse())
}
