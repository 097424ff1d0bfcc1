//! Pon-Gopher entry point
//!
//! Web: WebGPU canvas with a DOM text overlay, driven by requestAnimationFrame.
//! Native: a headless autopilot match rendered to ASCII.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use pon_gopher::clock::{FixedStep, FpsCounter};
    use pon_gopher::consts::*;
    use pon_gopher::input::{InputSource, Key, KeyState};
    use pon_gopher::renderer::RenderState;
    use pon_gopher::scene::{Palette, Renderer, Scene, TextStyle};
    use pon_gopher::sim::{GameEvent, GameState, tick};
    use pon_gopher::{Settings, StartupError};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        keys: KeyState,
        render_state: Option<RenderState>,
        clock: FixedStep,
        fps: FpsCounter,
        last_time: f64,
        /// Overlay markup last written, to skip redundant DOM updates
        overlay_html: String,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                state: GameState::new(),
                settings,
                keys: KeyState::new(),
                render_state: None,
                clock: FixedStep::new(),
                fps: FpsCounter::new(),
                last_time: 0.0,
                overlay_html: String::new(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            for _ in 0..self.clock.advance(dt) {
                // Polling consumes one-shot presses, so start fires once
                let input = self.keys.poll(&self.state);
                tick(&mut self.state, &input, SIM_DT);
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::PhaseChanged { .. } => {}
                    other => log::debug!("{:?}", other),
                }
            }

            self.fps.record(time);
        }

        /// Render the current frame
        fn render(&mut self) {
            let mut scene = Scene::build(&self.state, &self.settings);
            if self.settings.show_fps {
                scene.push_fps(self.fps.fps(), &Palette::for_settings(&self.settings));
            }

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
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

            self.update_overlay(&scene);
        }

        /// Mirror the scene's text into the DOM overlay
        fn update_overlay(&mut self, scene: &Scene) {
            let html = overlay_markup(scene, self.settings.window_scale as f32);
            if html == self.overlay_html {
                return;
            }

            let overlay = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("overlay"));
            if let Some(el) = overlay {
                el.set_inner_html(&html);
                self.overlay_html = html;
            }
        }

        /// Handle keys that change settings rather than the game
        fn settings_key(&mut self, code: &str) -> bool {
            match code {
                "KeyF" => self.settings.show_fps = !self.settings.show_fps,
                "KeyC" => self.settings.high_contrast = !self.settings.high_contrast,
                "KeyM" => self.settings.reduced_motion = !self.settings.reduced_motion,
                _ => return false,
            }
            self.settings.save();
            log::info!("Settings: {:?}", self.settings);
            true
        }
    }

    /// Absolutely positioned lines, centred, baseline at the command's y.
    /// `scale` is CSS pixels per logical pixel.
    fn overlay_markup(scene: &Scene, scale: f32) -> String {
        let mut html = String::new();
        for (text, style, y, color) in scene.texts() {
            let class = match style {
                TextStyle::Title => "title",
                TextStyle::Body => "body",
            };
            let top = (y - style.size()) * scale;
            let size = style.size() * scale;
            html.push_str(&format!(
                "<div class=\"{}\" style=\"top:{:.0}px;font-size:{:.0}px;color:rgb({},{},{})\">{}</div>",
                class,
                top,
                size,
                (color[0] * 255.0) as u8,
                (color[1] * 255.0) as u8,
                (color[2] * 255.0) as u8,
                escape_html(text),
            ));
        }
        html
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    pub async fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Pon-Gopher starting...");

        let settings = Settings::load();
        let window = web_sys::window().ok_or(StartupError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(StartupError::MissingElement("document"))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }
        document.set_title(WINDOW_TITLE);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(StartupError::MissingElement("canvas"))?;

        // Size the canvas to the integer scale, backing store at device pixels
        let (css_w, css_h) = settings.window_size();
        let _ = canvas.set_attribute("style", &format!("width:{}px;height:{}px", css_w, css_h));
        let dpr = window.device_pixel_ratio();
        let width = (css_w as f64 * dpr) as u32;
        let height = (css_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Pon-Gopher running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let mut g = game.borrow_mut();
                if let Some(key) = Key::from_code(&code) {
                    // Keep space/arrows from scrolling the page
                    event.prevent_default();
                    g.keys.press(key);
                } else if !event.repeat() {
                    g.settings_key(&code);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().keys.release(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Losing focus swallows keyup events; drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
                log::debug!("Window blurred, keys released");
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use pon_gopher::Settings;
    use pon_gopher::headless::{self, RunLimits};
    use pon_gopher::input::Autopilot;
    use pon_gopher::renderer::AsciiRenderer;
    use pon_gopher::sim::GameState;

    env_logger::init();
    log::info!("Pon-Gopher (native) starting...");
    log::info!("Native mode runs a headless autopilot match - run with `trunk serve` to play");

    // An explicit settings path must load; the env var path falls back quietly
    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load_file(std::path::Path::new(&path))
            .with_context(|| format!("loading settings from {}", path.to_string_lossy()))?,
        None => Settings::load(),
    };

    let mut state = GameState::new();
    let mut pilot = Autopilot::new();
    let mut ascii = AsciiRenderer::default();

    let summary = headless::run(
        &mut state,
        &mut pilot,
        &mut ascii,
        &settings,
        RunLimits::default(),
    );

    println!("{}", ascii.frame());
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serializing run summary")?
    );
    Ok(())
}
