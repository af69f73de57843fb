//! Grid Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use grid_snake::renderer::{RenderState, RendererError};
    use grid_snake::sim::RunState;
    use grid_snake::{App, Command, Settings};

    const BUTTON_IDS: [&str; 3] = ["start-btn", "pause-btn", "reset-btn"];

    /// Game instance holding all state
    struct Game {
        app: App,
        render_state: Option<RenderState>,
        /// Draw on the next frame even if the board did not change
        needs_redraw: bool,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                app: App::new(settings, seed),
                render_state: None,
                needs_redraw: true,
            }
        }

        /// Input, ticks and drawing for one animation frame
        fn frame(&mut self, time: f64) {
            let report = self.app.frame(time);
            if report.game_over() {
                log::info!("Final score: {}", self.app.state().score());
            }
            if report.dirty || self.needs_redraw {
                self.needs_redraw = false;
                self.render();
                self.update_hud();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = self.app.snapshot();
            let show_grid = self.app.settings().show_grid;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.draw(&snapshot, show_grid) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (width, height) = render_state.size();
                        render_state.resize(width, height);
                        self.needs_redraw = true;
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update score, overlay and pause label in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snapshot = self.app.snapshot();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("overlay") {
                match snapshot.overlay {
                    Some(overlay) => {
                        el.set_text_content(Some(overlay.text()));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            if let Some(el) = document.get_element_by_id("pause-btn") {
                el.set_text_content(Some(self.app.pause_label()));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Grid Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        // Store the effective settings so they can be edited in place
        settings.save();
        let (width, height) = settings.canvas_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let board = (settings.grid_width, settings.grid_height);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match init_renderer(&instance, canvas, width, height, board).await {
            Ok(render_state) => {
                let mut g = game.borrow_mut();
                g.render_state = Some(render_state);
                g.needs_redraw = true;
            }
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Grid Snake running!");
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
        board: (i32, i32),
    ) -> Result<RenderState, RendererError> {
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, board).await
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(cmd) = Command::from_key(&event.key()) {
                // Arrows and space would otherwise scroll the page
                event.prevent_default();
                game.borrow_mut().app.command(cmd);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in BUTTON_IDS {
            let (Some(btn), Some(cmd)) = (document.get_element_by_id(id), Command::from_button(id))
            else {
                log::warn!("Button #{} missing", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().app.command(cmd);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pause when the tab is hidden or the window loses focus
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Tab switch or minimize
        if let Some(document) = window.document() {
            let game = game.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                    pause(&game, "tab hidden");
                }
            });
            let _ = document
                .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click outside the page
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            pause(&game, "window blur");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Queue a pause that a pending toggle cannot undo
    fn pause(game: &Rc<RefCell<Game>>, reason: &str) {
        let mut g = game.borrow_mut();
        if g.app.state().run_state() == RunState::Running {
            log::info!("Auto-paused ({})", reason);
        }
        g.app.command(Command::Pause);
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
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use grid_snake::{App, Settings};

    env_logger::init();
    log::info!("Grid Snake (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let app = App::new(settings, seed);

    print!("{}", app.snapshot().to_ascii());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
