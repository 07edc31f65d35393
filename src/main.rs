//! Hack Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(not(target_arch = "wasm32"))]
mod terminal;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use hack_dodge::renderer::{Palette, RenderState};
    use hack_dodge::sim::Direction;
    use hack_dodge::{App, Screen, Settings};

    /// Game instance holding all state
    struct Game {
        app: App,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Screen the DOM currently shows
        shown_screen: Option<Screen>,
    }

    impl Game {
        fn new(settings: Settings, canvas: HtmlCanvasElement) -> Self {
            Self {
                app: App::new(settings),
                render_state: None,
                canvas,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                shown_screen: None,
            }
        }

        /// Match canvas backing size and arena to the element's CSS size
        fn fit_canvas(&mut self) {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            let client_w = self.canvas.client_width().max(1);
            let client_h = self.canvas.client_height().max(1);
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
            // Arena is measured in CSS pixels, like the widget it sits in
            self.app.resize(client_w as f32, client_h as f32);
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            self.app.update(dt);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if self.app.screen() != Screen::Playing {
                return;
            }
            let palette = Palette::new(self.app.settings.high_contrast);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.app.sim(), &palette) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (width, height) = render_state.size();
                        render_state.resize(width, height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Show the DOM panel for the current screen and update the HUD
        fn update_dom(&mut self, document: &Document) {
            let screen = self.app.screen();
            if self.shown_screen != Some(screen) {
                set_visible(document, "menu", screen == Screen::Menu);
                set_visible(document, "game", screen == Screen::Playing);
                set_visible(document, "game-over", screen == Screen::GameOver);
                self.shown_screen = Some(screen);
                // Canvas has no layout size while hidden
                if screen == Screen::Playing {
                    self.fit_canvas();
                }
            }

            set_visible(document, "hud-fps", self.app.settings.show_fps);
            if self.app.settings.show_fps {
                if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hack Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(settings, canvas.clone())));
        game.borrow_mut().fit_canvas();

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (width, height) = (canvas.width(), canvas.height());
        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Static texts
        set_text(&document, "title", hack_dodge::app::text::TITLE);
        set_text(&document, "game-over-text", hack_dodge::app::text::GAME_OVER);

        setup_buttons(game.clone());
        setup_keyboard(game.clone());
        setup_resize(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Hack Dodge running!");
    }

    fn on_click(document: &Document, id: &str, game: Rc<RefCell<Game>>, f: fn(&mut App)) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                f(&mut game.borrow_mut().app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing #{} element", id);
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        on_click(&document, "start-btn", game.clone(), App::start_game);
        on_click(&document, "exit-btn", game.clone(), App::request_exit);
        on_click(&document, "back-btn", game.clone(), App::back_to_menu);
        on_click(&document, "left-btn", game.clone(), |app| app.command(Direction::Left));
        on_click(&document, "right-btn", game.clone(), |app| app.command(Direction::Right));
        on_click(&document, "up-btn", game.clone(), |app| app.command(Direction::Up));
        on_click(&document, "down-btn", game, |app| app.command(Direction::Down));
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            let direction = match event.key().as_str() {
                "ArrowLeft" | "a" | "A" => Some(Direction::Left),
                "ArrowRight" | "d" | "D" => Some(Direction::Right),
                "ArrowUp" | "w" | "W" => Some(Direction::Up),
                "ArrowDown" | "s" | "S" => Some(Direction::Down),
                _ => None,
            };
            if let Some(direction) = direction {
                event.prevent_default();
                g.app.command(direction);
                return;
            }
            match (g.app.screen(), event.key().as_str()) {
                (Screen::Menu, "Enter") => g.app.start_game(),
                (Screen::GameOver, "Enter" | "Escape") => g.app.back_to_menu(),
                (_, "f" | "F") => {
                    g.app.toggle_fps();
                    log::info!("FPS counter: {}", g.app.settings.show_fps);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_canvas();
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

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let document = web_sys::window().unwrap().document().unwrap();
        {
            let mut g = game.borrow_mut();

            if g.app.should_exit() {
                set_visible(&document, "menu", false);
                set_visible(&document, "game", false);
                set_visible(&document, "game-over", false);
                set_visible(&document, "goodbye", true);
                log::info!("Stopped");
                return;
            }

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                hack_dodge::consts::SIM_DT
            };
            g.last_time = time;

            g.update_dom(&document);
            g.update(dt, time);
            g.render();
        }

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
    env_logger::init();
    log::info!("Hack Dodge (terminal) starting...");

    let settings = hack_dodge::Settings::load();
    let mut app = hack_dodge::App::new(settings);

    if let Err(e) = terminal::run(&mut app) {
        log::error!("Terminal error: {}", e);
        eprintln!("hack-dodge: {}", e);
        std::process::exit(1);
    }
    log::info!("Bye");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
