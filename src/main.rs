//! Cat Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use cat_snake::context::Context;
    use cat_snake::platform::key_codes;
    use cat_snake::platform::web::{self, CanvasSurface, ImageTable, PerformanceClock, WebSound};
    use cat_snake::renderer::ImageHandle;
    use cat_snake::screens::ShellRequest;
    use cat_snake::sim::Viewport;
    use cat_snake::{App, GameConfig};

    /// Game instance holding all state
    struct Game {
        app: App,
        surface: CanvasSurface,
        /// An animation frame is already requested
        frame_scheduled: bool,
    }

    #[derive(Clone, Copy)]
    enum Channel {
        Sfx,
        Music,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cat Snake starting...");
        if let Err(e) = start() {
            log::error!("Startup failed: {:?}", e);
        }
    }

    fn start() -> Result<(), JsValue> {
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

        // Canvas fills the window
        let width = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
        let height = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let viewport = Viewport::new(width, height);

        let config = match canvas.get_attribute("data-config") {
            Some(json) => GameConfig::from_json(&json),
            None => Ok(GameConfig::default()),
        };
        let seed = js_sys::Date::now() as u64;
        let app = config.and_then(|config| {
            App::new(config, viewport, Box::new(PerformanceClock::new()), seed)
        });
        let app = match app {
            Ok(app) => app,
            Err(e) => {
                log::error!("{}", e);
                let _ = window.alert_with_message(&e.user_message());
                return Ok(());
            }
        };

        let ctx2d: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        let images: ImageTable = Rc::new(RefCell::new(Vec::new()));
        let surface = CanvasSurface::new(ctx2d, Vec2::new(width, height), images.clone());

        let game = Rc::new(RefCell::new(Game {
            app,
            surface,
            frame_scheduled: false,
        }));
        log::info!("Game initialized with seed: {}", seed);

        load_images(&game, &images)?;
        load_sounds(&game, Channel::Sfx)?;
        load_sounds(&game, Channel::Music)?;

        setup_input_handlers(&canvas, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Cat Snake running!");
        Ok(())
    }

    fn load_images(game: &Rc<RefCell<Game>>, images: &ImageTable) -> Result<(), JsValue> {
        let names: Vec<String> = {
            let g = game.borrow();
            g.app.ctx.config.assets.images().iter().map(|n| n.to_string()).collect()
        };

        for name in names {
            let element = HtmlImageElement::new()?;
            let handle = {
                let mut table = images.borrow_mut();
                table.push(element.clone());
                ImageHandle((table.len() - 1) as u32)
            };
            game.borrow_mut().app.ctx.images.begin_load(&name);

            {
                let game = game.clone();
                let name = name.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    game.borrow_mut().app.ctx.images.insert(&name, handle);
                });
                element.set_onload(Some(closure.as_ref().unchecked_ref()));
                closure.forget();
            }
            {
                let game = game.clone();
                let name = name.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    game.borrow_mut()
                        .app
                        .ctx
                        .images
                        .fail(&name, "image failed to load");
                });
                element.set_onerror(Some(closure.as_ref().unchecked_ref()));
                closure.forget();
            }

            element.set_src(&web::image_url(&name));
        }
        Ok(())
    }

    fn sound_names(ctx: &Context, channel: Channel) -> Vec<String> {
        let names = match channel {
            Channel::Sfx => ctx.config.assets.sfx(),
            Channel::Music => ctx.config.assets.music(),
        };
        names.iter().map(|n| n.to_string()).collect()
    }

    fn load_sounds(game: &Rc<RefCell<Game>>, channel: Channel) -> Result<(), JsValue> {
        let names = sound_names(&game.borrow().app.ctx, channel);

        for name in names {
            let url = match channel {
                Channel::Sfx => web::sfx_url(&name),
                Channel::Music => web::music_url(&name),
            };
            let element = HtmlAudioElement::new_with_src(&url)?;
            element.set_preload("auto");
            {
                let mut g = game.borrow_mut();
                match channel {
                    Channel::Sfx => g.app.ctx.sfx.registry_mut().begin_load(&name),
                    Channel::Music => g.app.ctx.music.registry_mut().begin_load(&name),
                }
            }

            // canplaythrough fires again after seeks; only the first one registers
            {
                let game = game.clone();
                let name = name.clone();
                let audio = element.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    let mut g = game.borrow_mut();
                    let ctx = &mut g.app.ctx;
                    let sound = Box::new(WebSound::new(audio.clone()));
                    match channel {
                        Channel::Sfx if !ctx.sfx.registry_mut().contains(&name) => {
                            ctx.sfx.add(&name, sound)
                        }
                        Channel::Music if !ctx.music.registry_mut().contains(&name) => {
                            ctx.music.add(&name, sound)
                        }
                        _ => {}
                    }
                });
                element.add_event_listener_with_callback(
                    "canplaythrough",
                    closure.as_ref().unchecked_ref(),
                )?;
                closure.forget();
            }
            {
                let game = game.clone();
                let name = name.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    let mut g = game.borrow_mut();
                    let registry = match channel {
                        Channel::Sfx => g.app.ctx.sfx.registry_mut(),
                        Channel::Music => g.app.ctx.music.registry_mut(),
                    };
                    registry.fail(&name, "sound failed to load");
                });
                element.set_onerror(Some(closure.as_ref().unchecked_ref()));
                closure.forget();
            }
        }
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let request = game.borrow_mut().app.pointer_pressed();
                execute(&game, request);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Suppress the emulated mousedown that would follow
                event.prevent_default();
                let request = game.borrow_mut().app.pointer_pressed();
                execute(&game, request);
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.key_code();
                if matches!(
                    code,
                    key_codes::UP | key_codes::DOWN | key_codes::LEFT | key_codes::RIGHT
                ) {
                    // Keep arrows from scrolling the page
                    event.prevent_default();
                }
                let request = game.borrow_mut().app.key_pressed(code);
                execute(&game, request);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Carry out what the app asked of the page
    fn execute(game: &Rc<RefCell<Game>>, request: Option<ShellRequest>) {
        let Some(request) = request else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        match request {
            ShellRequest::Alert(message) => {
                let _ = window.alert_with_message(&message);
            }
            ShellRequest::CloseWindow => {
                log::info!("Closing window");
                let _ = window.close();
            }
            // The loop stops on its own once the app reports it is not running
            ShellRequest::PauseLoop => {}
            ShellRequest::ResumeLoop => request_animation_frame(game.clone()),
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.frame_scheduled {
                return;
            }
            g.frame_scheduled = true;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| game_loop(game));
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let (request, running) = {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            g.frame_scheduled = false;
            let request = g.app.frame(&mut g.surface);
            (request, g.app.is_running())
        };
        execute(&game, request);
        if running {
            request_animation_frame(game);
        }
    }
}

/// Native headless demo: a greedy autopilot plays one run
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use cat_snake::platform::{HeadlessSurface, ManualClock, SilentSound, key_codes};
    use cat_snake::renderer::ImageHandle;
    use cat_snake::screens::Screen;
    use cat_snake::sim::{Direction, Game, Viewport};
    use cat_snake::{App, GameConfig, Result};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Five minutes of frames
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    pub fn run(seed: u64) -> Result<u32> {
        let clock = ManualClock::new(0.0);
        let mut app = App::new(
            GameConfig::default(),
            Viewport::new(1280.0, 720.0),
            Box::new(clock.clone()),
            seed,
        )?;
        stock_assets(&mut app);

        let mut surface = HeadlessSurface::new();
        app.pointer_pressed();
        app.key_pressed(key_codes::ENTER);

        for frame in 0..MAX_FRAMES {
            clock.advance(FRAME_MS);
            let code = match app.screens.active() {
                Some(Screen::Gameplay(screen)) => screen.game().and_then(choose_key),
                Some(Screen::GameOver(screen)) => {
                    log::info!("{} (after {} frames)", screen.message(), frame);
                    return Ok(screen.score());
                }
                _ => None,
            };
            if let Some(code) = code {
                app.key_pressed(code);
            }
            if let Some(request) = app.frame(&mut surface) {
                log::warn!("Unhandled shell request: {:?}", request);
            }
            if app.is_halted() {
                break;
            }
            surface.clear();
        }

        let score = match app.screens.active() {
            Some(Screen::Gameplay(screen)) => screen.game().map(|g| g.score).unwrap_or(0),
            _ => 0,
        };
        log::info!("Autoplay stopped with the snake still alive");
        Ok(score)
    }

    /// Register placeholder assets so nothing waits on loads
    fn stock_assets(app: &mut App) {
        let assets = app.ctx.config.assets.clone();
        for (i, name) in assets.images().iter().enumerate() {
            app.ctx.images.insert(name, ImageHandle(i as u32));
        }
        for name in assets.sfx() {
            app.ctx.sfx.add(name, Box::new(SilentSound::default()));
        }
        for name in assets.music() {
            app.ctx.music.add(name, Box::new(SilentSound::default()));
        }
    }

    /// Greedy step toward the food that doesn't immediately crash
    fn choose_key(game: &Game) -> Option<u32> {
        let snake = &game.snake;
        let head = snake.head();
        let target = game.food.position;
        let distance = |dir: Direction| {
            let next = head.step(dir);
            (next.x - target.x).abs() + (next.y - target.y).abs()
        };

        let dir = Direction::ALL
            .into_iter()
            .filter(|&dir| dir != snake.direction().opposite())
            .filter(|&dir| {
                let next = head.step(dir);
                next.in_bounds(game.grid_size()) && !snake.occupies(next)
            })
            .min_by_key(|&dir| distance(dir))?;

        if dir == snake.heading() {
            return None;
        }
        Some(match dir {
            Direction::Up => key_codes::UP,
            Direction::Down => key_codes::DOWN,
            Direction::Left => key_codes::LEFT,
            Direction::Right => key_codes::RIGHT,
        })
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
    log::info!("Cat Snake (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    match autoplay::run(seed) {
        Ok(score) => println!("Autoplay finished with score {}", score),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
