//! Catch the Heat entry point
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
    use web_sys::{HtmlCanvasElement, HtmlElement, HtmlInputElement, MouseEvent, TouchEvent};

    use catch_the_heat::audio::{self, AudioSink, WebAudio};
    use catch_the_heat::platform::{InputSource, PointerSample, client_to_field};
    use catch_the_heat::renderer::{CanvasRenderer, Renderer};
    use catch_the_heat::sim::{GameEvent, Session, SessionPhase};
    use catch_the_heat::{CatcherSkin, Settings, Tuning, share_message};

    #[wasm_bindgen(inline_js = "
        export function share_score(text) {
            if (!navigator.share) {
                return false;
            }
            navigator
                .share({ title: 'Catch the Heat!', text, url: window.location.href })
                .catch(e => console.log('Error sharing:', e));
            return true;
        }
    ")]
    extern "C" {
        fn share_score(text: &str) -> bool;
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: Option<CanvasRenderer>,
        audio: WebAudio,
        pointer: PointerSample,
        settings: Settings,
        /// `#loading` stays up until the sprites settle
        loading: bool,
    }

    impl Game {
        /// Run one simulation tick and hand its events to the collaborators
        fn update(&mut self) {
            if let Some(pos) = self.pointer.sample() {
                self.session.set_pointer(pos.x, pos.y);
            }
            if !self.session.tick() {
                return;
            }
            let events = self.session.drain_events();
            audio::dispatch(&events, &mut self.audio);
            if let Some(GameEvent::GameOver { final_score }) = events
                .iter()
                .find(|e| matches!(e, GameEvent::GameOver { .. }))
            {
                show_game_over(*final_score);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(renderer) = &mut self.renderer {
                if let Err(e) = renderer.draw(self.session.state()) {
                    log::warn!("Render error: {e}");
                }
            }
            if self.loading && self.renderer.as_ref().is_none_or(|r| r.sprites_settled()) {
                self.loading = false;
                set_display("loading", "none");
                log::info!("Sprites loaded");
            }
        }
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn set_display(id: &str, value: &str) {
        if let Some(el) = document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", value);
        }
    }

    fn show_game_over(final_score: u64) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("final-score")) {
            el.set_text_content(Some(&final_score.to_string()));
        }
        set_display("game-over-screen", "flex");
    }

    fn new_seed() -> u64 {
        js_sys::Date::now() as u64
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Catch the Heat starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (w, h) = viewport_size(&window);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);

        let settings = Settings::load();
        let tuning = Tuning::load();
        let seed = new_seed();

        let renderer = match CanvasRenderer::new(&canvas, &settings) {
            Ok(r) => Some(r),
            Err(e) => {
                log::error!("Canvas unavailable: {e}");
                None
            }
        };

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, Vec2::new(w, h), tuning),
            renderer,
            audio: WebAudio::new(&settings),
            pointer: PointerSample::new(),
            settings,
            loading: true,
        }));
        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_resize(&canvas, game.clone());
        setup_sprite_picker(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Catch the Heat running!");
    }

    fn viewport_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as f32, h as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let pointer = game.borrow().pointer.clone();

        // Mouse move
        {
            let pointer = pointer.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                pointer.write(client_to_field(
                    Vec2::new(event.client_x() as f32, event.client_y() as f32),
                    Vec2::new(rect.left() as f32, rect.top() as f32),
                ));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    pointer.write(client_to_field(
                        Vec2::new(touch.client_x() as f32, touch.client_y() as f32),
                        Vec2::new(rect.left() as f32, rect.top() as f32),
                    ));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: pause and mute
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match event.key().as_str() {
                    "Escape" | "p" | "P" => {
                        if let Err(e) = game.borrow_mut().session.toggle_pause() {
                            log::debug!("{e}");
                        }
                    }
                    "m" | "M" => {
                        let mut g = game.borrow_mut();
                        let muted = !g.settings.muted;
                        g.settings.muted = muted;
                        g.audio.set_muted(muted);
                        if !muted && g.session.phase() == SessionPhase::Running {
                            g.audio.start_music();
                        }
                        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let (w, h) = viewport_size(&window);
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            game.borrow_mut().session.resize(w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_sprite_picker(game: Rc<RefCell<Game>>) {
        let Some(inputs) = document().and_then(|d| d.query_selector_all("input[name=\"sprite\"]").ok())
        else {
            return;
        };
        for i in 0..inputs.length() {
            let Some(input) = inputs.get(i).and_then(|n| n.dyn_into::<HtmlInputElement>().ok()) else {
                continue;
            };
            let game = game.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(skin) = CatcherSkin::from_str(&input_clone.value()) else {
                    log::warn!("Unknown sprite {}", input_clone.value());
                    return;
                };
                let mut g = game.borrow_mut();
                g.settings.skin = skin;
                if let Some(renderer) = &mut g.renderer {
                    renderer.set_skin(skin);
                }
            });
            let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("Missing #{id}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("start-button", move || {
                let mut g = game.borrow_mut();
                match g.session.start() {
                    Ok(()) => {
                        set_display("start-screen", "none");
                        g.audio.resume();
                        g.audio.start_music();
                    }
                    Err(e) => log::warn!("{e}"),
                }
            });
        }

        {
            let game = game.clone();
            on_click("restart-button", move || {
                let mut g = game.borrow_mut();
                match g.session.restart(new_seed()) {
                    Ok(()) => {
                        set_display("game-over-screen", "none");
                        g.audio.start_music();
                    }
                    Err(e) => log::warn!("{e}"),
                }
            });
        }

        on_click("share-button", move || {
            let score = game.borrow().session.state().score;
            if !share_score(&share_message(score)) {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message("Share not supported on this browser");
                }
            }
        });
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        fn auto_pause(game: &Rc<RefCell<Game>>, why: &str) {
            let mut g = game.borrow_mut();
            if g.settings.auto_pause && g.session.phase() == SessionPhase::Running {
                let _ = g.session.pause();
                log::info!("Auto-paused ({why})");
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&game, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&game, "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a simple bot chases the lowest drop until game over
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use catch_the_heat::audio::{self, NullAudio};
    use catch_the_heat::renderer::{NullRenderer, Renderer};
    use catch_the_heat::sim::Session;
    use catch_the_heat::Tuning;
    use glam::Vec2;

    env_logger::init();
    log::info!("Catch the Heat (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345_u64);
    let max_ticks = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60 * 10_u64);

    let mut session = Session::new(seed, Vec2::new(800.0, 600.0), Tuning::load());
    let mut audio = NullAudio;
    let mut renderer = NullRenderer;

    if let Err(e) = session.start() {
        log::error!("{e}");
        return;
    }

    let mut ticks = 0;
    while ticks < max_ticks && session.tick() {
        ticks += 1;
        let events = session.drain_events();
        audio::dispatch(&events, &mut audio);
        if let Err(e) = renderer.draw(session.state()) {
            log::warn!("Render error: {e}");
        }

        let state = session.state();
        // Lowest drop first, the catcher sits near the bottom
        let target = state
            .drops
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|d| d.pos.x + d.size.x / 2.0);
        if let Some(x) = target {
            let y = state.field.y - state.catcher.size.y / 2.0;
            session.set_pointer(x, y);
        }
    }

    let state = session.state();
    println!(
        "seed {seed}: {ticks} ticks, score {}, level {}, lives {}, phase {:?}",
        state.score, state.level, state.lives, state.phase
    );
}
